//! Engine bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::combat::ArmorState;
use crate::core::CardKind;
use crate::engine::CombatEngine;
use crate::progression::Progression;

/// Read-only copy of the session's progression.
#[pyclass(name = "Progression", frozen)]
#[derive(Clone)]
pub struct PyProgression {
    inner: Progression,
}

#[pymethods]
impl PyProgression {
    #[getter]
    fn enemies_defeated(&self) -> u32 {
        self.inner.enemies_defeated
    }

    #[getter]
    fn attack_upgrade_level(&self) -> u32 {
        self.inner.attack_upgrade_level
    }

    #[getter]
    fn shield_upgrade_level(&self) -> u32 {
        self.inner.shield_upgrade_level
    }

    #[getter]
    fn max_hp(&self) -> u32 {
        self.inner.base_player_max_hp
    }

    #[getter]
    fn base_defense(&self) -> u32 {
        self.inner.base_player_defense
    }

    /// Attack damage range as (min, max).
    #[getter]
    fn damage_range(&self) -> (i32, f64) {
        (self.inner.min_damage, self.inner.max_damage)
    }

    /// Defense gain range as (min, max).
    #[getter]
    fn defense_gain_range(&self) -> (f64, f64) {
        (self.inner.min_defense_gain, self.inner.max_defense_gain)
    }

    fn __repr__(&self) -> String {
        format!(
            "Progression(defeated={}, attack={}, shield={}, max_hp={}, defense={})",
            self.inner.enemies_defeated,
            self.inner.attack_upgrade_level,
            self.inner.shield_upgrade_level,
            self.inner.base_player_max_hp,
            self.inner.base_player_defense
        )
    }
}

/// Python wrapper for CombatEngine.
#[pyclass(name = "CombatEngine")]
pub struct PyCombatEngine {
    engine: CombatEngine,
}

#[pymethods]
impl PyCombatEngine {
    /// Create a new engine with the default configuration.
    ///
    /// # Arguments
    /// - seed: RNG seed for deterministic sessions
    #[new]
    #[pyo3(signature = (seed = 42))]
    fn new(seed: u64) -> Self {
        Self {
            engine: CombatEngine::new(seed),
        }
    }

    /// Play a card and resolve the enemy's answer.
    ///
    /// Returns the damage dealt to the enemy.
    fn play_card(&mut self, defense: bool) -> u32 {
        self.engine.play_card(CardKind::from_defense_flag(defense)).card.damage_dealt()
    }

    /// Resolve only the player's card; the enemy answers on
    /// `resolve_enemy_turn`.
    ///
    /// Returns the damage dealt to the enemy.
    fn begin_card(&mut self, defense: bool) -> u32 {
        self.engine.begin_card(CardKind::from_defense_flag(defense)).damage_dealt()
    }

    /// Resolve the pending enemy attack.
    ///
    /// Returns the damage dealt, or None when no attack was pending.
    fn resolve_enemy_turn(&mut self) -> Option<u32> {
        self.engine.resolve_enemy_turn().map(|attack| attack.roll.damage)
    }

    /// Apply an upgrade by index: 0 health, 1 defense, 2 attack, 3 shield.
    fn apply_upgrade(&mut self, index: u8) -> PyResult<()> {
        self.engine
            .apply_upgrade_index(index)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn reset_round(&mut self) {
        self.engine.reset_round();
    }

    fn reset_progression(&mut self) {
        self.engine.reset_progression();
    }

    #[getter]
    fn player_hp(&self) -> u32 {
        self.engine.player_hp()
    }

    #[getter]
    fn player_defense(&self) -> u32 {
        self.engine.player_defense()
    }

    #[getter]
    fn enemy_hp(&self) -> u32 {
        self.engine.enemy_hp()
    }

    #[getter]
    fn enemy_max_hp(&self) -> u32 {
        self.engine.enemy_max_hp()
    }

    #[getter]
    fn enemy_name(&self) -> String {
        self.engine.enemy_name().to_string()
    }

    #[getter]
    fn round_over(&self) -> bool {
        self.engine.is_round_over()
    }

    #[getter]
    fn player_defeated(&self) -> bool {
        self.engine.is_player_defeated()
    }

    #[getter]
    fn enemy_turn_pending(&self) -> bool {
        self.engine.has_pending_enemy_turn()
    }

    /// "in_progress", "victory" or "defeat".
    #[getter]
    fn outcome(&self) -> &'static str {
        self.engine.outcome().as_str()
    }

    #[getter]
    fn enemies_defeated(&self) -> u32 {
        self.engine.enemies_defeated()
    }

    #[getter]
    fn round_number(&self) -> u32 {
        self.engine.round_number()
    }

    /// "attack" or "defense".
    #[getter]
    fn next_card(&self) -> &'static str {
        self.engine.next_card().as_str()
    }

    /// Armor as (value, penetrating, broken).
    #[getter]
    fn armor(&self) -> (u32, bool, bool) {
        let armor = self.engine.armor();
        (armor.value(), armor.is_penetrating(), armor == ArmorState::Broken)
    }

    /// Enemy scaling as (max_hp, damage_bonus, armor_value, penetrating).
    #[getter]
    fn scaling(&self) -> (u32, u32, u32, bool) {
        let scaling = self.engine.scaling();
        (
            scaling.max_hp,
            scaling.damage_bonus,
            scaling.armor.value(),
            scaling.armor.is_penetrating(),
        )
    }

    /// Inclusive enemy damage bounds as (min, max).
    #[getter]
    fn enemy_damage_range(&self) -> (u32, u32) {
        self.engine.enemy_damage_range()
    }

    #[getter]
    fn progression(&self) -> PyProgression {
        PyProgression {
            inner: self.engine.progression().clone(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CombatEngine(round={}, hp={}, def={}, enemy_hp={}, outcome={})",
            self.engine.round_number(),
            self.engine.player_hp(),
            self.engine.player_defense(),
            self.engine.enemy_hp(),
            self.engine.outcome().as_str()
        )
    }
}
