//! Progression that persists across rounds.
//!
//! Mutated only by [`Progression::apply`] (one upgrade per defeated enemy)
//! and replaced wholesale on a full restart.

mod upgrade;

pub use upgrade::UpgradeKind;

use serde::{Deserialize, Serialize};

use crate::core::CombatConfig;

/// Upgrades and base stats earned so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Drives all enemy scaling. Increases by exactly one per upgrade.
    pub enemies_defeated: u32,
    pub attack_upgrade_level: u32,
    pub shield_upgrade_level: u32,
    pub base_player_max_hp: u32,
    pub base_player_defense: u32,
    pub min_damage: i32,
    pub max_damage: f64,
    pub min_defense_gain: f64,
    pub max_defense_gain: f64,
}

impl Progression {
    /// Starting progression for a fresh session.
    #[must_use]
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            enemies_defeated: 0,
            attack_upgrade_level: 0,
            shield_upgrade_level: 0,
            base_player_max_hp: config.initial_player_hp,
            base_player_defense: config.initial_player_defense,
            min_damage: config.min_damage,
            max_damage: config.initial_max_damage,
            min_defense_gain: config.initial_min_defense,
            max_defense_gain: config.initial_max_defense,
        }
    }

    /// Count one more defeated enemy and apply the chosen upgrade.
    ///
    /// Range upgrades are recomputed from the initial values and the level,
    /// so repeated half-steps never drift.
    pub fn apply(&mut self, kind: UpgradeKind, config: &CombatConfig) {
        self.enemies_defeated = self.enemies_defeated.saturating_add(1);

        match kind {
            UpgradeKind::Health => {
                self.base_player_max_hp = self.base_player_max_hp.saturating_add(1);
            }
            UpgradeKind::Defense => {
                self.base_player_defense = self.base_player_defense.saturating_add(1);
            }
            UpgradeKind::Attack => {
                self.attack_upgrade_level = self.attack_upgrade_level.saturating_add(1);
                let bonus = f64::from(self.attack_upgrade_level) * config.upgrade_step;
                self.max_damage = config.initial_max_damage + bonus;
            }
            UpgradeKind::Shield => {
                self.shield_upgrade_level = self.shield_upgrade_level.saturating_add(1);
                let bonus = f64::from(self.shield_upgrade_level) * config.upgrade_step;
                self.min_defense_gain = config.initial_min_defense + bonus;
                self.max_defense_gain = config.initial_max_defense + bonus;
            }
        }
    }
}
