//! Combat configuration.
//!
//! `CombatConfig` carries every tunable constant of a session:
//! - Starting player stats and the base damage/defense ranges
//! - Enemy base HP, HP growth and base damage range
//! - Critical hit chances and multipliers
//! - Upgrade step size
//! - The enemy roster
//!
//! `CombatConfig::default()` is the canonical balance. Enemy scaling cadence
//! (HP every two enemies, damage every three, armor on even counts) is fixed
//! in `combat::scaling`.

use serde::{Deserialize, Serialize};

use super::error::{CombatError, Result};

/// Enemy used when the roster is empty.
pub const FALLBACK_ENEMY: &str = "yellow frederick";

/// Upper bound for float-valued stats, so rolls always fit a `u32` counter.
const MAX_STAT: f64 = u32::MAX as f64;

/// Default enemy roster.
pub const DEFAULT_ENEMIES: [&str; 10] = [
    "voidling",
    "yellow frederick",
    "tung ahur",
    "tung",
    "voidmage",
    "rage",
    "sobbing son",
    "blakeye",
    "smile",
    "blacklight",
];

/// Complete combat configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Player max HP before any Health upgrade.
    pub initial_player_hp: u32,

    /// Player defense at round start before any Defense upgrade.
    pub initial_player_defense: u32,

    /// Lower bound of the attack damage roll. Never upgraded.
    pub min_damage: i32,

    /// Upper bound of the attack damage roll before Attack upgrades.
    pub initial_max_damage: f64,

    /// Defense gain range before Shield upgrades.
    pub initial_min_defense: f64,
    pub initial_max_defense: f64,

    /// Amount each Attack or Shield upgrade level adds to its range.
    pub upgrade_step: f64,

    /// Enemy HP with no enemies defeated.
    pub base_enemy_hp: u32,

    /// Enemy HP added per two enemies defeated.
    pub enemy_hp_per_tier: u32,

    /// Enemy damage roll bounds before the damage bonus.
    pub min_enemy_damage: u32,
    pub max_enemy_damage: u32,

    /// Player critical hit chance and multiplier.
    pub player_crit_chance: f64,
    pub player_crit_multiplier: i32,

    /// Enemy critical hit chance and multiplier (result rounded up).
    pub enemy_crit_chance: f64,
    pub enemy_crit_multiplier: f64,

    /// Probability that the next card drawn is an attack card.
    pub attack_card_chance: f64,

    /// Enemy names drawn uniformly at round start.
    pub enemy_roster: Vec<String>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            initial_player_hp: 10,
            initial_player_defense: 5,
            min_damage: 3,
            initial_max_damage: 5.0,
            initial_min_defense: 2.0,
            initial_max_defense: 4.0,
            upgrade_step: 0.5,
            base_enemy_hp: 15,
            enemy_hp_per_tier: 3,
            min_enemy_damage: 1,
            max_enemy_damage: 3,
            player_crit_chance: 0.01,
            player_crit_multiplier: 2,
            enemy_crit_chance: 0.20,
            enemy_crit_multiplier: 1.5,
            attack_card_chance: 0.50,
            enemy_roster: DEFAULT_ENEMIES.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

impl CombatConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting player HP and defense.
    #[must_use]
    pub fn with_player_stats(mut self, hp: u32, defense: u32) -> Self {
        self.initial_player_hp = hp;
        self.initial_player_defense = defense;
        self
    }

    /// Set the attack damage range.
    #[must_use]
    pub fn with_damage_range(mut self, min: i32, max: f64) -> Self {
        self.min_damage = min;
        self.initial_max_damage = max;
        self
    }

    /// Set the defense gain range.
    #[must_use]
    pub fn with_defense_range(mut self, min: f64, max: f64) -> Self {
        self.initial_min_defense = min;
        self.initial_max_defense = max;
        self
    }

    /// Set the enemy base HP and per-tier growth.
    #[must_use]
    pub fn with_enemy_hp(mut self, base: u32, per_tier: u32) -> Self {
        self.base_enemy_hp = base;
        self.enemy_hp_per_tier = per_tier;
        self
    }

    /// Set both critical hit chances.
    #[must_use]
    pub fn with_crit_chances(mut self, player: f64, enemy: f64) -> Self {
        self.player_crit_chance = player;
        self.enemy_crit_chance = enemy;
        self
    }

    /// Replace the enemy roster.
    #[must_use]
    pub fn with_enemy_roster<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enemy_roster = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check internal consistency.
    ///
    /// An empty enemy roster is allowed; the engine falls back to
    /// [`FALLBACK_ENEMY`].
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("player_crit_chance", self.player_crit_chance),
            ("enemy_crit_chance", self.enemy_crit_chance),
            ("attack_card_chance", self.attack_card_chance),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(CombatError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }

        if self.initial_player_hp == 0 {
            return Err(CombatError::InvalidConfig("initial_player_hp must be positive".into()));
        }
        if self.base_enemy_hp == 0 {
            return Err(CombatError::InvalidConfig("base_enemy_hp must be positive".into()));
        }
        let bounds = [
            ("initial_max_damage", self.initial_max_damage),
            ("initial_min_defense", self.initial_min_defense),
            ("initial_max_defense", self.initial_max_defense),
            ("upgrade_step", self.upgrade_step),
        ];
        for (name, value) in bounds {
            if !(0.0..=MAX_STAT).contains(&value) {
                return Err(CombatError::InvalidConfig(format!(
                    "{name} must be between 0 and {MAX_STAT}, got {value}"
                )));
            }
        }

        if self.min_damage < 0 || f64::from(self.min_damage) > self.initial_max_damage {
            return Err(CombatError::InvalidConfig(format!(
                "damage range {}-{} is empty or negative",
                self.min_damage, self.initial_max_damage
            )));
        }
        if self.initial_min_defense > self.initial_max_defense {
            return Err(CombatError::InvalidConfig(format!(
                "defense range {}-{} is empty",
                self.initial_min_defense, self.initial_max_defense
            )));
        }
        if self.min_enemy_damage == 0 || self.min_enemy_damage > self.max_enemy_damage {
            return Err(CombatError::InvalidConfig(format!(
                "enemy damage range {}-{} must start at 1 or more",
                self.min_enemy_damage, self.max_enemy_damage
            )));
        }
        if self.player_crit_multiplier < 1
            || !(1.0..=MAX_STAT).contains(&self.enemy_crit_multiplier)
        {
            return Err(CombatError::InvalidConfig(format!(
                "critical multipliers must be finite and at least 1, got {} and {}",
                self.player_crit_multiplier, self.enemy_crit_multiplier
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CombatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_player_hp, 10);
        assert_eq!(config.initial_player_defense, 5);
        assert_eq!(config.base_enemy_hp, 15);
        assert_eq!(config.enemy_roster.len(), 10);
    }

    #[test]
    fn test_builder() {
        let config = CombatConfig::new()
            .with_player_stats(20, 0)
            .with_damage_range(1, 2.0)
            .with_defense_range(1.0, 1.5)
            .with_enemy_hp(30, 5)
            .with_crit_chances(0.0, 0.0)
            .with_enemy_roster(["slime"]);

        assert_eq!(config.initial_player_hp, 20);
        assert_eq!(config.initial_player_defense, 0);
        assert_eq!(config.min_damage, 1);
        assert_eq!(config.initial_max_damage, 2.0);
        assert_eq!(config.base_enemy_hp, 30);
        assert_eq!(config.enemy_hp_per_tier, 5);
        assert_eq!(config.enemy_roster, vec!["slime".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = CombatConfig::new().with_crit_chances(1.5, 0.2);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CombatError::InvalidConfig(_)));
        assert!(err.to_string().contains("player_crit_chance"));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        assert!(CombatConfig::new().with_damage_range(6, 5.0).validate().is_err());
        assert!(CombatConfig::new().with_defense_range(4.0, 2.0).validate().is_err());
        assert!(CombatConfig::new().with_player_stats(0, 5).validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut config = CombatConfig::new();
        config.enemy_crit_multiplier = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::new();
        config.enemy_crit_multiplier = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = CombatConfig::new();
        config.upgrade_step = f64::NAN;
        assert!(config.validate().is_err());

        assert!(CombatConfig::new().with_damage_range(3, f64::NAN).validate().is_err());
        assert!(CombatConfig::new().with_defense_range(f64::NAN, 4.0).validate().is_err());
    }

    #[test]
    fn test_rejects_stats_beyond_counter_range() {
        let err = CombatConfig::new().with_defense_range(4.0e9, 5.0e9).validate().unwrap_err();
        assert!(err.to_string().contains("initial_max_defense"));
        assert!(CombatConfig::new().with_damage_range(3, 1.0e10).validate().is_err());
        assert!(CombatConfig::new().with_defense_range(4.0e9, 4.0e9).validate().is_ok());
    }

    #[test]
    fn test_empty_roster_is_allowed() {
        let config = CombatConfig::new().with_enemy_roster(Vec::<String>::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = CombatConfig::new().with_enemy_hp(20, 4);
        let json = serde_json::to_string(&config).unwrap();
        let restored: CombatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
