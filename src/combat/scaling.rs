//! Enemy scaling derived from the number of enemies defeated.
//!
//! ```text
//! max_hp        = base_hp + floor(defeated / 2) * hp_per_tier
//! damage_bonus  = floor(defeated / 3)
//! armored       = defeated > 0 && defeated % 2 == 0
//! armor_value   = 1 + floor((defeated - 2) / 2)      (armored only)
//! penetrating   = armored && defeated % 4 == 2
//! ```

use serde::{Deserialize, Serialize};

use crate::core::CombatConfig;

/// Enemy armor as seen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmorState {
    /// This enemy has no armor.
    None,
    /// Armor is intact.
    ///
    /// Penetrating armor is never broken: every hit is reduced by `value`.
    /// Non-penetrating armor absorbs the whole next hit and then breaks.
    Intact { value: u32, penetrating: bool },
    /// Non-penetrating armor that has been broken this round.
    Broken,
}

impl ArmorState {
    #[must_use]
    pub const fn is_intact(self) -> bool {
        matches!(self, ArmorState::Intact { .. })
    }

    /// Armor value, zero unless intact.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            ArmorState::Intact { value, .. } => value,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_penetrating(self) -> bool {
        matches!(self, ArmorState::Intact { penetrating: true, .. })
    }
}

/// Enemy stats for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyScaling {
    pub max_hp: u32,
    pub damage_bonus: u32,
    pub armor: ArmorState,
}

impl EnemyScaling {
    /// Scaling for the enemy met after `enemies_defeated` victories.
    #[must_use]
    pub fn for_enemies_defeated(enemies_defeated: u32, config: &CombatConfig) -> Self {
        let max_hp = config
            .base_enemy_hp
            .saturating_add((enemies_defeated / 2).saturating_mul(config.enemy_hp_per_tier));
        let damage_bonus = enemies_defeated / 3;

        let armor = if enemies_defeated > 0 && enemies_defeated % 2 == 0 {
            ArmorState::Intact {
                value: 1 + (enemies_defeated - 2) / 2,
                penetrating: enemies_defeated % 4 == 2,
            }
        } else {
            ArmorState::None
        };

        Self {
            max_hp,
            damage_bonus,
            armor,
        }
    }

    /// Inclusive enemy damage roll bounds.
    #[must_use]
    pub fn damage_range(&self, config: &CombatConfig) -> (u32, u32) {
        (config.min_enemy_damage, config.max_enemy_damage.saturating_add(self.damage_bonus))
    }
}
