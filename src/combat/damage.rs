//! Damage rolls and application.
//!
//! Each roll function draws from the injected RNG in a fixed order so a
//! scripted source reproduces a play exactly:
//!
//! - attack: one float for the damage, one float for the critical check
//! - defense: one integer in `0..3`
//! - enemy: one integer for the damage, one float for the critical check

use serde::{Deserialize, Serialize};

use super::scaling::ArmorState;
use crate::core::CombatRng;

/// Number of distinct defense gain rolls (`min`, `min + 1`, `min + 2`).
pub const DEFENSE_ROLL_SPAN: u32 = 3;

/// A rolled player attack before armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub damage: u32,
    pub critical: bool,
}

/// Roll player attack damage: `floor(uniform(min, max))`, multiplied on a critical hit.
pub fn roll_attack(
    rng: &mut impl CombatRng,
    min: i32,
    max: f64,
    crit_chance: f64,
    crit_multiplier: i32,
) -> AttackRoll {
    let min = f64::from(min);
    let raw = rng.next_f64() * (max - min) + min;
    let mut damage = raw.floor().max(0.0) as u32;

    let critical = rng.chance(crit_chance);
    if critical {
        damage = damage.saturating_mul(crit_multiplier.max(1) as u32);
    }

    AttackRoll { damage, critical }
}

/// Roll the defense gained from a defense card: `floor(min + roll)`, roll in {0, 1, 2}.
pub fn roll_defense_gain(rng: &mut impl CombatRng, min: f64) -> u32 {
    let roll = rng.below(DEFENSE_ROLL_SPAN);
    (f64::from(roll) + min).floor().max(0.0) as u32
}

/// A rolled enemy attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyRoll {
    /// Damage before the critical multiplier.
    pub base: u32,
    /// Damage actually dealt.
    pub damage: u32,
    pub critical: bool,
}

/// Roll enemy damage uniformly in `lo..=hi`; a critical hit multiplies and rounds up.
///
/// A critical hit never deals less than the base roll.
pub fn roll_enemy_attack(
    rng: &mut impl CombatRng,
    (lo, hi): (u32, u32),
    crit_chance: f64,
    crit_multiplier: f64,
) -> EnemyRoll {
    let hi = hi.max(lo);
    let base = rng.below(hi - lo + 1) + lo;

    let critical = rng.chance(crit_chance);
    let damage = if critical {
        (f64::from(base) * crit_multiplier).ceil().max(f64::from(base)) as u32
    } else {
        base
    };

    EnemyRoll {
        base,
        damage,
        critical,
    }
}

/// How a player attack interacted with the enemy's armor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitResult {
    /// No intact armor: full damage.
    Direct { dealt: u32 },
    /// Penetrating armor reduced the hit.
    Penetrated { armor: u32, dealt: u32 },
    /// Breakable armor absorbed the hit and broke.
    ArmorBroken,
}

impl HitResult {
    /// Damage that reached the enemy's HP.
    #[must_use]
    pub const fn dealt(self) -> u32 {
        match self {
            HitResult::Direct { dealt } | HitResult::Penetrated { dealt, .. } => dealt,
            HitResult::ArmorBroken => 0,
        }
    }
}

/// Resolve a hit against the current armor, returning the result and the armor afterwards.
#[must_use]
pub fn resolve_hit(armor: ArmorState, damage: u32) -> (HitResult, ArmorState) {
    match armor {
        ArmorState::Intact { value, penetrating: true } => (
            HitResult::Penetrated {
                armor: value,
                dealt: damage.saturating_sub(value),
            },
            armor,
        ),
        ArmorState::Intact { penetrating: false, .. } => {
            (HitResult::ArmorBroken, ArmorState::Broken)
        }
        ArmorState::None | ArmorState::Broken => (HitResult::Direct { dealt: damage }, armor),
    }
}

/// How incoming damage was split between defense and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absorption {
    pub absorbed: u32,
    pub hp_lost: u32,
}

/// Apply damage to defense first, then HP. Neither counter goes below zero;
/// damage beyond both is discarded.
pub fn absorb(damage: u32, defense: &mut u32, hp: &mut u32) -> Absorption {
    let absorbed = damage.min(*defense);
    *defense -= absorbed;

    let hp_lost = (damage - absorbed).min(*hp);
    *hp -= hp_lost;

    Absorption { absorbed, hp_lost }
}
