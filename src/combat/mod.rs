//! Combat rules: enemy scaling, damage rolls, and turn reports.
//!
//! These are pure functions over explicit inputs; `crate::engine` owns the
//! mutable session and calls into them.

pub mod damage;
pub mod report;
pub mod scaling;

pub use damage::{
    absorb, resolve_hit, roll_attack, roll_defense_gain, roll_enemy_attack, Absorption, AttackRoll,
    EnemyRoll, HitResult,
};
pub use report::{CardEffect, CardPlay, EnemyAttack, RoundOutcome, TurnReport};
pub use scaling::{ArmorState, EnemyScaling};
