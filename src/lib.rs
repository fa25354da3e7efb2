//! # marrow-duel
//!
//! Combat and progression engine for a single-screen, turn-based card duel.
//!
//! The player plays attack or defense cards against one enemy at a time.
//! Every card is answered by an enemy attack that drains defense before HP.
//! Each victory grants one of four upgrades and the next enemy scales up:
//! more HP every two enemies, more damage every three, and armor on every
//! even count.
//!
//! ## Design Principles
//!
//! 1. **Caller-owned session**: one [`CombatEngine`] per play session, owned
//!    by the presentation layer. No global state.
//!
//! 2. **Injected randomness**: every roll goes through [`CombatRng`], so
//!    seeded ([`GameRng`]) and scripted ([`ScriptedRng`]) sources give
//!    reproducible sessions.
//!
//! 3. **No I/O**: the engine emits `tracing` events and nothing else.
//!    Rendering, assets and high-score storage live outside this crate.
//!
//! ## Modules
//!
//! - `core`: card kinds, RNG, configuration, errors
//! - `combat`: enemy scaling, damage rolls, turn reports
//! - `progression`: upgrades that persist across rounds
//! - `engine`: the session state machine and snapshots

pub mod combat;
pub mod core;
pub mod engine;
pub mod progression;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CardKind, CombatConfig, CombatError, CombatRng, GameRng, GameRngState, Result, ScriptedRng,
};

pub use crate::combat::{
    Absorption, ArmorState, AttackRoll, CardEffect, CardPlay, EnemyAttack, EnemyRoll, EnemyScaling,
    HitResult, RoundOutcome, TurnReport,
};

pub use crate::progression::{Progression, UpgradeKind};

pub use crate::engine::{CombatEngine, CombatSnapshot, RoundState};
