//! Core building blocks: card kinds, RNG, configuration, errors.
//!
//! Everything here is independent of the combat rules; the engine in
//! `crate::engine` combines them.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::CardKind;
pub use config::{CombatConfig, DEFAULT_ENEMIES, FALLBACK_ENEMY};
pub use error::{CombatError, Result};
pub use rng::{CombatRng, GameRng, GameRngState, ScriptedRng};
