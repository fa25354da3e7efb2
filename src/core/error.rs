//! Error type for the combat engine.
//!
//! Card plays after the round has ended are no-ops, not errors. Errors are
//! reserved for caller contract violations: an upgrade index outside the
//! four offered choices, an inconsistent configuration, or a snapshot that
//! cannot be decoded or describes an unreachable state.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("unknown upgrade kind: {0} (expected 0..=3)")]
    UnknownUpgrade(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("inconsistent snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, CombatError>;
