//! Session checkpoints.
//!
//! A snapshot captures configuration, progression, the round in progress
//! and the RNG position, so a restored engine continues with exactly the
//! same rolls.

use serde::{Deserialize, Serialize};

use super::round::RoundState;
use super::session::CombatEngine;
use crate::core::{CombatConfig, GameRng, GameRngState, Result};
use crate::progression::Progression;

/// Serializable engine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub config: CombatConfig,
    pub progression: Progression,
    pub round: RoundState,
    pub rng: GameRngState,
}

impl CombatSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl CombatEngine<GameRng> {
    /// Capture the full session.
    #[must_use]
    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            config: self.config.clone(),
            progression: self.progression.clone(),
            round: self.round.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// Fails if the captured configuration does not validate or the round
    /// could not have been reached from the captured progression.
    pub fn restore(snapshot: CombatSnapshot) -> Result<Self> {
        snapshot.config.validate()?;
        snapshot.round.check_consistent(&snapshot.progression, &snapshot.config)?;
        Ok(Self {
            rng: GameRng::from_state(&snapshot.rng),
            config: snapshot.config,
            progression: snapshot.progression,
            round: snapshot.round,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardKind, CombatError};
    use crate::progression::UpgradeKind;

    #[test]
    fn test_restore_continues_identically() {
        let mut engine = CombatEngine::new(77);
        engine.play_card(CardKind::Defense);
        engine.apply_upgrade(UpgradeKind::Shield);

        let mut restored = CombatEngine::restore(engine.snapshot()).unwrap();

        for card in [CardKind::Attack, CardKind::Defense, CardKind::Attack] {
            assert_eq!(engine.play_card(card), restored.play_card(card));
        }
        assert_eq!(engine.round(), restored.round());
        assert_eq!(engine.progression(), restored.progression());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut engine = CombatEngine::new(5);
        engine.play_card(CardKind::Attack);

        let snapshot = engine.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = CombatSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let bytes = CombatEngine::new(5).snapshot().to_bytes().unwrap();
        let err = CombatSnapshot::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, CombatError::Snapshot(_)));
    }

    #[test]
    fn test_restore_rejects_dead_enemy_in_progress() {
        let mut snapshot = CombatEngine::new(5).snapshot();
        snapshot.round.enemy_hp = 0;

        let err = CombatEngine::restore(snapshot).unwrap_err();
        assert!(matches!(err, CombatError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_restore_between_upgrade_and_reset() {
        let mut engine = CombatEngine::new(5);
        engine.round.enemy_hp = 0;
        engine.round.outcome = crate::combat::RoundOutcome::Victory;
        engine.apply_upgrade(UpgradeKind::Attack);

        let restored = CombatEngine::restore(engine.snapshot()).unwrap();
        assert!(restored.is_round_over());
        assert_eq!(restored.enemies_defeated(), 1);
    }

    #[test]
    fn test_restore_rejects_invalid_config() {
        let mut snapshot = CombatEngine::new(5).snapshot();
        snapshot.config.attack_card_chance = 2.0;
        assert!(CombatEngine::restore(snapshot).is_err());
    }
}
