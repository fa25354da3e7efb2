//! Results returned by engine transitions.
//!
//! Reports carry the rolled values so a presentation layer can show damage
//! numbers, critical flashes and armor indicators without diffing counters.

use serde::{Deserialize, Serialize};

use super::damage::{Absorption, AttackRoll, EnemyRoll, HitResult};
use crate::core::CardKind;

/// State of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    InProgress,
    /// Enemy HP reached zero.
    Victory,
    /// Player HP reached zero.
    Defeat,
}

impl RoundOutcome {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RoundOutcome::InProgress => "in_progress",
            RoundOutcome::Victory => "victory",
            RoundOutcome::Defeat => "defeat",
        }
    }
}

/// What a played card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// The round was already over; nothing changed.
    Ignored,
    Defense { gained: u32 },
    Attack { roll: AttackRoll, hit: HitResult },
}

/// First phase of a card play: the player's card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub card: CardKind,
    pub effect: CardEffect,
    /// Preview of the replacement card after this play.
    pub next_card: CardKind,
    /// True when an enemy turn must follow.
    pub enemy_turn_pending: bool,
    pub outcome: RoundOutcome,
}

impl CardPlay {
    /// A play rejected because the round is over.
    #[must_use]
    pub const fn ignored(card: CardKind, next_card: CardKind, outcome: RoundOutcome) -> Self {
        Self {
            card,
            effect: CardEffect::Ignored,
            next_card,
            enemy_turn_pending: false,
            outcome,
        }
    }

    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.effect, CardEffect::Ignored)
    }

    /// Damage that reached the enemy's HP.
    #[must_use]
    pub const fn damage_dealt(&self) -> u32 {
        match self.effect {
            CardEffect::Attack { hit, .. } => hit.dealt(),
            _ => 0,
        }
    }
}

/// Second phase of a card play: the enemy's counter-attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyAttack {
    pub roll: EnemyRoll,
    pub absorption: Absorption,
    pub outcome: RoundOutcome,
}

/// Both phases of a card play resolved together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub card: CardPlay,
    pub enemy: Option<EnemyAttack>,
}

impl TurnReport {
    /// Round outcome after the whole turn.
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.enemy.map_or(self.card.outcome, |enemy| enemy.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_over() {
        assert!(!RoundOutcome::InProgress.is_over());
        assert!(RoundOutcome::Victory.is_over());
        assert!(RoundOutcome::Defeat.is_over());
        assert_eq!(RoundOutcome::InProgress.as_str(), "in_progress");
        assert_eq!(RoundOutcome::Defeat.as_str(), "defeat");
    }

    #[test]
    fn test_ignored_play() {
        let play = CardPlay::ignored(CardKind::Attack, CardKind::Defense, RoundOutcome::Victory);
        assert!(play.is_ignored());
        assert!(!play.enemy_turn_pending);
        assert_eq!(play.damage_dealt(), 0);
    }

    #[test]
    fn test_turn_outcome_prefers_enemy_phase() {
        let card = CardPlay {
            card: CardKind::Defense,
            effect: CardEffect::Defense { gained: 2 },
            next_card: CardKind::Attack,
            enemy_turn_pending: true,
            outcome: RoundOutcome::InProgress,
        };
        let enemy = EnemyAttack {
            roll: EnemyRoll { base: 3, damage: 3, critical: false },
            absorption: Absorption { absorbed: 0, hp_lost: 3 },
            outcome: RoundOutcome::Defeat,
        };

        assert_eq!(TurnReport { card, enemy: None }.outcome(), RoundOutcome::InProgress);
        assert_eq!(TurnReport { card, enemy: Some(enemy) }.outcome(), RoundOutcome::Defeat);
    }

    #[test]
    fn test_report_serializes() {
        let card = CardPlay {
            card: CardKind::Attack,
            effect: CardEffect::Attack {
                roll: AttackRoll { damage: 4, critical: false },
                hit: HitResult::Direct { dealt: 4 },
            },
            next_card: CardKind::Attack,
            enemy_turn_pending: true,
            outcome: RoundOutcome::InProgress,
        };
        let json = serde_json::to_string(&TurnReport { card, enemy: None }).unwrap();
        let back: TurnReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.card.damage_dealt(), 4);
    }
}
