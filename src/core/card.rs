//! Card kinds.

use serde::{Deserialize, Serialize};

use super::rng::CombatRng;

/// The two kinds of card a player can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Deals damage to the enemy.
    Attack,
    /// Adds to the player's defense counter.
    Defense,
}

impl CardKind {
    /// Map the presentation layer's "is this a defense card" flag.
    #[must_use]
    pub const fn from_defense_flag(is_defense: bool) -> Self {
        if is_defense {
            CardKind::Defense
        } else {
            CardKind::Attack
        }
    }

    #[must_use]
    pub const fn is_defense(self) -> bool {
        matches!(self, CardKind::Defense)
    }

    /// Draw a card kind: attack with probability `attack_chance`.
    pub fn draw(rng: &mut impl CombatRng, attack_chance: f64) -> Self {
        if rng.chance(attack_chance) {
            CardKind::Attack
        } else {
            CardKind::Defense
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardKind::Attack => "attack",
            CardKind::Defense => "defense",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
