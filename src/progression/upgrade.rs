//! Upgrade kinds offered after a victory.

use serde::{Deserialize, Serialize};

use crate::core::CombatError;

/// The four upgrade choices, in the order they are offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// +1 max HP.
    Health,
    /// +1 starting defense.
    Defense,
    /// Raises the top of the attack damage range.
    Attack,
    /// Raises both ends of the defense gain range.
    Shield,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Health,
        UpgradeKind::Defense,
        UpgradeKind::Attack,
        UpgradeKind::Shield,
    ];

    /// Position of this choice in the upgrade menu.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            UpgradeKind::Health => 0,
            UpgradeKind::Defense => 1,
            UpgradeKind::Attack => 2,
            UpgradeKind::Shield => 3,
        }
    }
}

impl TryFrom<u8> for UpgradeKind {
    type Error = CombatError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(CombatError::UnknownUpgrade(index))
    }
}

impl std::fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UpgradeKind::Health => "health",
            UpgradeKind::Defense => "defense",
            UpgradeKind::Attack => "attack",
            UpgradeKind::Shield => "shield",
        };
        f.write_str(name)
    }
}
