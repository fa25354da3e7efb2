//! Per-round state.

use serde::{Deserialize, Serialize};

use crate::combat::{ArmorState, EnemyScaling, RoundOutcome};
use crate::core::{CardKind, CombatConfig, CombatError, CombatRng, Result, FALLBACK_ENEMY};
use crate::progression::Progression;

/// Counters and flags for the round in progress.
///
/// Invariant: `outcome` is over exactly when `enemy_hp == 0` or
/// `player_hp == 0`, and is `Defeat` only when `player_hp == 0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub player_hp: u32,
    pub player_defense: u32,
    pub enemy_hp: u32,
    /// Scaling computed when the round started.
    pub scaling: EnemyScaling,
    /// Current armor; starts as `scaling.armor` and may break.
    pub armor: ArmorState,
    pub enemy_name: String,
    pub next_card: CardKind,
    pub outcome: RoundOutcome,
    /// A card was played and its enemy counter-attack has not resolved yet.
    pub enemy_turn_pending: bool,
}

impl RoundState {
    /// Start a round from the current progression.
    ///
    /// Draws the enemy name, then the first card preview.
    pub fn start(
        progression: &Progression,
        config: &CombatConfig,
        rng: &mut impl CombatRng,
    ) -> Self {
        let scaling = EnemyScaling::for_enemies_defeated(progression.enemies_defeated, config);
        let enemy_name = draw_enemy_name(&config.enemy_roster, rng);
        let next_card = CardKind::draw(rng, config.attack_card_chance);

        Self {
            player_hp: progression.base_player_max_hp,
            player_defense: progression.base_player_defense,
            enemy_hp: scaling.max_hp,
            scaling,
            armor: scaling.armor,
            enemy_name,
            next_card,
            outcome: RoundOutcome::InProgress,
            enemy_turn_pending: false,
        }
    }

    /// Check that this round could have been reached from `progression`.
    ///
    /// The scaling may lag behind `progression` when upgrades were applied
    /// without starting a new round, but never run ahead of it.
    pub fn check_consistent(&self, progression: &Progression, config: &CombatConfig) -> Result<()> {
        let reachable = (0..3)
            .filter_map(|offset| self.scaling.damage_bonus.checked_mul(3)?.checked_add(offset))
            .filter(|&defeated| defeated <= progression.enemies_defeated)
            .any(|defeated| EnemyScaling::for_enemies_defeated(defeated, config) == self.scaling);
        if !reachable {
            return Err(inconsistent(format!(
                "enemy scaling {:?} does not match {} enemies defeated",
                self.scaling, progression.enemies_defeated
            )));
        }

        if self.enemy_hp > self.scaling.max_hp {
            return Err(inconsistent(format!(
                "enemy hp {} exceeds max {}",
                self.enemy_hp, self.scaling.max_hp
            )));
        }

        let armor_ok = match self.armor {
            ArmorState::Broken => {
                matches!(self.scaling.armor, ArmorState::Intact { penetrating: false, .. })
            }
            armor => armor == self.scaling.armor,
        };
        if !armor_ok {
            return Err(inconsistent(format!(
                "armor {:?} cannot follow {:?}",
                self.armor, self.scaling.armor
            )));
        }

        let outcome_ok = match self.outcome {
            RoundOutcome::InProgress => self.enemy_hp > 0 && self.player_hp > 0,
            RoundOutcome::Victory => self.enemy_hp == 0 && self.player_hp > 0,
            RoundOutcome::Defeat => self.player_hp == 0 && self.enemy_hp > 0,
        };
        if !outcome_ok {
            return Err(inconsistent(format!(
                "outcome {:?} with player hp {} and enemy hp {}",
                self.outcome, self.player_hp, self.enemy_hp
            )));
        }

        if self.outcome.is_over() && self.enemy_turn_pending {
            return Err(inconsistent("enemy turn pending after the round ended".into()));
        }

        Ok(())
    }
}

fn inconsistent(reason: String) -> CombatError {
    CombatError::InvalidSnapshot(reason)
}

fn draw_enemy_name(roster: &[String], rng: &mut impl CombatRng) -> String {
    if roster.is_empty() {
        return FALLBACK_ENEMY.to_string();
    }
    let len = u32::try_from(roster.len()).unwrap_or(u32::MAX);
    let index = rng.below(len) as usize;
    roster.get(index).map_or_else(|| FALLBACK_ENEMY.to_string(), Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;

    #[test]
    fn test_start_uses_progression() {
        let config = CombatConfig::default();
        let mut progression = Progression::new(&config);
        progression.enemies_defeated = 4;
        progression.base_player_max_hp = 12;

        let mut rng = ScriptedRng::new(0).with_ints([3]).with_f64s([0.7]);
        let round = RoundState::start(&progression, &config, &mut rng);

        assert_eq!(round.player_hp, 12);
        assert_eq!(round.player_defense, 5);
        assert_eq!(round.enemy_hp, 21);
        assert_eq!(round.armor, ArmorState::Intact { value: 2, penetrating: false });
        assert_eq!(round.enemy_name, "tung");
        assert_eq!(round.next_card, CardKind::Defense);
        assert_eq!(round.outcome, RoundOutcome::InProgress);
        assert!(!round.enemy_turn_pending);
    }

    fn fresh_round(enemies_defeated: u32) -> (RoundState, Progression, CombatConfig) {
        let config = CombatConfig::default();
        let mut progression = Progression::new(&config);
        progression.enemies_defeated = enemies_defeated;
        let mut rng = ScriptedRng::new(0).with_ints([0]).with_f64s([0.9]);
        let round = RoundState::start(&progression, &config, &mut rng);
        (round, progression, config)
    }

    #[test]
    fn test_fresh_round_is_consistent() {
        for defeated in [0, 1, 2, 4, 9] {
            let (round, progression, config) = fresh_round(defeated);
            assert!(round.check_consistent(&progression, &config).is_ok());
        }
    }

    #[test]
    fn test_scaling_may_lag_progression() {
        let (round, mut progression, config) = fresh_round(4);
        progression.enemies_defeated = 6;
        assert!(round.check_consistent(&progression, &config).is_ok());

        progression.enemies_defeated = 3;
        assert!(round.check_consistent(&progression, &config).is_err());
    }

    #[test]
    fn test_rejects_unreachable_rounds() {
        let (round, progression, config) = fresh_round(4);

        let mut dead_enemy = round.clone();
        dead_enemy.enemy_hp = 0;
        let err = dead_enemy.check_consistent(&progression, &config).unwrap_err();
        assert!(matches!(err, CombatError::InvalidSnapshot(_)));

        let mut overfull = round.clone();
        overfull.enemy_hp = overfull.scaling.max_hp + 1;
        assert!(overfull.check_consistent(&progression, &config).is_err());

        let mut pending_after_win = round.clone();
        pending_after_win.enemy_hp = 0;
        pending_after_win.outcome = RoundOutcome::Victory;
        assert!(pending_after_win.check_consistent(&progression, &config).is_ok());
        pending_after_win.enemy_turn_pending = true;
        assert!(pending_after_win.check_consistent(&progression, &config).is_err());

        let mut broken = round.clone();
        broken.armor = ArmorState::Broken;
        assert!(broken.check_consistent(&progression, &config).is_ok());
        broken.armor = ArmorState::None;
        assert!(broken.check_consistent(&progression, &config).is_err());

        let mut tampered = round;
        tampered.scaling.max_hp += 5;
        assert!(tampered.check_consistent(&progression, &config).is_err());
    }

    #[test]
    fn test_empty_roster_falls_back() {
        let config = CombatConfig::default().with_enemy_roster(Vec::<String>::new());
        let progression = Progression::new(&config);
        let mut rng = ScriptedRng::new(0).with_f64s([0.1]);

        let round = RoundState::start(&progression, &config, &mut rng);
        assert_eq!(round.enemy_name, FALLBACK_ENEMY);
        assert_eq!(round.next_card, CardKind::Attack);
    }
}
