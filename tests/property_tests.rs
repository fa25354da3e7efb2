//! Property tests for the combat engine.
//!
//! Random seeds and random card/upgrade sequences must never break the
//! state invariants: counters stay non-negative, the terminal flags agree
//! with the counters, progression only moves forward.

use proptest::prelude::*;

use marrow_duel::{
    CardEffect, CardKind, CombatConfig, CombatEngine, EnemyScaling, GameRng, RoundOutcome,
    UpgradeKind,
};

#[derive(Clone, Copy, Debug)]
enum Step {
    Play(CardKind),
    Begin(CardKind),
    ResolveEnemy,
    Upgrade(UpgradeKind),
    ResetRound,
}

fn card() -> impl Strategy<Value = CardKind> {
    prop_oneof![Just(CardKind::Attack), Just(CardKind::Defense)]
}

fn upgrade() -> impl Strategy<Value = UpgradeKind> {
    (0u8..4).prop_map(|i| UpgradeKind::try_from(i).unwrap())
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => card().prop_map(Step::Play),
        2 => card().prop_map(Step::Begin),
        2 => Just(Step::ResolveEnemy),
        1 => upgrade().prop_map(Step::Upgrade),
        1 => Just(Step::ResetRound),
    ]
}

fn check_invariants(engine: &CombatEngine) {
    let round = engine.round();
    let over = round.enemy_hp == 0 || round.player_hp == 0;

    assert_eq!(engine.is_round_over(), over, "round_over must track the counters");
    if engine.is_player_defeated() {
        assert!(engine.is_round_over());
        assert_eq!(round.player_hp, 0);
    }
    if engine.outcome() == RoundOutcome::Victory {
        assert_eq!(round.enemy_hp, 0);
    }
    assert!(round.enemy_hp <= engine.enemy_max_hp());
    if engine.is_round_over() {
        assert!(!engine.has_pending_enemy_turn());
    }

    let restored = CombatEngine::restore(engine.snapshot()).expect("reachable state restores");
    assert_eq!(restored.round(), round);
}

proptest! {
    #[test]
    fn scaling_matches_formulas(defeated in 0u32..10_000) {
        let s = EnemyScaling::for_enemies_defeated(defeated, &CombatConfig::default());

        prop_assert_eq!(s.max_hp, 15 + 3 * (defeated / 2));
        prop_assert_eq!(s.damage_bonus, defeated / 3);

        let armored = defeated > 0 && defeated % 2 == 0;
        prop_assert_eq!(s.armor.is_intact(), armored);
        prop_assert_eq!(s.armor.is_penetrating(), armored && defeated % 4 == 2);
        if armored {
            prop_assert_eq!(s.armor.value(), 1 + (defeated - 2) / 2);
        }
    }

    #[test]
    fn invariants_hold_for_any_sequence(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..200),
    ) {
        let mut engine =
            CombatEngine::with_rng(CombatConfig::default(), GameRng::new(seed)).unwrap();
        let mut defeated = 0;
        let mut attack_level = 0;
        let mut shield_level = 0;

        for step in steps {
            match step {
                Step::Play(card) => { engine.play_card(card); }
                Step::Begin(card) => { engine.begin_card(card); }
                Step::ResolveEnemy => { engine.resolve_enemy_turn(); }
                Step::Upgrade(kind) => {
                    engine.apply_upgrade(kind);
                    defeated += 1;
                }
                Step::ResetRound => engine.reset_round(),
            }

            check_invariants(&engine);

            let p = engine.progression();
            prop_assert_eq!(p.enemies_defeated, defeated);
            prop_assert!(p.attack_upgrade_level >= attack_level);
            prop_assert!(p.shield_upgrade_level >= shield_level);
            attack_level = p.attack_upgrade_level;
            shield_level = p.shield_upgrade_level;
        }
    }

    #[test]
    fn non_terminal_play_changes_enemy_or_player(
        seed in any::<u64>(),
        card in card(),
        warmup in 0usize..6,
    ) {
        let mut engine = CombatEngine::new(seed);
        for _ in 0..warmup {
            engine.play_card(CardKind::Defense);
        }
        prop_assume!(!engine.is_round_over());

        let before = engine.round().clone();
        let report = engine.play_card(card);
        let after = engine.round();

        match card {
            CardKind::Attack => {
                let enemy_changed =
                    after.enemy_hp < before.enemy_hp || after.armor != before.armor;
                let absorbed_by_armor =
                    before.armor.is_penetrating() && report.card.damage_dealt() == 0;
                prop_assert!(enemy_changed || absorbed_by_armor);
            }
            CardKind::Defense => {
                let gained = match report.card.effect {
                    CardEffect::Defense { gained } => gained,
                    other => panic!("expected a defense effect, got {other:?}"),
                };
                prop_assert!((2..=4).contains(&gained));
            }
        }

        if !report.card.outcome.is_over() {
            let enemy = report.enemy.expect("enemy answers every non-terminal play");
            prop_assert!(enemy.roll.damage >= 1);
            let applied = enemy.absorption.absorbed + enemy.absorption.hp_lost;
            prop_assert!(applied == enemy.roll.damage || after.player_hp == 0);
        } else {
            prop_assert!(report.enemy.is_none());
        }
    }

    #[test]
    fn ignored_plays_leave_state_untouched(
        seed in any::<u64>(),
        cards in prop::collection::vec(card(), 1..20),
    ) {
        let mut engine = CombatEngine::new(seed);
        while !engine.is_round_over() {
            engine.play_card(CardKind::Attack);
        }
        let round = engine.round().clone();

        for card in cards {
            let report = engine.play_card(card);
            prop_assert!(report.card.is_ignored());
        }
        prop_assert_eq!(engine.round(), &round);
    }
}
