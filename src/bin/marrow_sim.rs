//! Headless session runner.
//!
//! Plays whole sessions with a simple card policy and reports how far each
//! one got. Useful for balance checks on `CombatConfig` changes.

use clap::{Parser, ValueEnum};
use serde::Serialize;

use marrow_duel::{CardKind, CombatConfig, CombatEngine, GameRng, Result, RoundOutcome, UpgradeKind};

/// Cards held at once; the played slot is refilled from the engine's preview.
const HAND_SIZE: usize = 4;

/// A round still running after this many cards is a stalemate.
const MAX_CARDS_PER_ROUND: u32 = 1000;

/// Headless runner - plays sessions until defeat and reports rounds reached
#[derive(Parser, Debug)]
#[command(name = "marrow-sim")]
#[command(about = "Play marrow-duel sessions headlessly and report rounds reached")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sessions to play
    #[arg(long, default_value_t = 10)]
    sessions: u32,

    /// Upgrade taken after every victory; rotates through all four when omitted
    #[arg(long, value_enum)]
    upgrade: Option<UpgradeArg>,

    /// Start the next round before applying the upgrade
    #[arg(long)]
    reset_first: bool,

    /// Stop a session after this many rounds
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UpgradeArg {
    Health,
    Defense,
    Attack,
    Shield,
}

impl From<UpgradeArg> for UpgradeKind {
    fn from(arg: UpgradeArg) -> Self {
        match arg {
            UpgradeArg::Health => UpgradeKind::Health,
            UpgradeArg::Defense => UpgradeKind::Defense,
            UpgradeArg::Attack => UpgradeKind::Attack,
            UpgradeArg::Shield => UpgradeKind::Shield,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct SessionResult {
    session: u32,
    seed: u64,
    enemies_defeated: u32,
    cards_played: u32,
    reached_round_cap: bool,
    stalled: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut root = GameRng::new(seed);

    tracing::info!(seed, sessions = args.sessions, "starting simulation");

    let mut results = Vec::new();
    for session in 0..args.sessions {
        let rng = root.fork();
        let session_seed = rng.seed();
        let mut engine = CombatEngine::with_rng(CombatConfig::default(), rng)?;
        results.push(play_session(&mut engine, session, session_seed, &args));
    }

    match args.format {
        Format::Json => match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("failed to encode results: {e}"),
        },
        Format::Text => {
            for r in &results {
                println!(
                    "session {:>3}  seed {:>20}  rounds reached {:>3}  cards {:>5}{}",
                    r.session,
                    r.seed,
                    r.enemies_defeated + 1,
                    r.cards_played,
                    if r.reached_round_cap {
                        "  (cap)"
                    } else if r.stalled {
                        "  (stalled)"
                    } else {
                        ""
                    }
                );
            }
            let total: u32 = results.iter().map(|r| r.enemies_defeated).sum();
            if !results.is_empty() {
                println!("mean enemies defeated: {:.2}", f64::from(total) / results.len() as f64);
            }
        }
    }

    Ok(())
}

fn play_session(engine: &mut CombatEngine, session: u32, seed: u64, args: &Args) -> SessionResult {
    let mut hand = [CardKind::Defense, CardKind::Defense, CardKind::Attack, CardKind::Attack];
    let mut cards_played = 0;
    let mut reached_round_cap = false;
    let mut stalled = false;

    loop {
        let mut round_cards = 0;
        while !engine.is_round_over() && round_cards < MAX_CARDS_PER_ROUND {
            let slot = choose_slot(engine, &hand);
            engine.play_card(hand[slot]);
            hand[slot] = engine.next_card();
            round_cards += 1;
        }
        cards_played += round_cards;

        if !engine.is_round_over() {
            tracing::warn!(session, round = engine.round_number(), "round stalled");
            stalled = true;
            break;
        }
        if engine.outcome() == RoundOutcome::Defeat {
            break;
        }
        if engine.round_number() >= args.max_rounds {
            reached_round_cap = true;
            break;
        }

        let upgrade = args.upgrade.map_or_else(
            || UpgradeKind::ALL[engine.enemies_defeated() as usize % UpgradeKind::ALL.len()],
            UpgradeKind::from,
        );
        if args.reset_first {
            engine.reset_round();
            engine.apply_upgrade(upgrade);
        } else {
            engine.advance_round(upgrade);
        }
    }

    SessionResult {
        session,
        seed,
        enemies_defeated: engine.enemies_defeated(),
        cards_played,
        reached_round_cap,
        stalled,
    }
}

/// Attack when armor needs breaking or defense covers the worst enemy hit,
/// otherwise defend when a defense card is in hand.
fn choose_slot(engine: &CombatEngine, hand: &[CardKind; HAND_SIZE]) -> usize {
    let find = |kind| hand.iter().position(|&card| card == kind);
    let (_, worst_hit) = engine.enemy_damage_range();

    let armor = engine.armor();
    let wants_attack =
        (armor.is_intact() && !armor.is_penetrating()) || engine.player_defense() >= worst_hit;

    let preferred = if wants_attack { CardKind::Attack } else { CardKind::Defense };
    find(preferred).unwrap_or(0)
}
