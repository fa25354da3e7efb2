//! The combat engine: one mutable session owned by the caller.

use tracing::{debug, info};

use super::round::RoundState;
use crate::combat::{
    absorb, resolve_hit, roll_attack, roll_defense_gain, roll_enemy_attack, ArmorState, CardEffect,
    CardPlay, EnemyAttack, EnemyScaling, RoundOutcome, TurnReport,
};
use crate::core::{CardKind, CombatConfig, CombatRng, GameRng, Result};
use crate::progression::{Progression, UpgradeKind};

/// Combat and progression state machine.
///
/// ## Lifecycle
///
/// - Construction starts progression from the config and starts round one.
/// - [`play_card`](Self::play_card) resolves the player's card and one enemy
///   counter-attack, or use [`begin_card`](Self::begin_card) and
///   [`resolve_enemy_turn`](Self::resolve_enemy_turn) to stagger them.
/// - On victory the caller picks an upgrade with
///   [`apply_upgrade`](Self::apply_upgrade) and starts the next round with
///   [`reset_round`](Self::reset_round), or does both with
///   [`advance_round`](Self::advance_round).
/// - On defeat, [`enemies_defeated`](Self::enemies_defeated) is the score and
///   [`reset_progression`](Self::reset_progression) restarts the session.
///
/// ## Example
///
/// ```
/// use marrow_duel::{CardKind, CombatEngine, RoundOutcome, UpgradeKind};
///
/// let mut engine = CombatEngine::new(42);
/// assert_eq!(engine.enemy_hp(), 15);
///
/// while !engine.is_round_over() {
///     engine.play_card(CardKind::Attack);
/// }
///
/// if engine.outcome() == RoundOutcome::Victory {
///     engine.advance_round(UpgradeKind::Attack);
///     assert_eq!(engine.enemies_defeated(), 1);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CombatEngine<R: CombatRng = GameRng> {
    pub(super) config: CombatConfig,
    pub(super) progression: Progression,
    pub(super) round: RoundState,
    pub(super) rng: R,
}

impl CombatEngine<GameRng> {
    /// Create an engine with the default configuration and a seeded RNG.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::start(CombatConfig::default(), GameRng::new(seed))
    }
}

impl<R: CombatRng> CombatEngine<R> {
    /// Create an engine with an explicit configuration and RNG.
    pub fn with_rng(config: CombatConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    /// Build a session from an already validated configuration.
    fn start(config: CombatConfig, mut rng: R) -> Self {
        let progression = Progression::new(&config);
        let round = RoundState::start(&progression, &config, &mut rng);
        info!(enemy = %round.enemy_name, enemy_hp = round.enemy_hp, "session started");
        Self {
            config,
            progression,
            round,
            rng,
        }
    }

    // === Transitions ===

    /// Start a new round from the current progression.
    ///
    /// Refills player HP and defense, spawns a freshly scaled enemy, clears
    /// the terminal flags and any pending enemy turn, and draws a new card
    /// preview. Progression is untouched.
    pub fn reset_round(&mut self) {
        self.round = RoundState::start(&self.progression, &self.config, &mut self.rng);
        info!(
            round = self.round_number(),
            enemy = %self.round.enemy_name,
            enemy_hp = self.round.enemy_hp,
            armor = ?self.round.armor,
            damage_bonus = self.round.scaling.damage_bonus,
            player_hp = self.round.player_hp,
            player_defense = self.round.player_defense,
            "round started"
        );
    }

    /// Discard all progression and start over from round one.
    pub fn reset_progression(&mut self) {
        self.progression = Progression::new(&self.config);
        info!("progression reset");
        self.reset_round();
    }

    /// Play a card and resolve the enemy's counter-attack.
    ///
    /// A no-op when the round is already over.
    pub fn play_card(&mut self, card: CardKind) -> TurnReport {
        let card = self.begin_card(card);
        let enemy = self.resolve_enemy_turn();
        TurnReport { card, enemy }
    }

    /// Resolve the player's card only.
    ///
    /// When the round continues, an enemy turn becomes pending and must be
    /// resolved with [`resolve_enemy_turn`](Self::resolve_enemy_turn). If a
    /// previous enemy turn is still pending it is resolved first, so every
    /// card play is answered by exactly one enemy turn.
    pub fn begin_card(&mut self, card: CardKind) -> CardPlay {
        if self.round.enemy_turn_pending {
            self.resolve_enemy_turn();
        }
        if self.round.outcome.is_over() {
            return CardPlay::ignored(card, self.round.next_card, self.round.outcome);
        }

        let effect = match card {
            CardKind::Defense => self.play_defense(),
            CardKind::Attack => self.play_attack(),
        };

        self.round.next_card = CardKind::draw(&mut self.rng, self.config.attack_card_chance);
        self.round.enemy_turn_pending = !self.round.outcome.is_over();

        CardPlay {
            card,
            effect,
            next_card: self.round.next_card,
            enemy_turn_pending: self.round.enemy_turn_pending,
            outcome: self.round.outcome,
        }
    }

    /// Resolve the pending enemy counter-attack, if any.
    ///
    /// Returns `None` when no card is awaiting an answer or the round is over.
    pub fn resolve_enemy_turn(&mut self) -> Option<EnemyAttack> {
        if !std::mem::take(&mut self.round.enemy_turn_pending) || self.round.outcome.is_over() {
            return None;
        }

        let roll = roll_enemy_attack(
            &mut self.rng,
            self.round.scaling.damage_range(&self.config),
            self.config.enemy_crit_chance,
            self.config.enemy_crit_multiplier,
        );
        let absorption =
            absorb(roll.damage, &mut self.round.player_defense, &mut self.round.player_hp);

        debug!(
            damage = roll.damage,
            critical = roll.critical,
            absorbed = absorption.absorbed,
            hp_lost = absorption.hp_lost,
            player_hp = self.round.player_hp,
            player_defense = self.round.player_defense,
            "enemy attack"
        );

        if self.round.player_hp == 0 {
            self.round.outcome = RoundOutcome::Defeat;
            info!(score = self.progression.enemies_defeated, "player defeated");
        }

        Some(EnemyAttack {
            roll,
            absorption,
            outcome: self.round.outcome,
        })
    }

    /// Count the current enemy as defeated and apply an upgrade.
    ///
    /// Health and Defense upgrades also refresh the matching counter of the
    /// current round, unless the player has been defeated. The round is not
    /// reset; call [`reset_round`](Self::reset_round) or use
    /// [`advance_round`](Self::advance_round).
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) {
        self.progression.apply(kind, &self.config);

        if self.round.outcome != RoundOutcome::Defeat {
            match kind {
                UpgradeKind::Health => {
                    self.round.player_hp = self.progression.base_player_max_hp;
                }
                UpgradeKind::Defense => {
                    self.round.player_defense = self.progression.base_player_defense;
                }
                UpgradeKind::Attack | UpgradeKind::Shield => {}
            }
        }

        info!(
            upgrade = %kind,
            enemies_defeated = self.progression.enemies_defeated,
            max_hp = self.progression.base_player_max_hp,
            base_defense = self.progression.base_player_defense,
            damage_max = self.progression.max_damage,
            defense_min = self.progression.min_defense_gain,
            defense_max = self.progression.max_defense_gain,
            "upgrade applied"
        );
    }

    /// Apply an upgrade chosen by menu index (0 = Health .. 3 = Shield).
    ///
    /// Fails without touching any state when the index is unknown.
    pub fn apply_upgrade_index(&mut self, index: u8) -> Result<()> {
        let kind = UpgradeKind::try_from(index)?;
        self.apply_upgrade(kind);
        Ok(())
    }

    /// Apply an upgrade, then start the next round with the new scaling.
    pub fn advance_round(&mut self, kind: UpgradeKind) {
        self.apply_upgrade(kind);
        self.reset_round();
    }

    // === Card resolution ===

    fn play_defense(&mut self) -> CardEffect {
        let gained = roll_defense_gain(&mut self.rng, self.progression.min_defense_gain);
        self.round.player_defense = self.round.player_defense.saturating_add(gained);
        debug!(gained, player_defense = self.round.player_defense, "defense card");
        CardEffect::Defense { gained }
    }

    fn play_attack(&mut self) -> CardEffect {
        let roll = roll_attack(
            &mut self.rng,
            self.progression.min_damage,
            self.progression.max_damage,
            self.config.player_crit_chance,
            self.config.player_crit_multiplier,
        );
        let (hit, armor) = resolve_hit(self.round.armor, roll.damage);
        self.round.armor = armor;
        self.round.enemy_hp = self.round.enemy_hp.saturating_sub(hit.dealt());

        debug!(
            damage = roll.damage,
            critical = roll.critical,
            hit = ?hit,
            enemy_hp = self.round.enemy_hp,
            "attack card"
        );

        if self.round.enemy_hp == 0 {
            self.round.outcome = RoundOutcome::Victory;
            info!(round = self.round_number(), enemy = %self.round.enemy_name, "enemy defeated");
        }

        CardEffect::Attack { roll, hit }
    }

    // === Accessors ===

    #[must_use]
    pub fn player_hp(&self) -> u32 {
        self.round.player_hp
    }

    #[must_use]
    pub fn player_defense(&self) -> u32 {
        self.round.player_defense
    }

    #[must_use]
    pub fn enemy_hp(&self) -> u32 {
        self.round.enemy_hp
    }

    #[must_use]
    pub fn enemy_max_hp(&self) -> u32 {
        self.round.scaling.max_hp
    }

    #[must_use]
    pub fn enemy_name(&self) -> &str {
        &self.round.enemy_name
    }

    /// Current armor, including whether it has been broken this round.
    #[must_use]
    pub fn armor(&self) -> ArmorState {
        self.round.armor
    }

    /// Scaling the current enemy was spawned with.
    #[must_use]
    pub fn scaling(&self) -> EnemyScaling {
        self.round.scaling
    }

    /// Inclusive bounds of the current enemy's damage roll.
    #[must_use]
    pub fn enemy_damage_range(&self) -> (u32, u32) {
        self.round.scaling.damage_range(&self.config)
    }

    #[must_use]
    pub fn next_card(&self) -> CardKind {
        self.round.next_card
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.round.outcome
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.round.outcome.is_over()
    }

    #[must_use]
    pub fn is_player_defeated(&self) -> bool {
        self.round.outcome == RoundOutcome::Defeat
    }

    #[must_use]
    pub fn has_pending_enemy_turn(&self) -> bool {
        self.round.enemy_turn_pending
    }

    /// Enemies defeated this session; the final score on defeat.
    #[must_use]
    pub fn enemies_defeated(&self) -> u32 {
        self.progression.enemies_defeated
    }

    /// One-based number of the round being fought.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.progression.enemies_defeated.saturating_add(1)
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Mutable access to the RNG, e.g. to queue scripted rolls.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
