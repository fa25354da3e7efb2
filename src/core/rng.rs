//! Deterministic random number generation for combat rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Create independent branches, one per simulated session
//! - **Serializable**: O(1) state capture and restore
//! - **Injectable**: The engine draws through the [`CombatRng`] trait, so
//!   tests can script exact rolls with [`ScriptedRng`]
//!
//! ## Usage
//!
//! ```
//! use marrow_duel::core::{CombatRng, GameRng};
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork for an independent session
//! let mut session_rng = rng.fork();
//!
//! let roll = session_rng.below(3);
//! assert!(roll < 3);
//!
//! // Forks are deterministic: same seed, same fork counter, same sequence
//! let mut rng2 = GameRng::new(42);
//! let mut session_rng2 = rng2.fork();
//! assert_eq!(session_rng2.below(3), roll);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness for the combat engine.
///
/// Every roll the engine makes is expressed with these two primitives, so a
/// deterministic implementation fully determines a session.
pub trait CombatRng {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: u32) -> u32;

    /// Returns true with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl CombatRng for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.inner.gen_range(0..bound)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// RNG that replays queued values before falling back to a seeded stream.
///
/// Floats and integers are queued separately: `next_f64` pops from the float
/// queue, `below` pops from the integer queue. Queued integers are clamped
/// into `0..bound`.
///
/// ```
/// use marrow_duel::core::{CombatRng, ScriptedRng};
///
/// let mut rng = ScriptedRng::new(7).with_f64s([0.25]).with_ints([2]);
/// assert_eq!(rng.next_f64(), 0.25);
/// assert_eq!(rng.below(3), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    ints: VecDeque<u32>,
    fallback: GameRng,
}

impl ScriptedRng {
    /// Create an empty script over a seeded fallback stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            floats: VecDeque::new(),
            ints: VecDeque::new(),
            fallback: GameRng::new(seed),
        }
    }

    /// Queue float draws.
    #[must_use]
    pub fn with_f64s(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Queue integer draws.
    #[must_use]
    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Queue a single float draw.
    pub fn push_f64(&mut self, value: f64) {
        self.floats.push_back(value);
    }

    /// Queue a single integer draw.
    pub fn push_int(&mut self, value: u32) {
        self.ints.push_back(value);
    }

    /// Number of scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.floats.len() + self.ints.len()
    }
}

impl CombatRng for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        match self.floats.pop_front() {
            Some(value) => value,
            None => self.fallback.next_f64(),
        }
    }

    fn below(&mut self, bound: u32) -> u32 {
        match self.ints.pop_front() {
            Some(value) => value.min(bound.saturating_sub(1)),
            None => self.fallback.below(bound),
        }
    }
}
