//! The combat engine session.
//!
//! [`CombatEngine`] owns the round state, the progression and the RNG. The
//! caller owns the engine; there is no global instance.

mod round;
mod session;
mod snapshot;

pub use round::RoundState;
pub use session::CombatEngine;
pub use snapshot::CombatSnapshot;
