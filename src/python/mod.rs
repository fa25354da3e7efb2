//! Python bindings for the marrow-duel combat engine.
//!
//! # Quick Start
//!
//! ```python
//! import marrow_duel as md
//!
//! engine = md.CombatEngine(seed=42)
//! while not engine.round_over:
//!     engine.play_card(defense=engine.player_defense < 3)
//!
//! if not engine.player_defeated:
//!     engine.apply_upgrade(2)
//!     engine.reset_round()
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// marrow_duel: combat and progression engine for a turn-based card duel.
#[pymodule]
fn marrow_duel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCombatEngine>()?;
    m.add_class::<PyProgression>()?;
    Ok(())
}
