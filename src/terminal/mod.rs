//! Terminal adapters for running a menu outside of a game.
//!
//! [`TerminalCanvas`] draws elements with ratatui, [`TerminalInput`] turns
//! crossterm key events into menu controls, and [`debug_log`] is the file
//! sink for the `log` facade.

mod canvas;
pub mod debug_log;
mod input;

pub use canvas::{REFERENCE_RESOLUTION, TerminalCanvas};
pub use input::{TerminalInput, control_for};
