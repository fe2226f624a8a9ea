//! San Andreas style list menus for in-game overlays.
//!
//! The [`menu::Menu`] keeps the selection, layout and open/close state of a
//! list menu. Everything that touches the host goes through small traits:
//! [`element::Canvas`] for drawing, [`input::InputSource`] for controls and
//! [`screen::SafeZone`] for safe zone conversion. The [`terminal`] module
//! provides implementations of those for running a menu in a terminal.

pub mod config;
pub mod element;
pub mod event;
pub mod input;
pub mod menu;
pub mod screen;
pub mod terminal;

pub use menu::{Container, ItemId, Menu, MenuError, MenuItem, MenuPool};
