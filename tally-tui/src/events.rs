//! Event types for the TUI event loop.

use crate::controller::LoadCompletion;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// A background load finished.
    Loaded(Box<LoadCompletion>),
}
