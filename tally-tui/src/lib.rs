//! Tally TUI library exports.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod presenter;
pub mod screens;
pub mod state;
pub mod theme;
pub mod traits;
pub mod views;
pub mod widgets;
pub mod wiring;
