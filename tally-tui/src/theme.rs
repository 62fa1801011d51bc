//! Colors and color mappings.

use crate::controller::ScreenState;
use crate::notifications::NotificationLevel;
use ratatui::style::Color;
use tally_core::TransferDirection;

#[derive(Debug, Clone)]
pub struct TallyTheme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub highlight_bg: Color,
    pub border: Color,
}

impl Default for TallyTheme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            highlight_bg: Color::Rgb(42, 42, 42),
            border: Color::Rgb(68, 68, 68),
        }
    }
}

pub fn screen_state_color(state: &ScreenState, theme: &TallyTheme) -> Color {
    match state {
        ScreenState::Idle => theme.text_dim,
        ScreenState::Loading => theme.warning,
        ScreenState::Loaded => theme.success,
        ScreenState::Failed { .. } => theme.error,
    }
}

pub fn transfer_direction_color(direction: TransferDirection, theme: &TallyTheme) -> Color {
    match direction {
        TransferDirection::Sent => theme.secondary,
        TransferDirection::Received => theme.success,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &TallyTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}
