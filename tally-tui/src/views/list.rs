//! The list body shared by every view.

use crate::controller::ScreenState;
use crate::state::App;
use crate::widgets::{RowList, RowListStyle};
use ratatui::{layout::Rect, style::Style, Frame};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let screen = app.active_screen();
    let presenter = screen.presenter();

    let footer = match screen.state() {
        ScreenState::Idle if presenter.is_empty() => Some("Not loaded yet."),
        ScreenState::Loading if presenter.is_empty() => Some("Loading…"),
        ScreenState::Failed { .. } if presenter.is_empty() => Some("Could not load. Press t to retry."),
        ScreenState::Loaded if presenter.is_empty() => Some("Nothing here."),
        _ if screen.is_loading_more() => Some("Loading more…"),
        _ => None,
    };

    let title = match screen.loaded_at() {
        Some(at) => format!(
            "{} ({}) as of {}",
            screen.view().title(),
            presenter.len(),
            at.with_timezone(&chrono::Local).format("%H:%M:%S")
        ),
        None => screen.view().title().to_string(),
    };

    let list = RowList {
        title,
        rows: presenter.rows(),
        selected: presenter.cursor(),
        footer,
        style: RowListStyle {
            title: Style::default().fg(app.theme.text),
            subtitle: Style::default().fg(app.theme.text_dim),
            accessory: Style::default().fg(app.theme.secondary),
            disabled: Style::default().fg(app.theme.border),
            selected: Style::default()
                .fg(app.theme.primary)
                .bg(app.theme.highlight_bg),
        },
    };
    list.render(f, area);
}
