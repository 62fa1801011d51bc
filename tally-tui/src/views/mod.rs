//! View rendering dispatch.

pub mod detail;
pub mod help;
pub mod list;

use crate::nav::View;
use crate::state::App;
use crate::theme::{notification_color, screen_state_color};
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    list::render(f, app, layout[1]);
    render_footer(f, app, layout[2]);

    if app.help_visible {
        help::render(f, app, centered(f.size(), 60, 60));
    } else if app.navigator.current.is_some() {
        detail::render(f, app, centered(f.size(), 60, 50));
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(40)])
        .split(area);

    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .block(Block::default().title("Tally").borders(Borders::ALL))
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let user = app.current_user();
    let badge = if user.is_premium { "★" } else { "·" };
    let status = StatusIndicator {
        title: "Session",
        status: format!("{} {} | {}", badge, user.display_name, app.status_line()),
        style: Style::default().fg(screen_state_color(app.active_screen().state(), &app.theme)),
    };
    status.render(f, chunks[1]);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.last() {
        Some(note) => {
            let hint = if note.action.is_some() { "  [t] retry" } else { "" };
            (
                format!("{}{}", note.message, hint),
                Style::default().fg(notification_color(note.level, &app.theme)),
            )
        }
        None => (
            "j/k move • Enter open • r refresh • p premium • Tab switch • ? help • q quit"
                .to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
