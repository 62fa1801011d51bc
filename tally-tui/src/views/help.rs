//! Keybinding overlay.

use crate::state::App;
use crate::widgets::DetailPanel;
use ratatui::{layout::Rect, style::Style, Frame};

const BINDINGS: &[(&str, &str)] = &[
    ("j / ↓", "next row"),
    ("k / ↑", "previous row"),
    ("Enter", "open row"),
    ("Tab / 1-4", "switch view"),
    ("r", "refresh (bypasses cache)"),
    ("t", "retry failed load"),
    ("p", "toggle premium"),
    ("Esc", "close / dismiss"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut fields: Vec<(&str, String)> = BINDINGS
        .iter()
        .map(|(key, what)| (*key, what.to_string()))
        .collect();
    if let Ok(stats) = app.cache.stats() {
        fields.push((
            "cache",
            format!(
                "{} hits / {} misses / {} expired ({:.0}%)",
                stats.hits,
                stats.misses,
                stats.expirations,
                stats.hit_rate() * 100.0
            ),
        ));
    }

    let panel = DetailPanel {
        title: "Keybindings",
        fields,
        style: Style::default().fg(app.theme.primary),
        overlay: true,
    };
    panel.render(f, area);
}
