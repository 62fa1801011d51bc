//! Renders presenter rows. Knows nothing about records.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::presenter::RowDescriptor;

#[derive(Debug, Clone)]
pub struct RowListStyle {
    pub title: Style,
    pub subtitle: Style,
    pub accessory: Style,
    pub disabled: Style,
    pub selected: Style,
}

pub struct RowList<'a> {
    pub title: String,
    pub rows: &'a [RowDescriptor],
    pub selected: Option<usize>,
    pub footer: Option<&'a str>,
    pub style: RowListStyle,
}

impl<'a> RowList<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let title_style = if row.selectable {
                    self.style.title
                } else {
                    self.style.disabled
                };
                let mut first = vec![Span::styled(row.title.clone(), title_style)];
                if let Some(accessory) = &row.accessory {
                    first.push(Span::raw("  "));
                    first.push(Span::styled(accessory.clone(), self.style.accessory));
                }
                ListItem::new(vec![
                    Line::from(first),
                    Line::from(Span::styled(format!("  {}", row.subtitle), self.style.subtitle)),
                ])
            })
            .collect();

        if let Some(footer) = self.footer {
            items.push(ListItem::new(Line::from(Span::styled(
                footer.to_string(),
                self.style.subtitle,
            ))));
        }

        let list = List::new(items)
            .block(Block::default().title(self.title.as_str()).borders(Borders::ALL))
            .highlight_style(self.style.selected.add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");

        let mut state = ListState::default();
        state.select(self.selected);
        f.render_stateful_widget(list, area, &mut state);
    }
}
