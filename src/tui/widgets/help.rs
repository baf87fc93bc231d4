//! Help popup listing all keybindings.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{Styles, centered_rect};

const BINDINGS: &[(&str, &str)] = &[
    ("1-8 / Tab", "switch view"),
    ("/", "search (applied after a short pause)"),
    ("s", "sort by next column"),
    ("d", "toggle sort direction"),
    ("← / →", "previous / next page"),
    ("↑ / ↓", "move row cursor"),
    ("Enter", "record details"),
    ("a", "add record"),
    ("e", "edit record"),
    ("x / Del", "delete record (asks first)"),
    ("u", "cycle status (sales, invoices, returns)"),
    ("r", "reload current view"),
    ("c", "export current view to CSV"),
    ("?", "this help"),
    ("q", "quit (asks first)"),
];

pub fn render_help(frame: &mut Frame, area: Rect, scroll: usize) {
    let height = (BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(area, 55, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let visible = inner.height as usize;
    let scroll = scroll.min(BINDINGS.len().saturating_sub(visible));

    let content: Vec<Line> = BINDINGS
        .iter()
        .skip(scroll)
        .take(visible)
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), Styles::warning()),
                Span::styled(*action, Styles::default()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(content), inner);
}
