//! Detail popup: all fields of the selected record, scrollable.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{Styles, centered_rect};

pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[(&'static str, String)],
    scroll: usize,
) {
    let height = (lines.len() as u16 + 4).clamp(7, area.height.saturating_sub(2));
    let popup_area = centered_rect(area, 60, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let visible = inner.height.saturating_sub(1) as usize;
    let scroll = scroll.min(lines.len().saturating_sub(visible));

    let mut content: Vec<Line> = lines
        .iter()
        .skip(scroll)
        .take(visible)
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Styles::dim()),
                Span::styled(value.clone(), Styles::default()),
            ])
        })
        .collect();
    content.push(Line::from(Span::styled(
        "Esc close   ↑/↓ scroll",
        Styles::dim(),
    )));

    frame.render_widget(Paragraph::new(content), inner);
}
