//! Centered form popup with inline validation messages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::form::FormState;

use super::{Styles, centered_rect};

pub fn render_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let height = (form.fields.len() as u16) * 2 + 4;
    let popup_area = centered_rect(area, 55, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focused;
        let marker = if focused { "› " } else { "  " };
        let value_style = if focused {
            Styles::accent()
        } else {
            Styles::default()
        };
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<14}", marker, field.spec.label), Styles::dim()),
            Span::styled(format!("{}{}", field.value, cursor), value_style),
        ]));
        // Inline validation message under the field it belongs to.
        match &field.error {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("                {}", error),
                Styles::error(),
            ))),
            None => lines.push(Line::from("")),
        }
    }
    lines.push(Line::from(vec![
        Span::styled("Enter", Styles::warning()),
        Span::styled(" save   ", Styles::dim()),
        Span::styled("Tab", Styles::warning()),
        Span::styled(" next field   ", Styles::dim()),
        Span::styled("Esc", Styles::warning()),
        Span::styled(" cancel", Styles::dim()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
