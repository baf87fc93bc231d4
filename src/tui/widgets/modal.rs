//! Centered modal dialog.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::overlay::{Modal, ModalKind};
use crate::tui::state::PendingAction;

use super::{Styles, centered_rect};

pub fn render_modal(frame: &mut Frame, area: Rect, modal: &Modal<PendingAction>) {
    let popup_area = centered_rect(area, 50, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let hints = match modal.kind {
        ModalKind::Confirm { .. } => Line::from(vec![
            Span::styled("y", Styles::warning()),
            Span::styled("/", Styles::dim()),
            Span::styled("Enter", Styles::warning()),
            Span::styled(" → yes   ", Styles::dim()),
            Span::styled("n", Styles::warning()),
            Span::styled("/", Styles::dim()),
            Span::styled("Esc", Styles::warning()),
            Span::styled(" → no", Styles::dim()),
        ]),
        ModalKind::Info => Line::from(vec![
            Span::styled("Esc", Styles::warning()),
            Span::styled(" → close", Styles::dim()),
        ]),
    };

    let content = vec![
        Line::from(Span::styled(modal.body.clone(), Styles::default())),
        Line::from(""),
        hints,
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        inner,
    );
}
