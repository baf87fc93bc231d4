//! Toast stack, rendered top-right above everything else.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::fmt::truncate;
use crate::overlay::{ToastManager, ToastPhase};

use super::Styles;

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 3;

pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastManager) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.width.saturating_sub(width);

    for (idx, toast) in toasts.live().iter().enumerate() {
        let y = 1 + (idx as u16) * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.height {
            break;
        }
        let rect = Rect::new(area.x + x, area.y + y, width, TOAST_HEIGHT);

        let style = match toast.phase {
            // Entering/leaving render dimmed as the transition frames.
            ToastPhase::Entering | ToastPhase::Leaving => Styles::dim(),
            ToastPhase::Visible => Styles::severity(toast.severity),
        };
        let block = Block::default()
            .title(format!(" {} ", toast.severity.label()))
            .borders(Borders::ALL)
            .border_style(style);
        let inner = block.inner(rect);
        frame.render_widget(Clear, rect);
        frame.render_widget(block, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                truncate(&toast.message, (width.saturating_sub(4)) as usize),
                style,
            ))),
            inner,
        );
    }
}
