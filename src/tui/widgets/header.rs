//! Header line: app name, backend, view tabs and the loading indicator.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, View};

use super::Styles;

pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(" tilltop ", Styles::accent()),
        Span::styled(format!("[{}] ", state.backend), Styles::dim()),
    ];

    for (idx, view) in View::all().iter().enumerate() {
        let label = format!(" {}:{} ", idx + 1, view.title());
        if *view == state.view {
            spans.push(Span::styled(label, Styles::active_tab()));
        } else {
            spans.push(Span::styled(label, Styles::dim()));
        }
    }

    if state.loading.is_visible() {
        spans.push(Span::styled(" ⟳ loading… ", Styles::warning()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
