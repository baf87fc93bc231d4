//! Main rendering logic.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AppState, InputMode, PopupState, View};
use super::widgets::{
    Styles, render_detail, render_form, render_header, render_help, render_modal,
    render_reports, render_table, render_toasts,
};

/// Main render function. Popups render last so they overlay the content;
/// toasts render above everything.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(5),   // Content
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);

    match state.table_view() {
        Some(view) => {
            let title = table_title(state);
            render_table(frame, chunks[1], &view, &title);
        }
        None => render_reports(
            frame,
            chunks[1],
            state.reports.as_ref(),
            state.loading.is_visible(),
        ),
    }

    render_footer(frame, chunks[2], state);

    match &state.popup {
        PopupState::Help { scroll } => render_help(frame, area, *scroll),
        PopupState::Detail {
            title,
            lines,
            scroll,
        } => render_detail(frame, area, title, lines, *scroll),
        PopupState::None => {}
    }

    if let Some(active) = &state.form {
        render_form(frame, area, &active.form);
    }

    if let Some(modal) = state.modal.active() {
        render_modal(frame, area, modal);
    }

    render_toasts(frame, area, &state.toasts);
}

fn table_title(state: &AppState) -> String {
    let term = state.current_search_term();
    if term.is_empty() {
        state.view.title().to_string()
    } else {
        format!("{} (filter: {})", state.view.title(), term)
    }
}

fn render_footer(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let line = match state.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled(" /", Styles::warning()),
            Span::styled(state.search_input.clone(), Styles::default()),
            Span::styled("▏", Styles::warning()),
            Span::styled("  Enter apply   Esc cancel", Styles::dim()),
        ]),
        InputMode::Form => Line::from(Span::styled(
            " editing — Enter save, Esc cancel",
            Styles::dim(),
        )),
        InputMode::Normal => {
            let hints = if state.view == View::Reports {
                " 1-8 views  r reload  ? help  q quit"
            } else {
                " 1-8 views  / search  s/d sort  ←→ pages  ↑↓ rows  a add  e edit  x del  u status  r reload  c csv  ? help  q quit"
            };
            Line::from(Span::styled(hints, Styles::dim()))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
