//! Input handling and keybindings.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{ApiCommand, Resource};
use crate::overlay::ConfirmOutcome;

use super::state::{AppState, InputMode, PendingAction, PopupState, View};

/// Result of handling a key event, executed by the app loop.
#[derive(Debug)]
pub enum Effect {
    /// No follow-up action.
    None,
    /// Quit the application.
    Quit,
    /// Load (or reload) a resource through the facade.
    Load(Resource),
    /// Dispatch a mutation through the facade.
    Mutate(ApiCommand),
    /// Export the active table view to CSV.
    Export,
}

/// Handles key input and updates state.
///
/// Priority: confirm modal, then form, then search input, then popups,
/// then normal-mode bindings.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Effect {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Effect::Quit;
    }
    if state.modal.is_active() {
        return handle_modal(state, key, now);
    }
    match state.input_mode {
        InputMode::Form => handle_form_mode(state, key),
        InputMode::Search => handle_search_mode(state, key, now),
        InputMode::Normal if state.popup.is_open() => handle_popup(state, key),
        InputMode::Normal => handle_normal_mode(state, key, now),
    }
}

fn handle_modal(state: &mut AppState, key: KeyEvent, now: Instant) -> Effect {
    let outcome = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => ConfirmOutcome::Confirmed,
        KeyCode::Char('n') | KeyCode::Char('N') => ConfirmOutcome::Cancelled,
        KeyCode::Esc => ConfirmOutcome::Dismissed,
        _ => return Effect::None,
    };
    match state.modal.resolve(outcome, now) {
        Some((PendingAction::Quit, true)) => Effect::Quit,
        Some((PendingAction::Delete(resource, id), true)) => {
            Effect::Mutate(delete_command(resource, id))
        }
        _ => Effect::None,
    }
}

fn delete_command(resource: Resource, id: u64) -> ApiCommand {
    match resource {
        Resource::Sales => ApiCommand::DeleteSale(id),
        Resource::Products => ApiCommand::DeleteProduct(id),
        Resource::Customers => ApiCommand::DeleteCustomer(id),
        Resource::Suppliers => ApiCommand::DeleteSupplier(id),
        Resource::Invoices => ApiCommand::DeleteInvoice(id),
        Resource::Expenses => ApiCommand::DeleteExpense(id),
        Resource::Returns => ApiCommand::DeleteReturn(id),
        // Reports hold no records; nothing to delete.
        Resource::Reports => ApiCommand::LoadReports,
    }
}

fn handle_form_mode(state: &mut AppState, key: KeyEvent) -> Effect {
    let Some(active) = state.form.as_mut() else {
        state.input_mode = InputMode::Normal;
        return Effect::None;
    };
    match key.code {
        KeyCode::Esc => {
            state.form = None;
            state.input_mode = InputMode::Normal;
            Effect::None
        }
        KeyCode::Tab | KeyCode::Down => {
            active.form.focus_next();
            Effect::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            active.form.focus_prev();
            Effect::None
        }
        KeyCode::Backspace => {
            active.form.backspace();
            Effect::None
        }
        KeyCode::Enter => {
            if active.form.validate() {
                let command = state
                    .form
                    .take()
                    .and_then(|active| state.form_command(&active));
                state.input_mode = InputMode::Normal;
                match command {
                    Some(command) => Effect::Mutate(command),
                    None => Effect::None,
                }
            } else {
                // Validation errors render inline; the form stays open.
                Effect::None
            }
        }
        KeyCode::Char(c) => {
            active.form.insert_char(c);
            Effect::None
        }
        _ => Effect::None,
    }
}

fn handle_search_mode(state: &mut AppState, key: KeyEvent, now: Instant) -> Effect {
    match key.code {
        KeyCode::Esc => {
            // Discard the pending edit, keep the applied term.
            state.search_input = state.current_search_term().to_string();
            state.search_dirty_at = None;
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            state.apply_search();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            state.search_dirty_at = Some(now);
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            state.search_dirty_at = Some(now);
        }
        _ => {}
    }
    Effect::None
}

fn handle_popup(state: &mut AppState, key: KeyEvent) -> Effect {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            state.popup = PopupState::None;
        }
        KeyCode::Up | KeyCode::Char('k') => popup_scroll(state, -1),
        KeyCode::Down | KeyCode::Char('j') => popup_scroll(state, 1),
        _ => {}
    }
    Effect::None
}

fn popup_scroll(state: &mut AppState, delta: i64) {
    if let PopupState::Help { scroll } | PopupState::Detail { scroll, .. } = &mut state.popup {
        *scroll = if delta < 0 {
            scroll.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            scroll.saturating_add(delta as usize)
        };
    }
}

fn handle_normal_mode(state: &mut AppState, key: KeyEvent, now: Instant) -> Effect {
    match key.code {
        KeyCode::Char('q') => {
            state
                .modal
                .confirm("Are you sure you want to quit?", "Exit tilltop", PendingAction::Quit);
            Effect::None
        }
        KeyCode::Char('?') => {
            state.popup = PopupState::Help { scroll: 0 };
            Effect::None
        }
        KeyCode::Tab => {
            state.switch_view(state.view.next());
            Effect::Load(state.view.resource())
        }
        KeyCode::BackTab => {
            state.switch_view(state.view.prev());
            Effect::Load(state.view.resource())
        }
        KeyCode::Char(c @ '1'..='8') => {
            let index = (c as usize) - ('1' as usize);
            let new_view = View::all()[index];
            if new_view != state.view {
                state.switch_view(new_view);
                Effect::Load(state.view.resource())
            } else {
                Effect::None
            }
        }
        KeyCode::Char('/') if state.view != View::Reports => {
            state.input_mode = InputMode::Search;
            Effect::None
        }
        KeyCode::Char('s') => {
            state.sort_next_column();
            Effect::None
        }
        KeyCode::Char('d') => {
            state.toggle_sort_direction();
            Effect::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.prev_page();
            Effect::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.next_page();
            Effect::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_up();
            Effect::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_down();
            Effect::None
        }
        KeyCode::Enter => {
            if let Some((title, lines)) = state.detail_for_selection() {
                state.popup = PopupState::Detail {
                    title,
                    lines,
                    scroll: 0,
                };
            }
            Effect::None
        }
        KeyCode::Char('a') => {
            if let Some(form) = state.blank_form() {
                state.form = Some(form);
                state.input_mode = InputMode::Form;
            }
            Effect::None
        }
        KeyCode::Char('e') => {
            match state.edit_form_for_selection() {
                Some(form) => {
                    state.form = Some(form);
                    state.input_mode = InputMode::Form;
                }
                None if matches!(state.view, View::Sales | View::Returns) => {
                    state
                        .toasts
                        .warning("Recorded entries can't be edited; use status or delete", now);
                }
                None => {}
            }
            Effect::None
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some((action, question)) = state.delete_action() {
                state.modal.confirm(question, "Confirm delete", action);
            }
            Effect::None
        }
        KeyCode::Char('u') => match state.status_cycle_command() {
            Some(command) => Effect::Mutate(command),
            None => Effect::None,
        },
        KeyCode::Char('r') => Effect::Load(state.view.resource()),
        KeyCode::Char('c') if state.view != View::Reports => Effect::Export,
        _ => Effect::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_dataset;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        let mut state = AppState::new("mock".to_string());
        let ds = sample_dataset();
        state.sales.update_data(ds.sales);
        state.products.update_data(ds.products);
        state
    }

    #[test]
    fn quit_requires_confirmation() {
        let now = Instant::now();
        let mut s = state();
        assert!(matches!(
            handle_key(&mut s, key(KeyCode::Char('q')), now),
            Effect::None
        ));
        assert!(s.modal.is_active());

        // 'n' cancels and nothing happens.
        assert!(matches!(
            handle_key(&mut s, key(KeyCode::Char('n')), now),
            Effect::None
        ));
        assert!(!s.modal.is_active());

        // 'y' after reopening quits.
        handle_key(&mut s, key(KeyCode::Char('q')), now);
        assert!(matches!(
            handle_key(&mut s, key(KeyCode::Char('y')), now),
            Effect::Quit
        ));
    }

    #[test]
    fn delete_flows_through_the_confirm_modal() {
        let now = Instant::now();
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('x')), now);
        assert!(s.modal.is_active());

        let effect = handle_key(&mut s, key(KeyCode::Enter), now);
        assert!(matches!(effect, Effect::Mutate(ApiCommand::DeleteSale(1))));
    }

    #[test]
    fn escape_dismisses_a_closable_confirm_without_firing() {
        let now = Instant::now();
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('x')), now);
        let effect = handle_key(&mut s, key(KeyCode::Esc), now);
        assert!(matches!(effect, Effect::None));
        assert!(!s.modal.is_active());
    }

    #[test]
    fn search_keystrokes_set_the_debounce_marker() {
        let now = Instant::now();
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('/')), now);
        assert_eq!(s.input_mode, InputMode::Search);

        handle_key(&mut s, key(KeyCode::Char('c')), now);
        assert_eq!(s.search_input, "c");
        assert!(s.search_dirty_at.is_some());
        // Not applied yet — the quiet period hasn't elapsed.
        assert_eq!(s.sales.search_term(), "");

        // Enter applies immediately.
        handle_key(&mut s, key(KeyCode::Enter), now);
        assert_eq!(s.sales.search_term(), "c");
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn escape_discards_the_pending_search_edit() {
        let now = Instant::now();
        let mut s = state();
        s.search_input = "kept".to_string();
        s.apply_search();

        handle_key(&mut s, key(KeyCode::Char('/')), now);
        handle_key(&mut s, key(KeyCode::Char('x')), now);
        handle_key(&mut s, key(KeyCode::Esc), now);

        assert_eq!(s.sales.search_term(), "kept");
        assert_eq!(s.search_input, "kept");
        assert!(s.search_dirty_at.is_none());
    }

    #[test]
    fn tab_switches_view_and_loads_it() {
        let now = Instant::now();
        let mut s = state();
        let effect = handle_key(&mut s, key(KeyCode::Tab), now);
        assert_eq!(s.view, View::Inventory);
        assert!(matches!(effect, Effect::Load(Resource::Products)));
    }

    #[test]
    fn sort_keys_drive_the_active_table() {
        let now = Instant::now();
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('s')), now);
        assert_eq!(s.sales.sort_column(), Some(0));
        assert!(s.sales.sort_ascending());
        handle_key(&mut s, key(KeyCode::Char('d')), now);
        assert!(!s.sales.sort_ascending());
    }

    #[test]
    fn status_cycle_emits_a_mutation() {
        let now = Instant::now();
        let mut s = state();
        let effect = handle_key(&mut s, key(KeyCode::Char('u')), now);
        assert!(matches!(
            effect,
            Effect::Mutate(ApiCommand::UpdateSaleStatus(1, _))
        ));
    }

    #[test]
    fn form_submit_validates_before_dispatching() {
        let now = Instant::now();
        let mut s = state();
        s.switch_view(View::Inventory);
        handle_key(&mut s, key(KeyCode::Char('a')), now);
        assert_eq!(s.input_mode, InputMode::Form);

        // Empty required fields: Enter keeps the form open.
        let effect = handle_key(&mut s, key(KeyCode::Enter), now);
        assert!(matches!(effect, Effect::None));
        assert!(s.form.is_some());
        assert!(
            s.form.as_ref().unwrap().form.fields[0].error.is_some(),
            "first failing message should be recorded"
        );

        // Esc abandons the form.
        handle_key(&mut s, key(KeyCode::Esc), now);
        assert!(s.form.is_none());
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn detail_popup_opens_on_enter_and_closes_on_escape() {
        let now = Instant::now();
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Enter), now);
        assert!(matches!(s.popup, PopupState::Detail { .. }));
        handle_key(&mut s, key(KeyCode::Esc), now);
        assert!(matches!(s.popup, PopupState::None));
    }
}
