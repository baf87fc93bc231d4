//! Modal dialogs: at most one active at a time.
//!
//! Confirmation modals carry an action payload of type `A`; resolving the
//! modal hands exactly one `(action, bool)` outcome back to the dispatch
//! loop. Showing a modal while another is active supersedes it.

use std::time::{Duration, Instant};

/// Closing transition before the slot frees up.
const CLOSE_DELAY: Duration = Duration::from_millis(150);

/// How a confirmation modal was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Affirmative action.
    Confirmed,
    /// Explicit negative action.
    Cancelled,
    /// Escape or other out-of-band close path.
    Dismissed,
}

#[derive(Debug)]
pub enum ModalKind<A> {
    /// Informational; any close path just hides it.
    Info,
    /// Yes/no question carrying the action to fire on resolution.
    Confirm { action: A },
}

#[derive(Debug)]
pub struct Modal<A> {
    pub title: String,
    pub body: String,
    pub kind: ModalKind<A>,
    /// When false, Escape and other dismissal paths are ignored.
    pub closable: bool,
}

/// Single-slot modal manager: `none-active → shown → resolved → closing →
/// none-active`.
#[derive(Debug)]
pub struct ModalManager<A> {
    current: Option<Modal<A>>,
    closing_until: Option<Instant>,
}

impl<A> Default for ModalManager<A> {
    fn default() -> Self {
        Self {
            current: None,
            closing_until: None,
        }
    }
}

impl<A> ModalManager<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a modal, superseding any active one.
    pub fn show(&mut self, modal: Modal<A>) {
        self.current = Some(modal);
        self.closing_until = None;
    }

    pub fn info(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.show(Modal {
            title: title.into(),
            body: body.into(),
            kind: ModalKind::Info,
            closable: true,
        });
    }

    /// Opens a closable yes/no modal carrying `action`.
    pub fn confirm(
        &mut self,
        message: impl Into<String>,
        title: impl Into<String>,
        action: A,
    ) {
        self.show(Modal {
            title: title.into(),
            body: message.into(),
            kind: ModalKind::Confirm { action },
            closable: true,
        });
    }

    /// Resolves the active modal.
    ///
    /// For a confirmation modal, returns the carried action together with
    /// `true` on [`ConfirmOutcome::Confirmed`] and `false` otherwise —
    /// exactly once. [`ConfirmOutcome::Dismissed`] is ignored for a
    /// non-closable modal. Info modals close and return `None`.
    pub fn resolve(&mut self, outcome: ConfirmOutcome, now: Instant) -> Option<(A, bool)> {
        let closable = self.current.as_ref().map(|m| m.closable).unwrap_or(false);
        if outcome == ConfirmOutcome::Dismissed && !closable {
            return None;
        }
        let modal = self.current.take()?;
        self.closing_until = Some(now + CLOSE_DELAY);
        match modal.kind {
            ModalKind::Info => None,
            ModalKind::Confirm { action } => {
                Some((action, outcome == ConfirmOutcome::Confirmed))
            }
        }
    }

    /// Force-closes the active modal, dropping any carried action.
    pub fn hide(&mut self, now: Instant) {
        if self.current.take().is_some() {
            self.closing_until = Some(now + CLOSE_DELAY);
        }
    }

    /// Clears the closing transition once it has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.closing_until
            && now >= until
        {
            self.closing_until = None;
        }
    }

    pub fn active(&self) -> Option<&Modal<A>> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Delete(u64),
    }

    #[test]
    fn confirm_resolves_true_on_affirmative() {
        let now = Instant::now();
        let mut m = ModalManager::new();
        m.confirm("Delete?", "Confirm", Action::Delete(7));
        assert!(m.is_active());

        let outcome = m.resolve(ConfirmOutcome::Confirmed, now);
        assert_eq!(outcome, Some((Action::Delete(7), true)));
        assert!(!m.is_active());
    }

    #[test]
    fn cancel_and_dismiss_resolve_false() {
        let now = Instant::now();
        let mut m = ModalManager::new();
        m.confirm("Delete?", "Confirm", Action::Delete(1));
        assert_eq!(
            m.resolve(ConfirmOutcome::Cancelled, now),
            Some((Action::Delete(1), false))
        );

        m.confirm("Delete?", "Confirm", Action::Delete(2));
        assert_eq!(
            m.resolve(ConfirmOutcome::Dismissed, now),
            Some((Action::Delete(2), false))
        );
    }

    #[test]
    fn outcome_fires_exactly_once() {
        let now = Instant::now();
        let mut m = ModalManager::new();
        m.confirm("Delete?", "Confirm", Action::Delete(3));
        assert!(m.resolve(ConfirmOutcome::Confirmed, now).is_some());
        assert!(m.resolve(ConfirmOutcome::Confirmed, now).is_none());
    }

    #[test]
    fn non_closable_modal_ignores_dismissal() {
        let now = Instant::now();
        let mut m = ModalManager::new();
        m.show(Modal {
            title: "Busy".into(),
            body: "Working".into(),
            kind: ModalKind::Confirm {
                action: Action::Delete(4),
            },
            closable: false,
        });

        assert!(m.resolve(ConfirmOutcome::Dismissed, now).is_none());
        assert!(m.is_active());
        // Explicit answers still work.
        assert!(m.resolve(ConfirmOutcome::Cancelled, now).is_some());
    }

    #[test]
    fn show_supersedes_active_modal() {
        let now = Instant::now();
        let mut m = ModalManager::new();
        m.confirm("first", "Confirm", Action::Delete(1));
        m.confirm("second", "Confirm", Action::Delete(2));

        assert_eq!(m.active().unwrap().body, "second");
        // The superseded modal's action is gone; only the new one fires.
        assert_eq!(
            m.resolve(ConfirmOutcome::Confirmed, now),
            Some((Action::Delete(2), true))
        );
    }

    #[test]
    fn closing_transition_clears_on_tick() {
        let now = Instant::now();
        let mut m = ModalManager::<Action>::new();
        m.info("Note", "body");
        m.hide(now);
        m.tick(now + Duration::from_millis(200));
        assert!(!m.is_active());
    }
}
