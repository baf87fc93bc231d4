//! Shared loading indicator over a set of scope keys.
//!
//! Concurrent operations each show/hide their own scope; the indicator is
//! visible while any scope is active. Membership is a set, not a counter:
//! duplicate `show` calls with one key are idempotent, and a caller that
//! shows the default scope without a matching hide leaves the indicator
//! stuck visible — pair calls consistently.

use std::collections::HashSet;

/// Scope used when callers do not specify one.
pub const DEFAULT_SCOPE: &str = "global";

#[derive(Debug, Default)]
pub struct LoadingTracker {
    scopes: HashSet<String>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, scope: Option<&str>) {
        self.scopes
            .insert(scope.unwrap_or(DEFAULT_SCOPE).to_string());
    }

    pub fn hide(&mut self, scope: Option<&str>) {
        self.scopes.remove(scope.unwrap_or(DEFAULT_SCOPE));
    }

    /// Visible iff any scope is active.
    pub fn is_visible(&self) -> bool {
        !self.scopes.is_empty()
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    pub fn active_count(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_while_any_scope_active() {
        let mut l = LoadingTracker::new();
        l.show(Some("a"));
        l.show(Some("b"));
        l.hide(Some("a"));
        assert!(l.is_visible());
        l.hide(Some("b"));
        assert!(!l.is_visible());
    }

    #[test]
    fn duplicate_show_is_idempotent() {
        let mut l = LoadingTracker::new();
        l.show(Some("a"));
        l.show(Some("a"));
        assert_eq!(l.active_count(), 1);
        l.hide(Some("a"));
        assert!(!l.is_visible());
    }

    #[test]
    fn default_scope_pairs_show_and_hide() {
        let mut l = LoadingTracker::new();
        l.show(None);
        assert!(l.contains(DEFAULT_SCOPE));
        l.hide(None);
        assert!(!l.is_visible());
    }

    #[test]
    fn hiding_unknown_scope_is_a_no_op() {
        let mut l = LoadingTracker::new();
        l.show(Some("a"));
        l.hide(Some("zzz"));
        assert!(l.is_visible());
    }
}
