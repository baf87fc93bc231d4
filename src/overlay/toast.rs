//! Transient status toasts.
//!
//! Each toast runs its own lifecycle independently:
//! created (`Entering`) → `Visible` → `Leaving` → removed. Auto-dismiss is
//! a per-toast deadline; a `None` duration means manual close only.

use std::time::{Duration, Instant};

/// Short entrance delay before a toast counts as visible.
const ENTER_DELAY: Duration = Duration::from_millis(50);
/// Removal transition; the toast stays renderable (dimmed) while leaving.
const LEAVE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "OK",
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub phase: ToastPhase,
    created: Instant,
    /// Auto-dismiss deadline; `None` = manual close only.
    deadline: Option<Instant>,
    /// Set when leaving; removal time.
    gone_at: Option<Instant>,
}

/// Tracks all live toasts. Multiple toasts are concurrently alive, each
/// with its own timer.
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and tracks one toast. `duration = None` disables
    /// auto-dismiss.
    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        duration: Option<Duration>,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            severity,
            message: message.into(),
            phase: ToastPhase::Entering,
            created: now,
            deadline: duration.map(|d| now + ENTER_DELAY + d),
            gone_at: None,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(
            Severity::Success,
            message,
            Some(Duration::from_secs(3)),
            now,
        )
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(Severity::Error, message, Some(Duration::from_secs(5)), now)
    }

    pub fn warning(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(
            Severity::Warning,
            message,
            Some(Duration::from_secs(4)),
            now,
        )
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(Severity::Info, message, Some(Duration::from_secs(3)), now)
    }

    /// Requests removal of one toast. Idempotent: an unknown id or a toast
    /// already mid-removal ignores the request.
    pub fn dismiss(&mut self, id: u64, now: Instant) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id)
            && toast.phase != ToastPhase::Leaving
        {
            toast.phase = ToastPhase::Leaving;
            toast.gone_at = Some(now + LEAVE_DELAY);
        }
    }

    /// Advances every toast's lifecycle and drops the ones whose removal
    /// transition finished.
    pub fn tick(&mut self, now: Instant) {
        for toast in &mut self.toasts {
            match toast.phase {
                ToastPhase::Entering => {
                    if now >= toast.created + ENTER_DELAY {
                        toast.phase = ToastPhase::Visible;
                    }
                }
                ToastPhase::Visible => {
                    if let Some(deadline) = toast.deadline
                        && now >= deadline
                    {
                        toast.phase = ToastPhase::Leaving;
                        toast.gone_at = Some(now + LEAVE_DELAY);
                    }
                }
                ToastPhase::Leaving => {}
            }
        }
        self.toasts
            .retain(|t| t.gone_at.map(|g| now < g).unwrap_or(true));
    }

    /// Live toasts in creation order.
    pub fn live(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(manager: &mut ToastManager, start: Instant, ms: u64) {
        manager.tick(start + Duration::from_millis(ms));
    }

    #[test]
    fn auto_dismiss_after_duration_plus_transition() {
        let start = Instant::now();
        let mut m = ToastManager::new();
        m.push(
            Severity::Info,
            "saved",
            Some(Duration::from_millis(500)),
            start,
        );
        assert_eq!(m.live().len(), 1);

        // Entrance delay elapsed: visible.
        advance(&mut m, start, 100);
        assert_eq!(m.live()[0].phase, ToastPhase::Visible);

        // Still alive just before the deadline.
        advance(&mut m, start, 500);
        assert_eq!(m.live().len(), 1);

        // Past deadline: leaving, then removed after the transition.
        advance(&mut m, start, 600);
        assert_eq!(m.live()[0].phase, ToastPhase::Leaving);
        advance(&mut m, start, 900);
        assert!(m.is_empty());
    }

    #[test]
    fn zero_duration_toast_never_auto_removes() {
        let start = Instant::now();
        let mut m = ToastManager::new();
        let id = m.push(Severity::Error, "stuck", None, start);

        advance(&mut m, start, 60_000);
        assert_eq!(m.live().len(), 1);

        m.dismiss(id, start + Duration::from_secs(61));
        advance(&mut m, start, 62_000);
        assert!(m.is_empty());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let start = Instant::now();
        let mut m = ToastManager::new();
        let id = m.push(Severity::Success, "done", None, start);

        m.dismiss(id, start);
        let first_gone = m.live()[0].gone_at;
        // A second request while mid-removal changes nothing.
        m.dismiss(id, start + Duration::from_millis(100));
        assert_eq!(m.live()[0].gone_at, first_gone);
        // Unknown ids are ignored.
        m.dismiss(9999, start);
    }

    #[test]
    fn toasts_are_independent() {
        let start = Instant::now();
        let mut m = ToastManager::new();
        m.push(
            Severity::Info,
            "short",
            Some(Duration::from_millis(100)),
            start,
        );
        m.push(
            Severity::Info,
            "long",
            Some(Duration::from_secs(10)),
            start,
        );

        advance(&mut m, start, 1000);
        assert_eq!(m.live().len(), 1);
        assert_eq!(m.live()[0].message, "long");
    }
}
