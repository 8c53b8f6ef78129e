use std::time::Duration;

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
}

/// A single toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// The one toast slot of a screen.
///
/// Showing a new toast replaces the current one and invalidates its pending
/// auto-hide: [`ToastState::hide`] only clears the toast whose id it is given.
#[derive(Debug)]
pub struct ToastState {
    current: Option<Toast>,
    next_id: u64,
    auto_hide: Duration,
}

impl ToastState {
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            current: None,
            next_id: 0,
            auto_hide,
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn auto_hide(&self) -> Duration {
        self.auto_hide
    }

    /// Show `message`, returning the id to hand back to [`ToastState::hide`]
    /// once the auto-hide delay elapses.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_id += 1;
        self.current = Some(Toast {
            id: self.next_id,
            message: message.into(),
            kind,
        });
        self.next_id
    }

    /// Hide the toast with `id`. Returns `false` if it was already replaced.
    pub fn hide(&mut self, id: u64) -> bool {
        match self.current {
            Some(ref t) if t.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_hide() {
        let mut toasts = ToastState::new(Duration::from_millis(2300));
        let id = toasts.show("Saved to favorites", ToastKind::Success);
        assert_eq!(toasts.current().map(|t| t.message.as_str()), Some("Saved to favorites"));
        assert!(toasts.hide(id));
        assert!(!toasts.is_visible());
    }

    #[test]
    fn test_new_toast_preempts_pending_hide() {
        let mut toasts = ToastState::new(Duration::from_millis(2300));
        let first = toasts.show("Saved to favorites", ToastKind::Success);
        let second = toasts.show("Removed from favorites", ToastKind::Info);

        assert!(!toasts.hide(first));
        assert_eq!(
            toasts.current().map(|t| t.message.as_str()),
            Some("Removed from favorites")
        );
        assert!(toasts.hide(second));
    }
}
