//! Toast queue state and transitions.

use crate::models::{Toast, ToastKind};

/// Bounded queue of visible toasts.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ToastState {
    /// Toasts currently on screen, oldest first.
    pub toasts: Vec<Toast>,
    /// Next identifier to assign.
    pub next_id: u64,
}

const MAX_VISIBLE: usize = 4;

/// Append a toast, dropping the oldest entries beyond the visible cap.
pub fn push_toast(state: &mut ToastState, kind: ToastKind, message: String) {
    state.next_id += 1;
    state.toasts.push(Toast {
        id: state.next_id,
        message,
        kind,
    });
    if state.toasts.len() > MAX_VISIBLE {
        let drain = state.toasts.len() - MAX_VISIBLE;
        state.toasts.drain(0..drain);
    }
}

/// Remove a toast by id, ignoring ids that already expired.
pub fn dismiss_toast(state: &mut ToastState, id: u64) {
    state.toasts.retain(|toast| toast.id != id);
}

#[cfg(test)]
mod tests {
    use super::{ToastState, dismiss_toast, push_toast};
    use crate::models::ToastKind;

    #[test]
    fn ids_are_monotonic_and_queue_is_capped() {
        let mut state = ToastState::default();
        for index in 0..6 {
            push_toast(&mut state, ToastKind::Info, format!("t{index}"));
        }
        assert_eq!(state.toasts.len(), 4);
        assert_eq!(state.toasts.first().map(|t| t.id), Some(3));
        assert_eq!(state.toasts.last().map(|t| t.id), Some(6));
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut state = ToastState::default();
        push_toast(&mut state, ToastKind::Success, "saved".to_string());
        push_toast(&mut state, ToastKind::Error, "failed".to_string());
        dismiss_toast(&mut state, 1);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].message, "failed");
        dismiss_toast(&mut state, 99);
        assert_eq!(state.toasts.len(), 1);
    }
}
