//! UI-facing view models shared across pages.

/// Lifecycle of a remote read as observed by a view.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Data arrived and is current.
    Ready,
    /// The last attempt failed; the message is view-ready.
    Failed(String),
}

impl FetchStatus {
    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, when the last attempt failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Toast notification entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier used for dismissal.
    pub id: u64,
    /// Message body shown to the user.
    pub message: String,
    /// Severity of the toast.
    pub kind: ToastKind,
}

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}
