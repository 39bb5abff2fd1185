//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.

use crate::core::session::SessionState;
use crate::core::toasts::ToastState;
use crate::features::products::state::CatalogState;
use yewdux::dispatch::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Authentication session state.
    pub session: SessionState,
    /// Product/category catalog state.
    pub catalog: CatalogState,
    /// Toast notification queue.
    pub toasts: ToastState,
}

/// Dispatch handle for the shared [`AppStore`].
#[must_use]
pub fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::new()
}
