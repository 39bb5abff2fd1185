//! Category feature surface (read-only from this UI).

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
