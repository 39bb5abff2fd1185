//! HTTP client services for the remote catalog API.
pub mod error;

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
