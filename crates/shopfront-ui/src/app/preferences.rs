//! Persistence and environment helpers for the app shell.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;

pub(crate) const AUTH_TOKEN_KEY: &str = "shopfront.auth.token";
pub(crate) const API_BASE_KEY: &str = "shopfront.api_base";

const DEFAULT_API_BASE: &str = "https://api.bitechx.com";

pub(crate) fn load_token() -> Option<String> {
    LocalStorage::get::<String>(AUTH_TOKEN_KEY)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

pub(crate) fn persist_token(token: &str) {
    set_storage(AUTH_TOKEN_KEY, token);
}

pub(crate) fn clear_token() {
    LocalStorage::delete(AUTH_TOKEN_KEY);
}

/// API base URL: a local override slot wins, otherwise the production host.
pub(crate) fn api_base_url() -> String {
    LocalStorage::get::<String>(API_BASE_KEY)
        .ok()
        .filter(|base| !base.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
