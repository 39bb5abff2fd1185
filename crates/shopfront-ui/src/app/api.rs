//! Shared API context: one client and one resource cache per app boot.
//!
//! # Design
//! - Create exactly one client instance per boot; auth updates go through
//!   interior mutability instead of rebuilding it.
//! - The cache rides along so every feature reads and invalidates the same
//!   entries.

use crate::core::cache::ResourceCache;
use crate::services::api::ApiClient;
use std::cell::RefCell;
use std::rc::Rc;

/// Process-wide API context handed to features via yew context.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
    /// Shared resource cache.
    pub cache: Rc<RefCell<ResourceCache>>,
}

impl ApiCtx {
    /// Create a new context with the configured base URL.
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url)),
            cache: Rc::new(RefCell::new(ResourceCache::new())),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && Rc::ptr_eq(&self.cache, &other.cache)
    }
}
