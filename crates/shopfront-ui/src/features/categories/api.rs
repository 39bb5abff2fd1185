//! API helpers for the category listing.

use crate::app::api::ApiCtx;
use crate::core::cache::{QueryKey, Tag, cached};
use crate::services::error::ApiError;
use shopfront_api_models::Category;

/// Load the category options through the cache.
///
/// Categories are read-only here, so nothing ever invalidates this entry
/// within a session; repeat callers share the first result.
pub(crate) async fn load_categories(ctx: &ApiCtx) -> Result<Vec<Category>, ApiError> {
    let client = ctx.client.clone();
    cached(
        &ctx.cache,
        QueryKey::Categories,
        |_| [Tag::Categories].into_iter().collect(),
        move || async move { client.fetch_categories().await },
    )
    .await
}
