//! API helpers for product reads and mutations.
//!
//! # Design
//! - Reads route through the resource cache; identical in-flight reads share
//!   one request.
//! - Mutations write to the server first and invalidate tags only on
//!   success, leaving the cache untouched on failure.

use crate::app::api::ApiCtx;
use crate::core::cache::cached;
use crate::features::products::queries::{
    create_invalidates, delete_invalidates, detail_key, key_for, provides_product,
    provides_products, update_invalidates,
};
use crate::features::products::state::ListSource;
use crate::services::error::ApiError;
use shopfront_api_models::{DeleteProductResponse, NewProduct, Product, ProductPatch};

/// Load the rows for the active list source through the cache.
pub(crate) async fn load_products(
    ctx: &ApiCtx,
    source: &ListSource,
) -> Result<Vec<Product>, ApiError> {
    let key = key_for(source);
    match source {
        ListSource::Paginated {
            offset,
            limit,
            category_id,
        } => {
            let client = ctx.client.clone();
            let offset = *offset;
            let limit = *limit;
            let category_id = category_id.clone();
            cached(
                &ctx.cache,
                key,
                |products| provides_products(products),
                move || async move {
                    client
                        .fetch_products(offset, limit, category_id.as_deref())
                        .await
                },
            )
            .await
        }
        ListSource::Search { term } => {
            let client = ctx.client.clone();
            let term = term.clone();
            cached(
                &ctx.cache,
                key,
                |products| provides_products(products),
                move || async move { client.search_products(&term).await },
            )
            .await
        }
    }
}

/// Load one product by slug through the cache.
pub(crate) async fn load_product_by_slug(ctx: &ApiCtx, slug: &str) -> Result<Product, ApiError> {
    let client = ctx.client.clone();
    let slug = slug.to_string();
    cached(
        &ctx.cache,
        detail_key(&slug),
        |product| provides_product(product),
        move || async move { client.fetch_product_by_slug(&slug).await },
    )
    .await
}

/// Create a product, invalidating listings on success.
pub(crate) async fn create_product(ctx: &ApiCtx, body: &NewProduct) -> Result<Product, ApiError> {
    let created = ctx.client.create_product(body).await?;
    ctx.cache.borrow_mut().invalidate(&create_invalidates());
    Ok(created)
}

/// Update a product, invalidating listings and its detail entry on success.
pub(crate) async fn update_product(
    ctx: &ApiCtx,
    id: &str,
    body: &ProductPatch,
) -> Result<Product, ApiError> {
    let updated = ctx.client.update_product(id, body).await?;
    ctx.cache.borrow_mut().invalidate(&update_invalidates(id));
    Ok(updated)
}

/// Delete a product, invalidating listings on success.
pub(crate) async fn delete_product(
    ctx: &ApiCtx,
    id: &str,
) -> Result<DeleteProductResponse, ApiError> {
    let deleted = ctx.client.delete_product(id).await?;
    ctx.cache.borrow_mut().invalidate(&delete_invalidates());
    Ok(deleted)
}
