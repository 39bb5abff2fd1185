//! Session lifecycle helpers: login, logout, and forced logout.
//!
//! # Design
//! - Keep the store, the client's auth header, and durable storage in step
//!   through these entry points only.

use crate::app::api::ApiCtx;
use crate::app::preferences::{clear_token, persist_token};
use crate::core::store::AppStore;
use crate::services::error::ApiError;
use yewdux::dispatch::Dispatch;

/// Exchange an email for a session token.
pub(crate) async fn login(ctx: &ApiCtx, email: &str) -> Result<String, ApiError> {
    let response = ctx.client.login(email).await?;
    Ok(response.token)
}

/// Adopt a token: persist it, arm the client, and mark the session.
pub(crate) fn establish_session(dispatch: &Dispatch<AppStore>, ctx: &ApiCtx, token: String) {
    persist_token(&token);
    ctx.client.set_token(Some(token.clone()));
    dispatch.reduce_mut(|store| store.session.set_token(token));
}

/// Tear the session down locally; used for logout and rejected tokens.
pub(crate) fn end_session(dispatch: &Dispatch<AppStore>, ctx: &ApiCtx) {
    clear_token();
    ctx.client.set_token(None);
    dispatch.reduce_mut(|store| store.session.clear());
}
