//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot; auth updates via interior mutability so the
//!   instance never needs rebuilding.
//! - Error bodies decode into the API's `{message}` shape when possible.

use crate::core::logic::{products_path, search_path};
use crate::services::error::ApiError;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopfront_api_models::{
    AuthRequest, AuthResponse, Category, DeleteProductResponse, ErrorMessage, NewProduct, Product,
    ProductPatch,
};
use std::cell::RefCell;

#[derive(Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
        }
    }

    pub(crate) fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: Request) -> Request {
        match self.token.borrow().as_deref() {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            let status = response.status();
            let message = response.json::<ErrorMessage>().await.map_or_else(
                |_| format!("request failed with status {status}"),
                |body| body.message,
            );
            return Err(ApiError::Api { status, message });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(Request::get(&self.url(path)));
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Self::read_json(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: Request,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = request
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Self::read_json(response).await
    }

    pub(crate) async fn login(&self, email: &str) -> Result<AuthResponse, ApiError> {
        let body = AuthRequest {
            email: email.to_string(),
        };
        self.send_json(Request::post(&self.url("/auth")), &body)
            .await
    }

    pub(crate) async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories").await
    }

    pub(crate) async fn fetch_products(
        &self,
        offset: u32,
        limit: u32,
        category_id: Option<&str>,
    ) -> Result<Vec<Product>, ApiError> {
        self.get_json(&products_path(offset, limit, category_id))
            .await
    }

    pub(crate) async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        self.get_json(&search_path(term)).await
    }

    pub(crate) async fn fetch_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        self.get_json(&format!("/products/{slug}")).await
    }

    pub(crate) async fn create_product(&self, body: &NewProduct) -> Result<Product, ApiError> {
        self.send_json(self.authorize(Request::post(&self.url("/products"))), body)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        id: &str,
        body: &ProductPatch,
    ) -> Result<Product, ApiError> {
        self.send_json(
            self.authorize(Request::put(&self.url(&format!("/products/{id}")))),
            body,
        )
        .await
    }

    pub(crate) async fn delete_product(
        &self,
        id: &str,
    ) -> Result<DeleteProductResponse, ApiError> {
        let request = self.authorize(Request::delete(&self.url(&format!("/products/{id}"))));
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Self::read_json(response).await
    }
}
