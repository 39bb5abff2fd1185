#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Shopfront catalog API.
//!
//! These types are the single source of truth for the wire contract between
//! the web UI and the remote catalog service. Field names follow the server's
//! camelCase convention where the two diverge (`categoryId`).

use serde::{Deserialize, Serialize};

/// Catalog product as returned by the API.
///
/// Identity and slug are assigned by the server at creation time and never
/// change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stable, opaque product identifier.
    pub id: String,
    /// Unique URL-safe slug used for detail lookups.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price as a positive decimal.
    pub price: f64,
    /// Ordered image URLs; non-empty for valid records, but tolerated empty
    /// on decode since older records may miss it.
    #[serde(default)]
    pub images: Vec<String>,
    /// Denormalised category reference.
    pub category: ProductCategory,
}

/// Denormalised category reference embedded in a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductCategory {
    /// Category identifier.
    pub id: String,
    /// Category display name.
    pub name: String,
}

/// Standalone category entry from `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category identifier.
    pub id: String,
    /// Category display name.
    pub name: String,
    /// Representative image URL.
    pub image: String,
}

/// Request body for `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Identifier of the category the product belongs to.
    #[serde(rename = "categoryId")]
    pub category_id: String,
    /// Ordered image URLs.
    pub images: Vec<String>,
}

/// Partial request body for `PUT /products/{id}`.
///
/// Unset fields are omitted from the payload so the server leaves them
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    /// Replacement display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Replacement category identifier.
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Replacement image URL list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl From<NewProduct> for ProductPatch {
    fn from(value: NewProduct) -> Self {
        Self {
            name: Some(value.name),
            description: Some(value.description),
            price: Some(value.price),
            category_id: Some(value.category_id),
            images: Some(value.images),
        }
    }
}

/// Response body for `DELETE /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteProductResponse {
    /// Whether the server removed the record.
    pub success: bool,
    /// Identifier of the removed product.
    pub id: String,
}

/// Request body for `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthRequest {
    /// Email address to exchange for a session token.
    pub email: String,
}

/// Success response body for `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Opaque bearer token.
    pub token: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Human-readable failure description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{DeleteProductResponse, NewProduct, Product, ProductPatch};

    #[test]
    fn product_decodes_with_missing_images() {
        let raw = r#"{
            "id": "p1",
            "slug": "red-mug",
            "name": "Red Mug",
            "description": "A mug, in red.",
            "price": 12.5,
            "category": {"id": "c1", "name": "Kitchen"}
        }"#;
        let product: Product = serde_json::from_str(raw).expect("decode");
        assert!(product.images.is_empty());
        assert_eq!(product.category.id, "c1");
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = ProductPatch {
            price: Some(9.99),
            ..ProductPatch::default()
        };
        let encoded = serde_json::to_string(&patch).expect("encode");
        assert_eq!(encoded, r#"{"price":9.99}"#);
    }

    #[test]
    fn patch_uses_camel_case_category_key() {
        let patch = ProductPatch {
            category_id: Some("c2".to_string()),
            ..ProductPatch::default()
        };
        let encoded = serde_json::to_string(&patch).expect("encode");
        assert_eq!(encoded, r#"{"categoryId":"c2"}"#);
    }

    #[test]
    fn full_patch_from_new_product_sets_every_field() {
        let body = NewProduct {
            name: "Red Mug".to_string(),
            description: "A mug, in red.".to_string(),
            price: 12.5,
            category_id: "c1".to_string(),
            images: vec!["https://img.example/a.png".to_string()],
        };
        let patch = ProductPatch::from(body);
        assert_eq!(patch.name.as_deref(), Some("Red Mug"));
        assert_eq!(patch.category_id.as_deref(), Some("c1"));
        assert_eq!(patch.images.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn delete_response_round_trips() {
        let raw = r#"{"success":true,"id":"p1"}"#;
        let decoded: DeleteProductResponse = serde_json::from_str(raw).expect("decode");
        assert!(decoded.success);
        assert_eq!(decoded.id, "p1");
    }
}
