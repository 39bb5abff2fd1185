//! Feature slices: auth, categories, and the product catalog.
pub mod auth;
pub mod categories;
pub mod products;
