//! Routing definitions for the Shopfront UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/products")]
    Products,
    #[at("/products/add")]
    AddProduct,
    #[at("/products/:slug")]
    ProductDetail { slug: String },
    #[at("/products/:slug/edit")]
    EditProduct { slug: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
