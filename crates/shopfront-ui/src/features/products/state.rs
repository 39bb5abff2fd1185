//! List view state machine and the catalog store slice.
//!
//! # Design
//! - Pagination/filter state lives in shareable URL parameters; only the
//!   debounced search term is view-local.
//! - A non-empty search term and the paginated listing are mutually
//!   exclusive data sources.
//! - The slice keeps rows behind `Rc` so selector clones stay cheap.

use crate::core::logic::parse_page;
use crate::models::FetchStatus;
use serde::{Deserialize, Serialize};
use shopfront_api_models::{Category, Product};
use std::collections::HashMap;
use std::rc::Rc;

/// Page size for the paginated product listing.
pub const PRODUCTS_PER_PAGE: u32 = 8;

/// URL query parameters backing the list view.
///
/// Values stay as raw strings so junk input degrades to defaults instead of
/// failing the whole parse.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Category filter id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Complete selector state for the product list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Current page, never below 1.
    pub page: u32,
    /// Optional category filter.
    pub category_id: Option<String>,
    /// Debounced free-text search term.
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            category_id: None,
            search: String::new(),
        }
    }
}

impl ListQuery {
    /// Build the query from URL parameters, ignoring junk values.
    #[must_use]
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            page: parse_page(params.page.as_deref()),
            category_id: params.category.clone().filter(|id| !id.is_empty()),
            search: String::new(),
        }
    }

    /// Mirror the shareable portion of the query back into URL parameters.
    #[must_use]
    pub fn to_params(&self) -> ListParams {
        ListParams {
            page: Some(self.page.to_string()),
            category: self.category_id.clone(),
        }
    }

    /// Row offset for the paginated listing.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.page - 1) * PRODUCTS_PER_PAGE
    }

    /// Whether the search source is active.
    #[must_use]
    pub fn searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    /// The active data source; search suppresses the paginated listing.
    #[must_use]
    pub fn source(&self) -> ListSource {
        let term = self.search.trim();
        if term.is_empty() {
            ListSource::Paginated {
                offset: self.offset(),
                limit: PRODUCTS_PER_PAGE,
                category_id: self.category_id.clone(),
            }
        } else {
            ListSource::Search {
                term: term.to_string(),
            }
        }
    }

    /// Switch category filters, resetting to the first page.
    #[must_use]
    pub fn with_category(&self, category_id: Option<String>) -> Self {
        Self {
            page: 1,
            category_id: category_id.filter(|id| !id.is_empty()),
            search: self.search.clone(),
        }
    }

    /// Replace the debounced search term.
    #[must_use]
    pub fn with_search(&self, term: String) -> Self {
        Self {
            search: term,
            ..self.clone()
        }
    }

    /// Advance one page.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    /// Step back one page, never below the first.
    #[must_use]
    pub fn prev_page(&self) -> Self {
        Self {
            page: (self.page - 1).max(1),
            ..self.clone()
        }
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Heuristic end-of-list check: a short page means there is no next one.
    #[must_use]
    pub const fn can_next(&self, fetched: usize) -> bool {
        fetched >= PRODUCTS_PER_PAGE as usize
    }
}

/// Active data source for the list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListSource {
    /// Offset/limit listing, optionally filtered by category.
    Paginated {
        /// Row offset.
        offset: u32,
        /// Page size.
        limit: u32,
        /// Optional category filter.
        category_id: Option<String>,
    },
    /// Free-text search; pagination is suppressed.
    Search {
        /// Trimmed search term.
        term: String,
    },
}

/// Catalog slice stored in the app state.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CatalogState {
    /// Rows for the page currently displayed.
    pub products: Vec<Rc<Product>>,
    /// Lifecycle of the list read.
    pub list_status: FetchStatus,
    /// Category options for filters and the product form.
    pub categories: Vec<Category>,
    /// Cached detail payloads keyed by slug.
    pub details_by_slug: HashMap<String, Rc<Product>>,
    /// Bumped when cached catalog data is invalidated so active views
    /// re-run their reads.
    pub epoch: u64,
}

/// Mark the list read in flight.
pub fn begin_list_load(state: &mut CatalogState) {
    state.list_status = FetchStatus::Loading;
}

/// Replace list rows with a fresh snapshot.
pub fn set_products(state: &mut CatalogState, products: Vec<Product>) {
    state.products = products.into_iter().map(Rc::new).collect();
    state.list_status = FetchStatus::Ready;
}

/// Record a failed list read.
pub fn set_list_error(state: &mut CatalogState, message: String) {
    state.list_status = FetchStatus::Failed(message);
}

/// Replace the category options.
pub fn set_categories(state: &mut CatalogState, categories: Vec<Category>) {
    state.categories = categories;
}

/// Store a detail payload under its slug.
pub fn upsert_detail(state: &mut CatalogState, product: Product) {
    state
        .details_by_slug
        .insert(product.slug.clone(), Rc::new(product));
}

/// Drop a product from rows and detail caches after a delete.
pub fn remove_product(state: &mut CatalogState, id: &str) {
    state.products.retain(|product| product.id != id);
    state.details_by_slug.retain(|_, product| product.id != id);
}

/// Bump the refresh epoch so active reads re-run.
pub fn bump_epoch(state: &mut CatalogState) {
    state.epoch += 1;
}

/// Read a cached detail payload by slug.
#[must_use]
pub fn select_detail(state: &CatalogState, slug: &str) -> Option<Rc<Product>> {
    state.details_by_slug.get(slug).cloned()
}

#[cfg(test)]
mod tests {
    use super::{
        CatalogState, ListParams, ListQuery, ListSource, PRODUCTS_PER_PAGE, bump_epoch,
        remove_product, select_detail, set_products, upsert_detail,
    };
    use shopfront_api_models::{Product, ProductCategory};

    fn product(id: &str, slug: &str) -> Product {
        Product {
            id: id.to_string(),
            slug: slug.to_string(),
            name: "Red Mug".to_string(),
            description: "A mug, in red.".to_string(),
            price: 12.5,
            images: vec!["https://img.example/a.png".to_string()],
            category: ProductCategory {
                id: "c1".to_string(),
                name: "Kitchen".to_string(),
            },
        }
    }

    #[test]
    fn params_round_trip_and_ignore_junk() {
        let query = ListQuery::from_params(&ListParams {
            page: Some("3".to_string()),
            category: Some("c1".to_string()),
        });
        assert_eq!(query.page, 3);
        assert_eq!(query.category_id.as_deref(), Some("c1"));
        assert_eq!(query.to_params().page.as_deref(), Some("3"));

        let junk = ListQuery::from_params(&ListParams {
            page: Some("zero".to_string()),
            category: Some(String::new()),
        });
        assert_eq!(junk.page, 1);
        assert_eq!(junk.category_id, None);
    }

    #[test]
    fn changing_category_resets_page() {
        let query = ListQuery {
            page: 4,
            category_id: None,
            search: String::new(),
        };
        let filtered = query.with_category(Some("c2".to_string()));
        assert_eq!(filtered.page, 1);
        assert_eq!(filtered.category_id.as_deref(), Some("c2"));
        let cleared = filtered.with_category(None);
        assert_eq!(cleared.page, 1);
        assert_eq!(cleared.category_id, None);
    }

    #[test]
    fn search_term_suppresses_pagination() {
        let query = ListQuery {
            page: 2,
            category_id: Some("c1".to_string()),
            search: "  mug  ".to_string(),
        };
        assert!(query.searching());
        match query.source() {
            ListSource::Search { term } => assert_eq!(term, "mug"),
            ListSource::Paginated { .. } => panic!("search must win over pagination"),
        }
        let idle = query.with_search(String::new());
        assert!(!idle.searching());
        match idle.source() {
            ListSource::Paginated {
                offset,
                limit,
                category_id,
            } => {
                assert_eq!(offset, PRODUCTS_PER_PAGE);
                assert_eq!(limit, PRODUCTS_PER_PAGE);
                assert_eq!(category_id.as_deref(), Some("c1"));
            }
            ListSource::Search { .. } => panic!("empty term must paginate"),
        }
    }

    #[test]
    fn paging_respects_bounds() {
        let first = ListQuery::default();
        assert!(!first.can_prev());
        assert_eq!(first.prev_page().page, 1);
        let second = first.next_page();
        assert_eq!(second.page, 2);
        assert!(second.can_prev());
        assert_eq!(second.offset(), PRODUCTS_PER_PAGE);
    }

    #[test]
    fn short_pages_disable_next() {
        let query = ListQuery::default();
        assert!(query.can_next(PRODUCTS_PER_PAGE as usize));
        assert!(!query.can_next(PRODUCTS_PER_PAGE as usize - 1));
        assert!(!query.can_next(0));
    }

    #[test]
    fn removal_drops_rows_and_details() {
        let mut state = CatalogState::default();
        set_products(&mut state, vec![product("p1", "red-mug"), product("p2", "blue-mug")]);
        upsert_detail(&mut state, product("p1", "red-mug"));
        assert!(select_detail(&state, "red-mug").is_some());

        remove_product(&mut state, "p1");
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].id, "p2");
        assert!(select_detail(&state, "red-mug").is_none());
    }

    #[test]
    fn epoch_only_moves_forward() {
        let mut state = CatalogState::default();
        bump_epoch(&mut state);
        bump_epoch(&mut state);
        assert_eq!(state.epoch, 2);
    }
}
