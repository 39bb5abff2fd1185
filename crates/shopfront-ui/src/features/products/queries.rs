//! Query keys and tag declarations for product reads and mutations.
//!
//! # Design
//! - Keys derive deterministically from the list source so identical reads
//!   coalesce in the cache.
//! - Listings provide the list tag plus a per-row tag; mutations invalidate
//!   the narrowest set that covers what they changed.

use crate::core::cache::{QueryKey, Tag};
use crate::features::products::state::ListSource;
use shopfront_api_models::Product;
use std::collections::BTreeSet;

/// Cache key for the active list source.
#[must_use]
pub fn key_for(source: &ListSource) -> QueryKey {
    match source {
        ListSource::Paginated {
            offset,
            limit,
            category_id,
        } => QueryKey::Products {
            offset: *offset,
            limit: *limit,
            category_id: category_id.clone(),
        },
        ListSource::Search { term } => QueryKey::ProductSearch { term: term.clone() },
    }
}

/// Cache key for a detail lookup.
#[must_use]
pub fn detail_key(slug: &str) -> QueryKey {
    QueryKey::ProductBySlug {
        slug: slug.to_string(),
    }
}

/// Tags provided by a listing result: the list tag plus one per row.
#[must_use]
pub fn provides_products(products: &[Product]) -> BTreeSet<Tag> {
    let mut tags: BTreeSet<Tag> = products
        .iter()
        .map(|product| Tag::Product(product.id.clone()))
        .collect();
    tags.insert(Tag::ProductList);
    tags
}

/// Tags provided by a detail result.
#[must_use]
pub fn provides_product(product: &Product) -> BTreeSet<Tag> {
    [Tag::Product(product.id.clone())].into_iter().collect()
}

/// Tags invalidated by a successful create.
#[must_use]
pub fn create_invalidates() -> Vec<Tag> {
    vec![Tag::ProductList]
}

/// Tags invalidated by a successful update.
#[must_use]
pub fn update_invalidates(id: &str) -> Vec<Tag> {
    vec![Tag::ProductList, Tag::Product(id.to_string())]
}

/// Tags invalidated by a successful delete.
#[must_use]
pub fn delete_invalidates() -> Vec<Tag> {
    vec![Tag::ProductList]
}

#[cfg(test)]
mod tests {
    use super::{
        create_invalidates, delete_invalidates, key_for, provides_products, update_invalidates,
    };
    use crate::core::cache::{QueryKey, Tag};
    use crate::features::products::state::ListSource;
    use shopfront_api_models::{Product, ProductCategory};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            slug: format!("slug-{id}"),
            name: "Red Mug".to_string(),
            description: "A mug, in red.".to_string(),
            price: 12.5,
            images: vec![],
            category: ProductCategory {
                id: "c1".to_string(),
                name: "Kitchen".to_string(),
            },
        }
    }

    #[test]
    fn identical_sources_share_a_key() {
        let source = ListSource::Paginated {
            offset: 8,
            limit: 8,
            category_id: Some("c1".to_string()),
        };
        assert_eq!(key_for(&source), key_for(&source.clone()));
        let search = ListSource::Search {
            term: "mug".to_string(),
        };
        assert_eq!(
            key_for(&search),
            QueryKey::ProductSearch {
                term: "mug".to_string()
            }
        );
    }

    #[test]
    fn listings_provide_list_and_row_tags() {
        let tags = provides_products(&[product("p1"), product("p2")]);
        assert!(tags.contains(&Tag::ProductList));
        assert!(tags.contains(&Tag::Product("p1".to_string())));
        assert!(tags.contains(&Tag::Product("p2".to_string())));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn mutation_tag_sets_match_their_scope() {
        assert_eq!(create_invalidates(), vec![Tag::ProductList]);
        assert_eq!(delete_invalidates(), vec![Tag::ProductList]);
        assert_eq!(
            update_invalidates("p1"),
            vec![Tag::ProductList, Tag::Product("p1".to_string())]
        );
    }
}
