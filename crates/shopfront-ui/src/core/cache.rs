//! Tag-indexed cache of API query results.
//!
//! # Design
//! - One entry per distinct query key; payloads are normalized JSON so every
//!   query shape shares one store.
//! - At most one request in flight per key: late callers attach to the
//!   pending request instead of fetching again.
//! - Invalidation only flips a staleness flag; eviction (stale → refetch)
//!   stays separate from deletion.
//! - Failed fetches are never cached; the next read retries.

use crate::services::error::ApiError;
use futures::channel::oneshot;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Label attached to cache entries at write time, used to batch-invalidate
/// related entries when a mutation succeeds.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// Any product listing (paginated or search).
    ProductList,
    /// A single product, keyed by its server id.
    Product(String),
    /// The category listing.
    Categories,
}

/// Deterministic cache key derived from query arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Paginated product listing.
    Products {
        /// Row offset into the listing.
        offset: u32,
        /// Page size.
        limit: u32,
        /// Optional category filter.
        category_id: Option<String>,
    },
    /// Free-text product search.
    ProductSearch {
        /// Trimmed search term.
        term: String,
    },
    /// Product detail lookup.
    ProductBySlug {
        /// URL-safe product slug.
        slug: String,
    },
    /// Category listing.
    Categories,
}

type FetchResult = Result<Value, ApiError>;

/// Receiving side of a coalesced request; resolves when the in-flight fetch
/// for the same key completes.
pub type Waiter = oneshot::Receiver<FetchResult>;

enum Slot {
    Ready {
        value: Value,
        tags: BTreeSet<Tag>,
        stale: bool,
    },
    InFlight {
        waiters: Vec<oneshot::Sender<FetchResult>>,
    },
}

/// Outcome of [`ResourceCache::begin`].
pub enum Begin {
    /// A fresh entry exists; use the payload without a network round-trip.
    Hit(Value),
    /// The caller owns the fetch and must call [`ResourceCache::complete`].
    Fetch,
    /// A fetch for this key is already in flight; await its result.
    Join(Waiter),
}

/// Normalized, tag-indexed cache of server responses.
#[derive(Default)]
pub struct ResourceCache {
    entries: HashMap<QueryKey, Slot>,
}

impl ResourceCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a read for `key`.
    ///
    /// Exactly one caller per key is handed [`Begin::Fetch`] at a time; it
    /// must finish the read with [`Self::complete`] so attached waiters are
    /// released.
    pub fn begin(&mut self, key: &QueryKey) -> Begin {
        match self.entries.get_mut(key) {
            Some(Slot::Ready {
                value,
                stale: false,
                ..
            }) => return Begin::Hit(value.clone()),
            Some(Slot::InFlight { waiters }) => {
                let (sender, receiver) = oneshot::channel();
                waiters.push(sender);
                return Begin::Join(receiver);
            }
            _ => {}
        }
        // Miss or stale entry: this caller fetches.
        self.entries
            .insert(key.clone(), Slot::InFlight { waiters: Vec::new() });
        Begin::Fetch
    }

    /// Finish the read started by the [`Begin::Fetch`] caller.
    ///
    /// On success the tagged payload is installed fresh; on failure the slot
    /// is dropped so the next read retries. Either way every waiter attached
    /// to the key receives the same outcome.
    pub fn complete(
        &mut self,
        key: &QueryKey,
        result: Result<(Value, BTreeSet<Tag>), ApiError>,
    ) -> FetchResult {
        let waiters = match self.entries.remove(key) {
            Some(Slot::InFlight { waiters }) => waiters,
            _ => Vec::new(),
        };
        let outcome = match result {
            Ok((value, tags)) => {
                self.entries.insert(
                    key.clone(),
                    Slot::Ready {
                        value: value.clone(),
                        tags,
                        stale: false,
                    },
                );
                Ok(value)
            }
            Err(err) => Err(err),
        };
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
        outcome
    }

    /// Mark every entry carrying one of `tags` stale.
    ///
    /// Entries are not removed; a stale entry refetches on its next read.
    pub fn invalidate(&mut self, tags: &[Tag]) {
        for slot in self.entries.values_mut() {
            if let Slot::Ready {
                tags: entry_tags,
                stale,
                ..
            } = slot
                && tags.iter().any(|tag| entry_tags.contains(tag))
            {
                *stale = true;
            }
        }
    }

    /// Staleness of the entry for `key`; `None` when no payload is cached.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        match self.entries.get(key) {
            Some(Slot::Ready { stale, .. }) => Some(*stale),
            _ => None,
        }
    }
}

/// Run a query through the cache: serve fresh hits, attach to in-flight
/// requests, or perform the single fetch for this key and publish the result.
///
/// `tags` derives the entry's tag set from the fetched payload.
///
/// # Errors
/// Returns the fetch error for this attempt (shared verbatim with coalesced
/// callers), or a decode error when the payload does not match `T`.
pub async fn cached<T, F, Fut>(
    cache: &Rc<RefCell<ResourceCache>>,
    key: QueryKey,
    tags: impl FnOnce(&T) -> BTreeSet<Tag>,
    fetch: F,
) -> Result<T, ApiError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, ApiError>>,
{
    let begin = cache.borrow_mut().begin(&key);
    match begin {
        Begin::Hit(value) => decode(value),
        Begin::Join(waiter) => match waiter.await {
            Ok(result) => result.and_then(decode),
            Err(_) => Err(ApiError::Transport("request abandoned".to_string())),
        },
        Begin::Fetch => {
            let result = match fetch().await {
                Ok(payload) => match serde_json::to_value(&payload) {
                    Ok(value) => {
                        let tags = tags(&payload);
                        Ok((value, tags))
                    }
                    Err(err) => Err(ApiError::Decode(err.to_string())),
                },
                Err(err) => Err(err),
            };
            cache.borrow_mut().complete(&key, result).and_then(decode)
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Begin, QueryKey, ResourceCache, Tag, cached};
    use crate::services::error::ApiError;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;
    use std::rc::Rc;

    fn list_key() -> QueryKey {
        QueryKey::Products {
            offset: 0,
            limit: 8,
            category_id: None,
        }
    }

    fn list_tags() -> BTreeSet<Tag> {
        [Tag::ProductList, Tag::Product("p1".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn fresh_entry_is_served_without_refetch() {
        let mut cache = ResourceCache::new();
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
        let stored = cache
            .complete(&list_key(), Ok((json!(["a"]), list_tags())))
            .expect("complete");
        assert_eq!(stored, json!(["a"]));
        match cache.begin(&list_key()) {
            Begin::Hit(value) => assert_eq!(value, json!(["a"])),
            _ => panic!("expected a cache hit"),
        }
    }

    #[test]
    fn concurrent_reads_coalesce_into_one_fetch() {
        let mut cache = ResourceCache::new();
        // First caller owns the fetch; the next two attach to it.
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
        let Begin::Join(mut first) = cache.begin(&list_key()) else {
            panic!("expected to join the in-flight request");
        };
        let Begin::Join(mut second) = cache.begin(&list_key()) else {
            panic!("expected to join the in-flight request");
        };
        cache
            .complete(&list_key(), Ok((json!(["a"]), list_tags())))
            .expect("complete");
        let first = first.try_recv().expect("channel open").expect("resolved");
        let second = second.try_recv().expect("channel open").expect("resolved");
        assert_eq!(first.expect("ok"), json!(["a"]));
        assert_eq!(second.expect("ok"), json!(["a"]));
    }

    #[test]
    fn failed_fetches_are_shared_and_not_cached() {
        let mut cache = ResourceCache::new();
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
        let Begin::Join(mut waiter) = cache.begin(&list_key()) else {
            panic!("expected to join the in-flight request");
        };
        let err = ApiError::Transport("offline".to_string());
        assert_eq!(
            cache.complete(&list_key(), Err(err.clone())),
            Err(err.clone())
        );
        let shared = waiter.try_recv().expect("channel open").expect("resolved");
        assert_eq!(shared, Err(err));
        // Nothing was cached, so the next read retries.
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
        assert_eq!(cache.is_stale(&list_key()), None);
    }

    #[test]
    fn invalidation_marks_tagged_entries_stale_without_evicting() {
        let mut cache = ResourceCache::new();
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
        cache
            .complete(&list_key(), Ok((json!(["a"]), list_tags())))
            .expect("complete");
        assert!(matches!(cache.begin(&QueryKey::Categories), Begin::Fetch));
        cache
            .complete(
                &QueryKey::Categories,
                Ok((json!(["c"]), [Tag::Categories].into_iter().collect())),
            )
            .expect("complete");

        cache.invalidate(&[Tag::ProductList]);
        assert_eq!(cache.is_stale(&list_key()), Some(true));
        assert_eq!(cache.is_stale(&QueryKey::Categories), Some(false));
        // A stale entry refetches rather than serving the old payload.
        assert!(matches!(cache.begin(&list_key()), Begin::Fetch));
    }

    #[test]
    fn per_id_invalidation_reaches_detail_entries() {
        let mut cache = ResourceCache::new();
        let detail = QueryKey::ProductBySlug {
            slug: "red-mug".to_string(),
        };
        assert!(matches!(cache.begin(&detail), Begin::Fetch));
        cache
            .complete(
                &detail,
                Ok((
                    json!({"id": "p1"}),
                    [Tag::Product("p1".to_string())].into_iter().collect(),
                )),
            )
            .expect("complete");

        cache.invalidate(&[Tag::Product("p2".to_string())]);
        assert_eq!(cache.is_stale(&detail), Some(false));
        cache.invalidate(&[Tag::Product("p1".to_string())]);
        assert_eq!(cache.is_stale(&detail), Some(true));
    }

    #[test]
    fn cached_helper_fetches_once_then_hits() {
        let cache = Rc::new(RefCell::new(ResourceCache::new()));
        let calls = Rc::new(Cell::new(0u32));

        let run = |expected_calls: u32| {
            let cache = cache.clone();
            let calls = calls.clone();
            let fetch_calls = calls.clone();
            futures::executor::block_on(async move {
                let fetched: Vec<String> = cached(
                    &cache,
                    list_key(),
                    |_| [Tag::ProductList].into_iter().collect(),
                    move || async move {
                        fetch_calls.set(fetch_calls.get() + 1);
                        Ok(vec!["a".to_string()])
                    },
                )
                .await
                .expect("query");
                assert_eq!(fetched, vec!["a".to_string()]);
                assert_eq!(calls.get(), expected_calls);
            });
        };

        run(1);
        // Second read is served from the cache without another fetch.
        run(1);
        cache.borrow_mut().invalidate(&[Tag::ProductList]);
        // Stale entry refetches exactly once more.
        run(2);
    }
}
