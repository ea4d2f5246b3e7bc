//! Query result cache
//!
//! A concurrency-safe map from a filter pair to the freelancer list
//! computed for it. Invalidation is coarse: a mutation that could change
//! any filtered result discards the whole cache instead of working out
//! which keys it touched, because a single skill change affects an
//! unbounded number of category/skill combinations. The cache is a
//! disposable projection; dropping it at any point only costs a store
//! round trip.

use moka::future::Cache;

use crate::domain::freelancer::Freelancer;

const DEFAULT_MAX_CAPACITY: u64 = 1024;

/// Cache key: one optional filter per dimension
///
/// `None` means the dimension is unfiltered. The pair is matched exactly,
/// so `(Some("design"), None)` and `(Some("design"), Some("logo"))` are
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    category: Option<String>,
    skill_name: Option<String>,
}

impl FilterKey {
    pub fn new(category: Option<&str>, skill_name: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_owned),
            skill_name: skill_name.map(str::to_owned),
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn skill_name(&self) -> Option<&str> {
        self.skill_name.as_deref()
    }
}

/// Concurrent cache of filtered freelancer listings
///
/// Explicitly constructed and injected; there is no global instance.
/// Entries carry no TTL and live until the next [`QueryCache::clear`].
#[derive(Debug)]
pub struct QueryCache {
    entries: Cache<FilterKey, Vec<Freelancer>>,
}

impl QueryCache {
    /// Creates a cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a cache holding at most `max_capacity` filter pairs
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// True when a result is cached for exactly this filter pair
    pub fn contains_key(&self, category: Option<&str>, skill_name: Option<&str>) -> bool {
        self.entries.contains_key(&FilterKey::new(category, skill_name))
    }

    /// The cached result for the filter pair, if any
    pub async fn get(
        &self,
        category: Option<&str>,
        skill_name: Option<&str>,
    ) -> Option<Vec<Freelancer>> {
        self.entries.get(&FilterKey::new(category, skill_name)).await
    }

    /// Stores or overwrites the result for the filter pair
    pub async fn put(
        &self,
        category: Option<&str>,
        skill_name: Option<&str>,
        freelancers: Vec<Freelancer>,
    ) {
        self.entries
            .insert(FilterKey::new(category, skill_name), freelancers)
            .await;
    }

    /// Coarse invalidation: discards every entry
    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    /// Number of live entries
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
