//! Response memoization keyed by request url

use std::{sync::Arc, time::Duration};

use log::debug;
use moka::sync::Cache;

use crate::{config::CacheConfig, lastfm::transport::FetchResponse};

/// Storage behind a [`ResponseCache`]. Eviction is entirely up to the store.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<FetchResponse>;
    fn put(&self, key: String, response: FetchResponse);
}

impl CacheStore for Cache<String, FetchResponse> {
    fn get(&self, key: &str) -> Option<FetchResponse> {
        Cache::get(self, key)
    }

    fn put(&self, key: String, response: FetchResponse) {
        self.insert(key, response);
    }
}

#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
}

impl ResponseCache {
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// In-process store sized by the `[cache]` config section
    pub fn in_memory(config: &CacheConfig) -> Self {
        let store: Cache<String, FetchResponse> = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        Self::new(store)
    }

    /// Returns the stored response for `key`, or runs `fetch`.
    ///
    /// Only successful responses are stored, so a failed lookup is retried by
    /// the next request instead of being remembered.
    pub fn get_or_fetch<F, E>(&self, key: &str, fetch: F) -> Result<FetchResponse, E>
    where
        F: FnOnce() -> Result<FetchResponse, E>,
    {
        if let Some(hit) = self.store.get(key) {
            debug!("cache hit");
            return Ok(hit);
        }

        debug!("cache miss");
        let response = fetch()?;
        if response.is_success() {
            self.store.put(key.to_string(), response.clone());
        }
        Ok(response)
    }
}
