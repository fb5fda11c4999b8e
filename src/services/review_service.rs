//! Review Resolution: archive search behind a bounded cache.

use crate::config::Config;
use crate::domain::DomainError;
use crate::models::ReviewSearchOutcome;
use crate::modules::integrations::nb_archive;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ReviewKey {
    author: String,
    title: String,
    publication_year: i64,
}

/// Resolves candidate newspaper reviews for a book, caching outcomes by the
/// exact (author, title, year) triple so a repeat search does not re-hit the
/// archive. The cache is a bounded LRU; the lock is never held across the
/// network call, so deduplication of concurrent identical searches is
/// best-effort.
pub struct ReviewService {
    client: reqwest::Client,
    api_base: String,
    web_base: String,
    cache: Mutex<LruCache<ReviewKey, Arc<ReviewSearchOutcome>>>,
}

impl ReviewService {
    pub fn new(config: &Config) -> Self {
        let capacity =
            NonZeroUsize::new(config.review_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            client: reqwest::Client::new(),
            api_base: config.archive_api_base.clone(),
            web_base: config.archive_web_base.clone(),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn find_reviews(
        &self,
        author: &str,
        title: &str,
        publication_year: i64,
    ) -> Result<Arc<ReviewSearchOutcome>, DomainError> {
        let key = ReviewKey {
            author: author.to_string(),
            title: title.to_string(),
            publication_year,
        };

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                tracing::debug!(author, title, publication_year, "review cache hit");
                return Ok(cached.clone());
            }
        }

        let outcome = nb_archive::search_newspapers(
            &self.client,
            &self.api_base,
            &self.web_base,
            author,
            title,
            publication_year,
        )
        .await?;
        let outcome = Arc::new(outcome);

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, outcome.clone());
        }

        Ok(outcome)
    }
}
