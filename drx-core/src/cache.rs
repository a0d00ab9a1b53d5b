// drx_core/src/cache.rs
use crate::backend::DecrypterBackend;
use crate::catalog::FileRecord;
use crate::error::Result;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// How long a fetched listing stays fresh.
pub const DEFAULT_LISTING_TTL: Duration = Duration::from_secs(60);

type ListingFuture = Shared<BoxFuture<'static, Result<Vec<FileRecord>>>>;

struct CacheEntry {
    records: Vec<FileRecord>,
    fetched_at: Instant,
}

struct CacheState {
    entry: Option<CacheEntry>,
    in_flight: Option<ListingFuture>,
    // Bumped when a fetch starts and on every clear(). A fetch commits its
    // result only while the generation still matches the one it started
    // under, so a clear() during the fetch discards that result.
    generation: u64,
}

/// Time-bounded memo of the file listing with explicit invalidation.
///
/// A read within the TTL is served from memory. A stale read fetches, and
/// concurrent stale readers join the fetch already in flight rather than
/// issuing a duplicate remote call; every joined reader receives the same
/// result, success or failure. Failed fetches are never stored.
pub struct ListingCache {
    backend: Arc<dyn DecrypterBackend>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl ListingCache {
    pub fn new(backend: Arc<dyn DecrypterBackend>) -> Self {
        Self::with_ttl(backend, DEFAULT_LISTING_TTL)
    }

    pub fn with_ttl(backend: Arc<dyn DecrypterBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            state: Mutex::new(CacheState {
                entry: None,
                in_flight: None,
                generation: 0,
            }),
        }
    }

    /// Returns the listing, fetching it first when stale.
    ///
    /// The state lock is held for the check-and-set only, never across the
    /// remote call.
    pub async fn read(&self) -> Result<Vec<FileRecord>> {
        let (fetch, generation) = {
            let mut state = self.state.lock().await;
            if let Some(entry) = &state.entry {
                if entry.fetched_at.elapsed() < self.ttl {
                    tracing::debug!(rows = entry.records.len(), "listing served from cache");
                    return Ok(entry.records.clone());
                }
            }
            match &state.in_flight {
                Some(fetch) => {
                    tracing::debug!("joining listing fetch already in flight");
                    (fetch.clone(), state.generation)
                }
                None => {
                    state.generation += 1;
                    let backend = Arc::clone(&self.backend);
                    let fetch: ListingFuture =
                        async move { backend.list_files().await }.boxed().shared();
                    state.in_flight = Some(fetch.clone());
                    tracing::debug!("listing stale, fetching");
                    (fetch, state.generation)
                }
            }
        };

        let result = fetch.await;

        let mut state = self.state.lock().await;
        if state.generation == generation && state.in_flight.is_some() {
            state.in_flight = None;
            if let Ok(records) = &result {
                state.entry = Some(CacheEntry {
                    records: records.clone(),
                    fetched_at: Instant::now(),
                });
            }
        }
        result
    }

    /// Drops the cached listing and detaches any fetch in flight; a detached
    /// fetch still resolves for its callers but its result is not stored.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entry = None;
        state.in_flight = None;
        state.generation += 1;
        tracing::debug!("listing cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrxError;
    use crate::mock::MockDecrypter;

    fn backend_with_files() -> Arc<MockDecrypter> {
        let mock = Arc::new(MockDecrypter::new());
        mock.seed_company("acme", &["a.zip", "b.zip"]);
        mock.seed_company("globex", &["c.zip"]);
        mock
    }

    #[tokio::test(start_paused = true)]
    async fn serves_from_memory_within_ttl() {
        let mock = backend_with_files();
        let cache = ListingCache::new(mock.clone());
        let first = cache.read().await.unwrap();
        let second = cache.read().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refetches_once_ttl_has_passed() {
        let mock = backend_with_files();
        let cache = ListingCache::new(mock.clone());
        cache.read().await.unwrap();
        tokio::time::advance(DEFAULT_LISTING_TTL + Duration::from_secs(1)).await;
        cache.read().await.unwrap();
        assert_eq!(mock.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_forces_refetch_within_ttl() {
        let mock = backend_with_files();
        let cache = ListingCache::new(mock.clone());
        cache.read().await.unwrap();
        cache.clear().await;
        cache.read().await.unwrap();
        assert_eq!(mock.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_is_not_cached() {
        let mock = backend_with_files();
        mock.fail_next_list("backend offline");
        let cache = ListingCache::new(mock.clone());
        let err = cache.read().await.unwrap_err();
        assert!(matches!(err, DrxError::Retrieval(detail) if detail == "backend offline"));

        let rows = cache.read().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(mock.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_stale_reads_share_one_fetch() {
        let mock = backend_with_files();
        mock.set_list_delay(Duration::from_millis(50));
        let cache = ListingCache::new(mock.clone());
        let (a, b) = tokio::join!(cache.read(), cache.read());
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn joined_readers_share_the_failure() {
        let mock = backend_with_files();
        mock.set_list_delay(Duration::from_millis(50));
        mock.fail_next_list("fetch blew up");
        let cache = ListingCache::new(mock.clone());
        let (a, b) = tokio::join!(cache.read(), cache.read());
        assert!(matches!(a, Err(DrxError::Retrieval(_))));
        assert!(matches!(b, Err(DrxError::Retrieval(_))));
        assert_eq!(mock.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_discards_result_of_fetch_in_flight() {
        let mock = backend_with_files();
        mock.set_list_delay(Duration::from_millis(50));
        let cache = Arc::new(ListingCache::new(mock.clone()));

        let reader = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.read().await }
        });
        // Park the test until the reader is inside its fetch.
        tokio::time::sleep(Duration::from_millis(1)).await;
        cache.clear().await;

        // The detached fetch still resolves for its caller.
        let rows = reader.await.unwrap().unwrap();
        assert_eq!(rows.len(), 3);

        // Its result was not stored, so the next read fetches again.
        cache.read().await.unwrap();
        assert_eq!(mock.list_calls(), 2);
    }
}
