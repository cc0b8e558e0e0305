//! Session record storage over the cache backend.
//!
//! One record per identity: the refresh token string last handed to that
//! identity, with a TTL equal to the refresh token's lifetime. The backend
//! provides last-write-wins semantics per key; no further ordering is
//! assumed.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use trafi_cache::keys;
use trafi_cache::provider::CacheManager;
use trafi_core::config::AuthConfig;
use trafi_core::error::AppError;
use trafi_core::result::AppResult;
use trafi_core::traits::CacheProvider;

/// TTL-bounded persistence for refresh-token session records.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Cache backend holding the records.
    cache: Arc<CacheManager>,
    /// Deadline applied to each store operation.
    op_timeout: Duration,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(cache: Arc<CacheManager>, config: &AuthConfig) -> Self {
        Self {
            cache,
            op_timeout: Duration::from_secs(config.store_op_timeout_seconds),
        }
    }

    /// Stores `token` as the currently valid refresh token for `identity`,
    /// overwriting any previous record. Failure (including a timed-out
    /// backend call) surfaces as `SessionPersist`.
    pub async fn put(&self, identity: &str, token: &str, ttl: Duration) -> AppResult<()> {
        let key = keys::refresh_token(identity);
        self.bounded("put", self.cache.set(&key, token, ttl))
            .await
            .map_err(|e| AppError::session_persist(format!("Failed to store session record: {e}")))
    }

    /// Fetches the stored refresh token for `identity`, if a live record
    /// exists. Backend errors propagate for the caller to classify.
    pub async fn get(&self, identity: &str) -> AppResult<Option<String>> {
        let key = keys::refresh_token(identity);
        self.bounded("get", self.cache.get(&key)).await
    }

    /// Deletes the session record for `identity`, revoking its refresh
    /// token ahead of TTL expiry.
    pub async fn delete(&self, identity: &str) -> AppResult<()> {
        let key = keys::refresh_token(identity);
        self.bounded("delete", self.cache.delete(&key)).await
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::cache(format!(
                "Session store {op} timed out after {:?}",
                self.op_timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafi_cache::memory::MemoryCacheProvider;
    use trafi_core::config::cache::MemoryCacheConfig;

    fn make_store() -> SessionStore {
        let provider = MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 100,
            time_to_live_seconds: 3600,
        });
        let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
        SessionStore::new(cache, &AuthConfig::for_tests("store-test-secret"))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = make_store();
        store
            .put("a@x.com", "token-1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("a@x.com").await.unwrap(),
            Some("token-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = make_store();
        store
            .put("a@x.com", "token-1", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .put("a@x.com", "token-2", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("a@x.com").await.unwrap(),
            Some("token-2".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = make_store();
        assert_eq!(store.get("nobody@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = make_store();
        store
            .put("a@x.com", "token-1", Duration::from_secs(60))
            .await
            .unwrap();
        store.delete("a@x.com").await.unwrap();
        assert_eq!(store.get("a@x.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_records_are_per_identity() {
        let store = make_store();
        store
            .put("a@x.com", "token-a", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .put("b@x.com", "token-b", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.get("a@x.com").await.unwrap(),
            Some("token-a".to_string())
        );
        assert_eq!(
            store.get("b@x.com").await.unwrap(),
            Some("token-b".to_string())
        );
    }
}
