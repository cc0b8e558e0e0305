//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;

use trafi_core::config::cache::MemoryCacheConfig;
use trafi_core::result::AppResult;
use trafi_core::traits::cache::CacheProvider;

/// A cached value with its absolute expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache provider using moka.
///
/// Per-entry TTLs are enforced lazily on read; the cache-level TTL set at
/// construction time acts as an upper bound for eviction.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, Entry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }

    async fn live_entry(&self, key: &str) -> Option<Entry> {
        let entry = self.cache.get(key).await?;
        if entry.expires_at <= Instant::now() {
            self.cache.remove(key).await;
            return None;
        }
        Some(entry)
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_overwrite_last_write_wins() {
        let provider = make_provider();
        provider
            .set("key1", "first", Duration::from_secs(60))
            .await
            .unwrap();
        provider
            .set("key1", "second", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            provider.get("key1").await.unwrap(),
            Some("second".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let provider = make_provider();
        provider
            .set("ephemeral", "value", Duration::from_millis(0))
            .await
            .unwrap();
        assert_eq!(provider.get("ephemeral").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
