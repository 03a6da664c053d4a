//! Redis-backed edge cache for rendered preview images.

use bytes::Bytes;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use locator_common::{LocatorError, LocatorResult};

/// Public cache lifetime for rendered previews (12 hours).
pub const PREVIEW_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Redis preview cache client.
pub struct PreviewCache {
    conn: MultiplexedConnection,
    default_ttl: Duration,
}

impl PreviewCache {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str) -> LocatorResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| LocatorError::Cache(format!("Redis connection failed: {}", e)))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| LocatorError::Cache(format!("Redis connection failed: {}", e)))?;

        Ok(Self {
            conn,
            default_ttl: PREVIEW_TTL,
        })
    }

    /// Get a cached preview image.
    pub async fn get(&mut self, key: &PreviewCacheKey) -> LocatorResult<Option<Bytes>> {
        let key_str = key.to_string();

        let result: Option<Vec<u8>> = self
            .conn
            .get(&key_str)
            .await
            .map_err(|e| LocatorError::Cache(format!("Cache get failed: {}", e)))?;

        Ok(result.map(Bytes::from))
    }

    /// Store a preview image. At-least-once, last writer wins.
    pub async fn put(
        &mut self,
        key: &PreviewCacheKey,
        data: &[u8],
        ttl: Option<Duration>,
    ) -> LocatorResult<()> {
        let key_str = key.to_string();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let _: () = self
            .conn
            .set_ex(&key_str, data, ttl.as_secs())
            .await
            .map_err(|e| LocatorError::Cache(format!("Cache put failed: {}", e)))?;

        debug!(key = %key_str, bytes = data.len(), "Cached preview");
        Ok(())
    }
}

/// Cache key derived from the normalized preview request parameters.
///
/// Identical validated requests always produce identical keys, so a repeat
/// request within the TTL is a byte-identical hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewCacheKey {
    pub kind: String,
    pub item: String,
    pub store_id: Option<String>,
    pub cache_bust: Option<String>,
}

impl std::fmt::Display for PreviewCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "og:{}:{}:{}:{}",
            self.kind,
            self.item,
            self.store_id.as_deref().unwrap_or("global"),
            self.cache_bust.as_deref().unwrap_or("0")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_format() {
        let key = PreviewCacheKey {
            kind: "map_store".to_string(),
            item: "blahaj".to_string(),
            store_id: Some("156".to_string()),
            cache_bust: Some("0016fa3c".to_string()),
        };

        assert_eq!(key.to_string(), "og:map_store:blahaj:156:0016fa3c");
    }

    #[test]
    fn test_cache_key_defaults() {
        let key = PreviewCacheKey {
            kind: "map_global".to_string(),
            item: "smolhaj".to_string(),
            store_id: None,
            cache_bust: None,
        };

        assert_eq!(key.to_string(), "og:map_global:smolhaj:global:0");
    }

    #[test]
    fn test_identical_requests_share_a_key() {
        let a = PreviewCacheKey {
            kind: "map_store".to_string(),
            item: "blahaj".to_string(),
            store_id: Some("063".to_string()),
            cache_bust: None,
        };
        let b = a.clone();

        assert_eq!(a.to_string(), b.to_string());
    }
}
