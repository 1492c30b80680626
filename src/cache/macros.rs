/// Read-through caching over the Redis-backed [`Cache`](crate::cache::Cache).
///
/// Returns the cached value when one is present. Otherwise awaits `$block`,
/// queues the result for a background write with the given TTL, and returns it.
///
/// A failed cache read is logged and treated as a miss, so an unreachable Redis
/// only costs the cache, never the lookup. Errors from `$block` are returned
/// as-is and nothing is cached for them.
///
/// # Arguments
/// * `$cache`: a `Cache` (anything with `get_from_cache` and `set_in_background`).
/// * `$key`: the `CacheKey` to read and write.
/// * `$ttl`: time-to-live of the written value, in seconds.
/// * `$block`: a future computing the value on a miss.
///
/// # Example
/// ```rust,ignore
/// let poster: Option<String> = cached!(cache, CacheKey::Poster(title), 3600, async move {
///     fetch_poster(title).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            other => {
                if let Err(e) = other {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                }
                match $block.await {
                    Ok(value) => {
                        $cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::{
        cache::{create_redis_client, Cache, CacheKey},
        error::{AppError, AppResult},
    };

    fn unreachable_cache() -> (Cache, crate::cache::CacheWriterHandle) {
        Cache::new(create_redis_client("redis://127.0.0.1:1").unwrap())
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_through_to_block() {
        let (cache, handle) = unreachable_cache();

        let result: AppResult<Option<String>> = crate::cached!(
            cache,
            CacheKey::Poster("Avatar".to_string()),
            60,
            async { Ok::<_, AppError>(Some("https://posters.test/Avatar.jpg".to_string())) }
        );

        assert_eq!(
            result.unwrap().as_deref(),
            Some("https://posters.test/Avatar.jpg")
        );
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_block_error_is_returned() {
        let (cache, handle) = unreachable_cache();

        let result: AppResult<Option<String>> = crate::cached!(
            cache,
            CacheKey::Poster("Heat".to_string()),
            60,
            async { Err::<Option<String>, _>(AppError::ExternalApi("down".to_string())) }
        );

        assert!(matches!(result, Err(AppError::ExternalApi(_))));
        handle.shutdown().await;
    }
}
