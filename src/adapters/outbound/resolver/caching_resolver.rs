use crate::build_info::domain::Checksum;
use crate::ports::outbound::ChecksumResolver;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    name: String,
    version: String,
}

impl CacheKey {
    fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// CachingChecksumResolver wraps a ChecksumResolver with an in-memory cache
///
/// The same package frequently appears under several roots of one build;
/// each `(name, version)` is hashed at most once per process. Misses are
/// cached too, so a package absent from the cache is probed once.
pub struct CachingChecksumResolver<R: ChecksumResolver> {
    inner: R,
    cache: Arc<DashMap<CacheKey, Option<Checksum>>>,
}

impl<R: ChecksumResolver> CachingChecksumResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: ChecksumResolver> ChecksumResolver for CachingChecksumResolver<R> {
    async fn resolve(&self, name: &str, version: &str) -> Result<Option<Checksum>> {
        let key = CacheKey::new(name, version);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        // Errors are not cached.
        let checksum = self.inner.resolve(name, version).await?;
        self.cache.insert(key, checksum.clone());
        Ok(checksum)
    }
}
