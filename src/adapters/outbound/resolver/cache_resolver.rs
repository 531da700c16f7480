use crate::build_info::domain::Checksum;
use crate::ports::outbound::{ChecksumCalculator, ChecksumResolver, PackageCache};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// CacheChecksumResolver adapter hashing archives found in a package cache
///
/// Hashing is blocking file I/O and runs on tokio's blocking pool so several
/// archives can be hashed at once.
pub struct CacheChecksumResolver<P, C> {
    cache: P,
    calculator: Arc<C>,
}

impl<P, C> CacheChecksumResolver<P, C>
where
    P: PackageCache,
    C: ChecksumCalculator + 'static,
{
    pub fn new(cache: P, calculator: C) -> Self {
        Self {
            cache,
            calculator: Arc::new(calculator),
        }
    }
}

#[async_trait]
impl<P, C> ChecksumResolver for CacheChecksumResolver<P, C>
where
    P: PackageCache,
    C: ChecksumCalculator + 'static,
{
    async fn resolve(&self, name: &str, version: &str) -> Result<Option<Checksum>> {
        let Some(path) = self.cache.locate(name, version) else {
            debug!(name, version, "Skipping checksum, package not in cache");
            return Ok(None);
        };

        let calculator = Arc::clone(&self.calculator);
        let checksum =
            tokio::task::spawn_blocking(move || calculator.calculate(&path)).await??;
        Ok(Some(checksum))
    }
}
