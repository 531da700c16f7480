use crate::build_info::domain::Checksum;
use crate::ports::outbound::ChecksumResolver;
use crate::shared::Result;
use async_trait::async_trait;
use tracing::debug;

/// OfflineChecksumResolver adapter used when no package cache is configured
///
/// Every lookup misses, so only checksums present in the tool output are used.
#[derive(Debug, Default)]
pub struct OfflineChecksumResolver;

impl OfflineChecksumResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChecksumResolver for OfflineChecksumResolver {
    async fn resolve(&self, name: &str, version: &str) -> Result<Option<Checksum>> {
        debug!(name, version, "No package cache configured");
        Ok(None)
    }
}
