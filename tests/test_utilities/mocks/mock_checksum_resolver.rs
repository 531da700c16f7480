use async_trait::async_trait;
use build_info_collector::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ChecksumResolver answering from a fixed table
#[derive(Default, Clone)]
pub struct MockChecksumResolver {
    checksums: HashMap<String, Checksum>,
    calls: Arc<AtomicUsize>,
}

impl MockChecksumResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checksum(mut self, name: &str, version: &str, sha1: &str) -> Self {
        self.checksums.insert(
            format!("{}:{}", name, version),
            Checksum::new(sha1, format!("md5-{}", name), format!("sha256-{}", name)),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChecksumResolver for MockChecksumResolver {
    async fn resolve(&self, name: &str, version: &str) -> Result<Option<Checksum>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.checksums.get(&format!("{}:{}", name, version)).cloned())
    }
}
