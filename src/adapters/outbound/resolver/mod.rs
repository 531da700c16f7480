/// Checksum resolution adapters backed by local package caches
mod cache_resolver;
mod caching_resolver;
mod offline_resolver;

pub use cache_resolver::CacheChecksumResolver;
pub use caching_resolver::CachingChecksumResolver;
pub use offline_resolver::OfflineChecksumResolver;
