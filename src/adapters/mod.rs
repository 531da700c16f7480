/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the file system, package caches,
/// the process environment and the console.
pub mod outbound;
