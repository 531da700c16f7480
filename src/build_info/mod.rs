/// Build-info domain layer
///
/// Value objects, identity rules and the pure graph/merge algorithms.
/// Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
