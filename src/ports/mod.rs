/// Ports module defining the interfaces between the application core and
/// infrastructure
///
/// Only driven (outbound) ports exist: the CLI calls use cases directly.
pub mod outbound;
