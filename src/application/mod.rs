/// Application layer - build lifecycle use cases and their DTOs
///
/// Use cases are generic over the outbound ports, so the CLI wires in the
/// filesystem adapters and tests wire in mocks.
pub mod dto;
pub mod use_cases;
