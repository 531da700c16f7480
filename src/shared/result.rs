/// Result alias used by every layer; errors carry context through `anyhow`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
