use crate::build_info::domain::BuildCoordinates;
use crate::build_info::services::BuildIdentity;

/// PublishRequest - Input of the build-info assembly use case
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub coordinates: BuildCoordinates,
    pub identity: BuildIdentity,
    /// Include patterns for environment properties; empty keeps everything
    pub env_include: Vec<String>,
    /// Exclude patterns for environment properties
    pub env_exclude: Vec<String>,
}

impl PublishRequest {
    pub fn new(coordinates: BuildCoordinates, identity: BuildIdentity) -> Self {
        Self {
            coordinates,
            identity,
            env_include: Vec::new(),
            env_exclude: Vec::new(),
        }
    }

    pub fn with_env_patterns(mut self, include: Vec<String>, exclude: Vec<String>) -> Self {
        self.env_include = include;
        self.env_exclude = exclude;
        self
    }
}
