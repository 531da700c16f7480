use crate::build_info::domain::{BuildCoordinates, ModuleType};
use chrono::Utc;

/// RecordRequest - Where a new fragment goes and what it is tagged with
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub coordinates: BuildCoordinates,
    /// Module the fragment belongs to; empty falls back to the build name
    pub module_id: String,
    pub module_type: ModuleType,
    /// Epoch milliseconds used to order fragments when merging
    pub timestamp: i64,
}

impl RecordRequest {
    pub fn new(
        coordinates: BuildCoordinates,
        module_id: impl Into<String>,
        module_type: ModuleType,
    ) -> Self {
        Self {
            coordinates,
            module_id: module_id.into(),
            module_type,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
