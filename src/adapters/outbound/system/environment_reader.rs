use crate::ports::outbound::EnvironmentReader;

/// ProcessEnvironmentReader adapter reading `std::env::vars_os`
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub struct ProcessEnvironmentReader;

impl ProcessEnvironmentReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessEnvironmentReader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentReader for ProcessEnvironmentReader {
    fn variables(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_process_environment() {
        let variables = ProcessEnvironmentReader::new().variables();
        // cargo sets this for every test binary it runs
        assert!(variables
            .iter()
            .any(|(key, value)| key == "CARGO_MANIFEST_DIR" && !value.is_empty()));
    }
}
