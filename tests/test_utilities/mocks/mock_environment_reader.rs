use build_info_collector::prelude::*;

/// Mock EnvironmentReader returning a fixed set of variables
#[derive(Default, Clone)]
pub struct MockEnvironmentReader {
    variables: Vec<(String, String)>,
}

impl MockEnvironmentReader {
    pub fn new(variables: &[(&str, &str)]) -> Self {
        Self {
            variables: variables
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentReader for MockEnvironmentReader {
    fn variables(&self) -> Vec<(String, String)> {
        self.variables.clone()
    }
}
