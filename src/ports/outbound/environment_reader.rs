/// EnvironmentReader port for reading process environment variables
pub trait EnvironmentReader {
    /// Returns every variable visible to the process
    fn variables(&self) -> Vec<(String, String)>;
}
