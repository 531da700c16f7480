/// Adapters reading state of the running process
mod environment_reader;

pub use environment_reader::ProcessEnvironmentReader;
