/// Filesystem adapters: fragment store, package caches, checksums and file I/O
mod checksum;
mod file_reader;
mod file_writer;
mod package_cache;
mod partial_store;

pub use checksum::FileChecksumCalculator;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use package_cache::{CacheLayout, CacheLocator};
pub use partial_store::{FileSystemPartialStore, DETAILS_FILE, PARTIALS_DIR};
