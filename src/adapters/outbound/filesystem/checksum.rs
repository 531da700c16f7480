use crate::build_info::domain::Checksum;
use crate::ports::outbound::ChecksumCalculator;
use crate::shared::error::BuildInfoError;
use crate::shared::Result;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// FileChecksumCalculator adapter hashing files in a single streaming pass
///
/// The three digests are fed from the same buffer, so arbitrarily large
/// archives are hashed without being loaded into memory.
pub struct FileChecksumCalculator;

impl FileChecksumCalculator {
    pub fn new() -> Self {
        Self
    }

    fn digest<R: Read>(mut reader: R) -> std::io::Result<Checksum> {
        let mut sha1 = Sha1::new();
        let mut md5 = md5::Context::new();
        let mut sha256 = Sha256::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            let chunk = &buffer[..read];
            sha1.update(chunk);
            md5.consume(chunk);
            sha256.update(chunk);
        }

        Ok(Checksum::new(
            hex::encode(sha1.finalize()),
            format!("{:x}", md5.compute()),
            hex::encode(sha256.finalize()),
        ))
    }
}

impl Default for FileChecksumCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecksumCalculator for FileChecksumCalculator {
    fn calculate(&self, path: &Path) -> Result<Checksum> {
        let read_error = |e: std::io::Error| BuildInfoError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        };
        let file = File::open(path).map_err(read_error)?;
        Ok(Self::digest(BufReader::new(file)).map_err(read_error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hello.txt");
        fs::write(&path, "hello world").unwrap();

        let checksum = FileChecksumCalculator::new().calculate(&path).unwrap();

        assert_eq!(checksum.sha1, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(checksum.md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
        assert_eq!(
            checksum.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty");
        fs::write(&path, "").unwrap();

        let checksum = FileChecksumCalculator::new().calculate(&path).unwrap();

        assert_eq!(checksum.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(checksum.md5, "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_content_larger_than_buffer() {
        let content = vec![b'x'; READ_BUFFER_SIZE * 2 + 17];
        let streamed = FileChecksumCalculator::digest(content.as_slice()).unwrap();

        assert_eq!(streamed.sha256, hex::encode(Sha256::digest(&content)));
        assert_eq!(streamed.md5, format!("{:x}", md5::compute(&content)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = FileChecksumCalculator::new().calculate(Path::new("/nonexistent/a.zip"));
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }
}
