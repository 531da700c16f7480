use serde::{Deserialize, Serialize};

/// Checksum value object holding the content digests of a file
///
/// `sha1` is the primary digest, `md5` the legacy one and `sha256` the
/// secondary one. All values are lowercase hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub md5: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha256: String,
}

impl Checksum {
    pub fn new(sha1: impl Into<String>, md5: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            sha1: sha1.into(),
            md5: md5.into(),
            sha256: sha256.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sha1.is_empty() && self.md5.is_empty() && self.sha256.is_empty()
    }
}
