use crate::build_info::domain::{Artifact, Checksum, Dependency};

/// IdentityKey policy defining when two recorded entries are "the same"
///
/// Rules:
/// - artifacts collapse when name, sha1 and md5 are all equal
///   (`name-sha1-md5`); identical content recorded twice yields one entry
/// - dependencies collapse only when id, sha1, md5 and scopes are all equal;
///   the same id recorded with and without a checksum, or with a different
///   scope, stays as two entries
pub struct IdentityKey;

impl IdentityKey {
    pub fn artifact(artifact: &Artifact) -> String {
        let (sha1, md5) = Self::digests(artifact.checksum.as_ref());
        format!("{}-{}-{}", artifact.name, sha1, md5)
    }

    pub fn dependency(dependency: &Dependency) -> String {
        let (sha1, md5) = Self::digests(dependency.checksum.as_ref());
        format!(
            "{}{}{}{}",
            dependency.id,
            sha1,
            md5,
            dependency.scopes.join("")
        )
    }

    fn digests(checksum: Option<&Checksum>) -> (&str, &str) {
        checksum
            .map(|c| (c.sha1.as_str(), c.md5.as_str()))
            .unwrap_or(("", ""))
    }
}
