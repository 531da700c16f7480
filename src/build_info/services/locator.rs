use crate::build_info::domain::DependencyId;
use crate::shared::Result;

const VIRTUAL_MARKER: &str = "@virtual:";
const NPM_PROTOCOL: &str = "npm:";

/// Locator helpers for tool-native package references (Yarn Berry style)
pub struct Locator;

impl Locator {
    /// Strips virtual package indirection from a locator
    ///
    /// `name@virtual:<opaque>#npm:version` becomes `name@npm:version`: the
    /// text before the first `@virtual:` and the text after the last `#`
    /// are kept byte for byte. Locators without `@virtual:` (or without a
    /// `#` after it) are returned unchanged.
    pub fn normalize(locator: &str) -> String {
        let Some(virtual_start) = locator.find(VIRTUAL_MARKER) else {
            return locator.to_string();
        };
        match locator.rfind('#') {
            Some(hash) if hash > virtual_start => {
                format!("{}@{}", &locator[..virtual_start], &locator[hash + 1..])
            }
            _ => locator.to_string(),
        }
    }

    /// Splits a normalized locator into its package name and reference
    ///
    /// The separator is the last `@` that is not the scope prefix of a
    /// scoped package (`@scope/pkg@npm:1.0.0`).
    pub fn split(locator: &str) -> (&str, Option<&str>) {
        match locator.rfind('@') {
            Some(at) if at > 0 => (&locator[..at], Some(&locator[at + 1..])),
            _ => (locator, None),
        }
    }

    /// Converts a locator into the canonical `name:version` identifier
    pub fn to_id(locator: &str) -> Result<DependencyId> {
        let normalized = Self::normalize(locator);
        let (name, reference) = Self::split(&normalized);
        let version = reference
            .map(|r| r.strip_prefix(NPM_PROTOCOL).unwrap_or(r))
            .unwrap_or("");
        DependencyId::new(name, version)
    }
}
