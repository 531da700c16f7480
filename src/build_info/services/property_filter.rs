use crate::shared::error::BuildInfoError;
use crate::shared::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;

/// Prefix under which environment variables are stored in build properties
pub const ENV_PREFIX: &str = "buildInfo.env.";

/// Exclude patterns applied when no explicit list is configured
pub const DEFAULT_ENV_EXCLUDE: &[&str] = &[
    "*password*",
    "*psw*",
    "*secret*",
    "*key*",
    "*token*",
    "*auth*",
];

/// Maximum number of patterns per list to prevent DoS attacks
const MAX_PATTERNS: usize = 64;

/// Maximum length of a single pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// PropertyFilter - Include/exclude filtering of build properties
///
/// Patterns use standard glob syntax (`*`, `?`, `[...]`) and match
/// case-insensitively against the property name with the
/// [`ENV_PREFIX`] stripped. The include list is applied first (an empty
/// include list keeps everything), then the exclude list.
#[derive(Debug)]
pub struct PropertyFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl PropertyFilter {
    /// Compiles the include and exclude pattern lists
    ///
    /// # Errors
    /// Returns [`BuildInfoError::InvalidPattern`] if any pattern is empty,
    /// too long, or not a valid glob, or if a list is too long.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Filter keeping everything except the default sensitive-name patterns
    pub fn with_default_excludes() -> Result<Self> {
        let exclude: Vec<String> = DEFAULT_ENV_EXCLUDE.iter().map(|p| p.to_string()).collect();
        Self::new(&[], &exclude)
    }

    pub fn filter(&self, properties: BTreeMap<String, String>) -> BTreeMap<String, String> {
        let included: BTreeMap<String, String> = match &self.include {
            Some(include) => properties
                .into_iter()
                .filter(|(key, _)| include.is_match(match_name(key)))
                .collect(),
            None => properties,
        };

        match &self.exclude {
            Some(exclude) => included
                .into_iter()
                .filter(|(key, _)| !exclude.is_match(match_name(key)))
                .collect(),
            None => included,
        }
    }
}

/// Collects environment variables under the [`ENV_PREFIX`]
pub fn collect_env<I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .map(|(key, value)| (format!("{}{}", ENV_PREFIX, key), value))
        .collect()
}

fn match_name(key: &str) -> &str {
    key.strip_prefix(ENV_PREFIX).unwrap_or(key)
}

fn compile(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    if patterns.len() > MAX_PATTERNS {
        return Err(BuildInfoError::InvalidPattern {
            pattern: format!("{} patterns", patterns.len()),
            details: format!("Too many patterns (maximum: {})", MAX_PATTERNS),
        }
        .into());
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        validate_pattern(pattern)?;
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(false)
            .build()
            .map_err(|e| BuildInfoError::InvalidPattern {
                pattern: pattern.clone(),
                details: e.to_string(),
            })?;
        builder.add(glob);
    }

    let set = builder.build().map_err(|e| BuildInfoError::InvalidPattern {
        pattern: patterns.join(";"),
        details: e.to_string(),
    })?;
    Ok(Some(set))
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(BuildInfoError::InvalidPattern {
            pattern: pattern.to_string(),
            details: "Pattern cannot be empty".to_string(),
        }
        .into());
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(BuildInfoError::InvalidPattern {
            pattern: pattern.to_string(),
            details: format!(
                "Pattern is too long ({} chars). Maximum: {} chars",
                pattern.len(),
                MAX_PATTERN_LENGTH
            ),
        }
        .into());
    }

    Ok(())
}
