use crate::shared::error::BuildInfoError;
use crate::shared::Result;

/// ModulePathCodec encodes module paths for case-insensitive file systems
///
/// Go module caches store `github.com/BurntSushi/toml` as
/// `github.com/!burnt!sushi/toml`: every uppercase ASCII letter becomes `!`
/// followed by its lowercase form. Decoding is the exact inverse.
pub struct ModulePathCodec;

impl ModulePathCodec {
    pub fn encode(path: &str) -> String {
        let mut encoded = String::with_capacity(path.len());
        for c in path.chars() {
            if c.is_ascii_uppercase() {
                encoded.push('!');
                encoded.push(c.to_ascii_lowercase());
            } else {
                encoded.push(c);
            }
        }
        encoded
    }

    /// Decodes an encoded module path
    ///
    /// # Errors
    /// Returns an error if the input contains an uppercase letter, or a `!`
    /// that is not followed by a lowercase ASCII letter. Neither can be
    /// produced by [`ModulePathCodec::encode`].
    pub fn decode(encoded: &str) -> Result<String> {
        let mut decoded = String::with_capacity(encoded.len());
        let mut chars = encoded.chars();
        while let Some(c) = chars.next() {
            match c {
                '!' => match chars.next() {
                    Some(next) if next.is_ascii_lowercase() => {
                        decoded.push(next.to_ascii_uppercase())
                    }
                    _ => {
                        return Err(BuildInfoError::InvalidModulePath {
                            path: encoded.to_string(),
                            reason: "'!' must be followed by a lowercase letter".to_string(),
                        }
                        .into())
                    }
                },
                c if c.is_ascii_uppercase() => {
                    return Err(BuildInfoError::InvalidModulePath {
                        path: encoded.to_string(),
                        reason: format!("unexpected uppercase letter '{}'", c),
                    }
                    .into())
                }
                c => decoded.push(c),
            }
        }
        Ok(decoded)
    }
}
