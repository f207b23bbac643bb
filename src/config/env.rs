//! Environment-backed properties

use crate::config::PropertySource;
use std::env;

/// Reads properties from environment variables
///
/// `librato.username` is looked up as `LIBRATO_USERNAME`: the key is
/// upper-cased and `.`/`-` become `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProperties;

impl EnvProperties {
    /// Environment variable name for a property key
    pub fn var_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl PropertySource for EnvProperties {
    fn property(&self, key: &str) -> Option<String> {
        env::var(Self::var_name(key)).ok()
    }
}
