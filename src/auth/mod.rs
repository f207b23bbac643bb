//! Librato credentials
//!
//! Username and password (API token) are taken from an explicit value first,
//! then from a fallback property.

use crate::config::PropertySource;
use crate::error::{Error, Result};
use std::fmt;

/// Where a credential value was obtained from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Set directly on the task (flag or builder)
    Explicit,
    /// Read from a fallback property
    Property,
}

/// A resolved credential value
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// The value itself
    pub value: String,
    /// Where the value came from
    pub source: AuthSource,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a credential
///
/// Priority:
/// 1. explicit value
/// 2. property `key`
///
/// Fails with `"{field} is not set"` when neither is present.
pub fn resolve_credential(
    explicit: Option<&str>,
    props: &dyn PropertySource,
    key: &str,
    field: &str,
) -> Result<Credential> {
    if let Some(value) = explicit {
        return Ok(Credential {
            value: value.to_string(),
            source: AuthSource::Explicit,
        });
    }

    if let Some(value) = props.property(key) {
        return Ok(Credential {
            value,
            source: AuthSource::Property,
        });
    }

    Err(Error::not_set(field))
}

/// Basic-auth credentials for the Librato API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Librato account email
    pub username: String,
    /// Librato API token
    pub password: String,
}

impl Credentials {
    /// Create a credentials pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Properties, USERNAME_PROPERTY};

    #[test]
    fn test_explicit_beats_property() {
        let props = Properties::new().with(USERNAME_PROPERTY, "prop-user");
        let cred = resolve_credential(Some("cli-user"), &props, USERNAME_PROPERTY, "Username")
            .unwrap();
        assert_eq!(cred.value, "cli-user");
        assert_eq!(cred.source, AuthSource::Explicit);
    }

    #[test]
    fn test_property_fallback() {
        let props = Properties::new().with(USERNAME_PROPERTY, "prop-user");
        let cred = resolve_credential(None, &props, USERNAME_PROPERTY, "Username").unwrap();
        assert_eq!(cred.value, "prop-user");
        assert_eq!(cred.source, AuthSource::Property);
    }

    #[test]
    fn test_missing_everywhere() {
        let err = resolve_credential(None, &Properties::new(), USERNAME_PROPERTY, "Username")
            .unwrap_err();
        assert_eq!(err.to_string(), "Username is not set");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("ops@example.com", "s3cret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ops@example.com"));
        assert!(!rendered.contains("s3cret"));

        let cred = Credential {
            value: "s3cret".into(),
            source: AuthSource::Property,
        };
        assert!(!format!("{cred:?}").contains("s3cret"));
    }
}
