//! Property sources for fallback configuration
//!
//! Credentials may come from build properties instead of explicit flags.
//! The lookup is an injected [`PropertySource`] so the annotation task never
//! reaches into global state.

mod env;
mod properties;

pub use env::EnvProperties;
pub use properties::Properties;

use std::path::PathBuf;

/// Property holding the fallback Librato username
pub const USERNAME_PROPERTY: &str = "librato.username";

/// Property holding the fallback Librato password (API token)
pub const PASSWORD_PROPERTY: &str = "librato.password";

/// Read-only key/value lookup
pub trait PropertySource: Send + Sync {
    /// Value of `key`, or `None` when the key is not defined
    fn property(&self, key: &str) -> Option<String>;
}

/// Ordered chain of property sources; the first source defining a key wins
#[derive(Default)]
pub struct LayeredProperties {
    layers: Vec<Box<dyn PropertySource>>,
}

impl LayeredProperties {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower precedence than those already added
    #[must_use]
    pub fn with_layer(mut self, source: impl PropertySource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    /// Append a source with lower precedence than those already added
    pub fn push(&mut self, source: impl PropertySource + 'static) {
        self.layers.push(Box::new(source));
    }

    /// Number of layers in the chain
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the chain has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl PropertySource for LayeredProperties {
    fn property(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.property(key))
    }
}

/// Per-user properties file, `<config dir>/librato/librato.properties`
pub fn user_properties_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("librato").join("librato.properties"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_first_layer_wins() {
        let props = LayeredProperties::new()
            .with_layer(Properties::new().with(USERNAME_PROPERTY, "cli"))
            .with_layer(
                Properties::new()
                    .with(USERNAME_PROPERTY, "file")
                    .with(PASSWORD_PROPERTY, "secret"),
            );

        assert_eq!(props.property(USERNAME_PROPERTY).as_deref(), Some("cli"));
        assert_eq!(props.property(PASSWORD_PROPERTY).as_deref(), Some("secret"));
        assert_eq!(props.property("librato.other"), None);
    }

    #[test]
    fn test_empty_chain() {
        let props = LayeredProperties::new();
        assert!(props.is_empty());
        assert_eq!(props.property(USERNAME_PROPERTY), None);
    }

    #[test]
    #[serial]
    fn test_user_properties_path_file_name() {
        if let Some(path) = user_properties_path() {
            assert!(path.ends_with("librato/librato.properties"));
        }
    }
}
