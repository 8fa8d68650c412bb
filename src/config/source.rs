//! Configuration sources for registry initialization.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{MessagingError, MessagingResult};

/// Section-oriented view of a configuration file.
///
/// Registry initialization reads a `services` section mapping service names
/// to section names, then one section per service carrying `host` and `port`.
pub trait ConfigSource {
    /// Whether the named section exists.
    fn has_section(&self, name: &str) -> bool;

    /// Read all key/value entries of the named section.
    ///
    /// Returns `None` if the section does not exist.
    fn read_section(&self, name: &str) -> Option<HashMap<String, String>>;
}

/// TOML-backed configuration source.
///
/// Each top-level table is a section; scalar values are exposed as strings.
#[derive(Debug, Clone)]
pub struct TomlConfig {
    table: toml::Table,
}

impl TomlConfig {
    /// Load a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> MessagingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| MessagingError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        Self::parse_named(&content, &path.display().to_string())
    }

    /// Parse a configuration from a TOML string.
    pub fn from_str(content: &str) -> MessagingResult<Self> {
        Self::parse_named(content, "<inline>")
    }

    fn parse_named(content: &str, origin: &str) -> MessagingResult<Self> {
        let table: toml::Table = content.parse().map_err(|e| MessagingError::Config {
            message: format!("Failed to parse config '{}': {}", origin, e),
        })?;

        Ok(Self { table })
    }
}

impl ConfigSource for TomlConfig {
    fn has_section(&self, name: &str) -> bool {
        matches!(self.table.get(name), Some(toml::Value::Table(_)))
    }

    fn read_section(&self, name: &str) -> Option<HashMap<String, String>> {
        let Some(toml::Value::Table(section)) = self.table.get(name) else {
            return None;
        };

        let mut entries = HashMap::new();
        for (key, value) in section {
            match value {
                toml::Value::String(s) => {
                    entries.insert(key.clone(), s.clone());
                }
                toml::Value::Integer(i) => {
                    entries.insert(key.clone(), i.to_string());
                }
                toml::Value::Float(f) => {
                    entries.insert(key.clone(), f.to_string());
                }
                toml::Value::Boolean(b) => {
                    entries.insert(key.clone(), b.to_string());
                }
                other => {
                    debug!(
                        section = name,
                        key = %key,
                        kind = other.type_str(),
                        "Skipping non-scalar config value"
                    );
                }
            }
        }

        Some(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [services]
        echo_service = "echo"

        [echo]
        host = "127.0.0.1"
        port = 9000
    "#;

    #[test]
    fn test_has_section() {
        let config = TomlConfig::from_str(SAMPLE).unwrap();
        assert!(config.has_section("services"));
        assert!(config.has_section("echo"));
        assert!(!config.has_section("missing"));
    }

    #[test]
    fn test_read_section_stringifies_scalars() {
        let config = TomlConfig::from_str(SAMPLE).unwrap();
        let section = config.read_section("echo").unwrap();
        assert_eq!(section.get("host").map(String::as_str), Some("127.0.0.1"));
        assert_eq!(section.get("port").map(String::as_str), Some("9000"));
    }

    #[test]
    fn test_read_missing_section_is_none() {
        let config = TomlConfig::from_str(SAMPLE).unwrap();
        assert!(config.read_section("missing").is_none());
    }

    #[test]
    fn test_invalid_toml_fails() {
        let result = TomlConfig::from_str("not [ valid = toml");
        assert!(matches!(result, Err(MessagingError::Config { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messaging.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = TomlConfig::load(&path).unwrap();
        assert!(config.has_section("services"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = TomlConfig::load("/nonexistent/messaging.toml");
        assert!(matches!(result, Err(MessagingError::Config { .. })));
    }
}
