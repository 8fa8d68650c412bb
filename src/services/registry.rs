//! Service registry.
//!
//! Built once from configuration, read-only afterwards.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ConfigSource;
use crate::error::{MessagingError, MessagingResult};

/// Configuration section listing the registered services.
const KEY_SERVICES: &str = "services";
/// Host key within a service section.
const KEY_HOST: &str = "host";
/// Port key within a service section.
const KEY_PORT: &str = "port";

/// Network location of a named service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    name: String,
    host: String,
    port: u16,
}

impl ServiceInfo {
    /// Create a service description. The port must be non-zero.
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// The logical service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host the service listens on.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port the service listens on.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Registry of all configured services.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceInfo>,
}

impl ServiceRegistry {
    /// Build a registry from the `services` section of a configuration.
    ///
    /// Each entry in `services` maps a service name to a section name; that
    /// section must carry `host` and a `port` in 1-65535. Entries missing
    /// either are skipped. Fails when no service registers at all.
    pub fn from_config(config: &impl ConfigSource) -> MessagingResult<Self> {
        debug!("Reading service configuration");

        if !config.has_section(KEY_SERVICES) {
            return Err(MessagingError::Config {
                message: "no services section in configuration".to_string(),
            });
        }
        let entries = config.read_section(KEY_SERVICES).unwrap_or_default();

        let mut registry = Self {
            services: HashMap::new(),
        };

        for (service_name, section_name) in &entries {
            let Some(section) = config.read_section(section_name) else {
                debug!(
                    service = %service_name,
                    section = %section_name,
                    "Service section missing, skipping"
                );
                continue;
            };

            let (Some(host), Some(port)) = (section.get(KEY_HOST), section.get(KEY_PORT)) else {
                debug!(service = %service_name, "Service section missing host or port, skipping");
                continue;
            };

            let port = match port.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => {
                    debug!(service = %service_name, port = %port, "Invalid service port, skipping");
                    continue;
                }
            };

            registry.register(ServiceInfo::new(service_name.clone(), host.clone(), port));
        }

        if registry.services.is_empty() {
            return Err(MessagingError::Config {
                message: "no services registered".to_string(),
            });
        }

        info!(count = registry.services.len(), "Service registry initialized");
        Ok(registry)
    }

    /// Register a service definition.
    fn register(&mut self, info: ServiceInfo) {
        self.services.insert(info.name().to_string(), info);
    }

    /// Whether the named service is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Resolve a service name to its network location.
    pub fn resolve(&self, name: &str) -> MessagingResult<&ServiceInfo> {
        self.services
            .get(name)
            .ok_or_else(|| MessagingError::UnknownService {
                service: name.to_string(),
            })
    }

    /// The count of registered services.
    pub fn count(&self) -> usize {
        self.services.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlConfig;

    #[test]
    fn test_registry_from_config() {
        let config = TomlConfig::from_str(
            r#"
            [services]
            echo_service = "echo"
            time_service = "time"

            [echo]
            host = "127.0.0.1"
            port = 9000

            [time]
            host = "10.0.0.5"
            port = 9001
            "#,
        )
        .unwrap();

        let registry = ServiceRegistry::from_config(&config).unwrap();
        assert_eq!(registry.count(), 2);
        assert!(registry.is_registered("echo_service"));

        let info = registry.resolve("echo_service").unwrap();
        assert_eq!(info.name(), "echo_service");
        assert_eq!(info.host(), "127.0.0.1");
        assert_eq!(info.port(), 9000);
    }

    #[test]
    fn test_missing_services_section_fails() {
        let config = TomlConfig::from_str("[other]\nkey = \"value\"\n").unwrap();
        let result = ServiceRegistry::from_config(&config);
        assert!(matches!(result, Err(MessagingError::Config { .. })));
    }

    #[test]
    fn test_zero_registered_services_fails() {
        // The services section parses, but every entry is unusable.
        let config = TomlConfig::from_str(
            r#"
            [services]
            echo_service = "missing_section"
            "#,
        )
        .unwrap();

        let result = ServiceRegistry::from_config(&config);
        assert!(matches!(result, Err(MessagingError::Config { .. })));
    }

    #[test]
    fn test_incomplete_entries_are_skipped() {
        let config = TomlConfig::from_str(
            r#"
            [services]
            no_port = "half"
            bad_port = "bad"
            good = "good"

            [half]
            host = "127.0.0.1"

            [bad]
            host = "127.0.0.1"
            port = 70000

            [good]
            host = "127.0.0.1"
            port = 9000
            "#,
        )
        .unwrap();

        let registry = ServiceRegistry::from_config(&config).unwrap();
        assert_eq!(registry.count(), 1);
        assert!(registry.is_registered("good"));
        assert!(!registry.is_registered("no_port"));
        assert!(!registry.is_registered("bad_port"));
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let config = TomlConfig::from_str(
            r#"
            [services]
            zero = "zero"

            [zero]
            host = "127.0.0.1"
            port = 0
            "#,
        )
        .unwrap();

        let result = ServiceRegistry::from_config(&config);
        assert!(matches!(result, Err(MessagingError::Config { .. })));
    }

    #[test]
    fn test_resolve_unknown_service() {
        let config = TomlConfig::from_str(
            r#"
            [services]
            echo_service = "echo"

            [echo]
            host = "127.0.0.1"
            port = 9000
            "#,
        )
        .unwrap();

        let registry = ServiceRegistry::from_config(&config).unwrap();
        let result = registry.resolve("unknown_service");
        assert!(matches!(
            result,
            Err(MessagingError::UnknownService { .. })
        ));
    }
}
