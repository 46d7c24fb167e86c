// Configuration providers: environment variables and a TOML file. Adapters
// fall back to these values when no explicit argument is given.

pub mod toml_config;

use crate::core::connect::ResourceKind;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

pub const PROJECT_KEY_VAR: &str = "KVDRIVE_PROJECT_KEY";
pub const RECORDS_NAME_VAR: &str = "KVDRIVE_RECORDS_NAME";
pub const FILES_NAME_VAR: &str = "KVDRIVE_FILES_NAME";
pub const RECORDS_HOST_VAR: &str = "KVDRIVE_RECORDS_HOST";
pub const FILES_HOST_VAR: &str = "KVDRIVE_FILES_HOST";
pub const LISTEN_ADDR_VAR: &str = "KVDRIVE_LISTEN_ADDR";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Flat application configuration. Every field is optional here; whether a
/// missing value is an error depends on who needs it (an adapter without its
/// resource name, for example).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub project_key: Option<String>,
    pub records_name: Option<String>,
    pub files_name: Option<String>,
    pub records_host: Option<String>,
    pub files_host: Option<String>,
    pub listen_addr: Option<String>,
}

impl AppConfig {
    /// Read every `KVDRIVE_*` variable from the environment. Absent variables
    /// stay unset and only fail later, when something actually needs them.
    pub fn from_env() -> Self {
        Self {
            project_key: env::var(PROJECT_KEY_VAR).ok(),
            records_name: env::var(RECORDS_NAME_VAR).ok(),
            files_name: env::var(FILES_NAME_VAR).ok(),
            records_host: env::var(RECORDS_HOST_VAR).ok(),
            files_host: env::var(FILES_HOST_VAR).ok(),
            listen_addr: env::var(LISTEN_ADDR_VAR).ok(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(toml_config::TomlConfig::from_file(path)?.into_app_config())
    }

    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }

    pub(crate) fn resource_name(&self, kind: ResourceKind) -> Option<String> {
        match kind {
            ResourceKind::Records => self.records_name.clone(),
            ResourceKind::Files => self.files_name.clone(),
        }
    }

    pub(crate) fn resource_host(&self, kind: ResourceKind) -> Option<String> {
        match kind {
            ResourceKind::Records => self.records_host.clone(),
            ResourceKind::Files => self.files_host.clone(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(key) = &self.project_key {
            validation::validate_project_key("project_key", key)?;
        }
        if let Some(name) = &self.records_name {
            validation::validate_resource_name("records_name", name)?;
        }
        if let Some(name) = &self.files_name {
            validation::validate_resource_name("files_name", name)?;
        }
        if let Some(host) = &self.records_host {
            validation::validate_url("records_host", host)?;
        }
        if let Some(host) = &self.files_host {
            validation::validate_url("files_host", host)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_picks_up_set_variables() {
        env::set_var(PROJECT_KEY_VAR, "envtest_secret");
        env::set_var(RECORDS_NAME_VAR, "env-users");

        let config = AppConfig::from_env();

        assert_eq!(config.project_key.as_deref(), Some("envtest_secret"));
        assert_eq!(config.records_name.as_deref(), Some("env-users"));

        env::remove_var(PROJECT_KEY_VAR);
        env::remove_var(RECORDS_NAME_VAR);
    }

    #[test]
    fn test_listen_addr_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listen_addr(), DEFAULT_LISTEN_ADDR);

        let config = AppConfig {
            listen_addr: Some("0.0.0.0:9000".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.listen_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_validate_rejects_a_bad_host() {
        let config = AppConfig {
            project_key: Some("test_key".to_string()),
            records_host: Some("not-a-url".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_an_empty_config() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
