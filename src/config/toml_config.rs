use crate::config::AppConfig;
use crate::utils::error::{KvDriveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub project: ProjectSection,
    pub records: Option<StoreSection>,
    pub files: Option<StoreSection>,
    pub server: Option<ServerSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub name: String,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub listen_addr: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(KvDriveError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| KvDriveError::ConfigValidationError {
            field: "toml".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_app_config(self) -> AppConfig {
        let (records_name, records_host) = match self.records {
            Some(section) => (Some(section.name), section.host),
            None => (None, None),
        };
        let (files_name, files_host) = match self.files {
            Some(section) => (Some(section.name), section.host),
            None => (None, None),
        };

        AppConfig {
            project_key: Some(self.project.key),
            records_name,
            files_name,
            records_host,
            files_host,
            listen_addr: self.server.and_then(|s| s.listen_addr),
        }
    }
}

/// Replace `${VAR_NAME}` with the environment value, leaving the placeholder
/// untouched when the variable is unset.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}
