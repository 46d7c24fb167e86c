use crate::client::files::FilesClient;
use crate::client::records::RecordsClient;
use crate::config::AppConfig;
use crate::utils::error::{KvDriveError, Result};
use crate::utils::validation::{validate_project_key, validate_resource_name, validate_url};

/// Which remote resource a connection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Records,
    Files,
}

impl ResourceKind {
    /// Configuration key the resource name is read from.
    pub const fn config_key(self) -> &'static str {
        match self {
            ResourceKind::Records => crate::config::RECORDS_NAME_VAR,
            ResourceKind::Files => crate::config::FILES_NAME_VAR,
        }
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Records => "records store",
            ResourceKind::Files => "files store",
        }
    }

    pub const fn default_host(self) -> &'static str {
        match self {
            ResourceKind::Records => "https://records.kvdrive.dev",
            ResourceKind::Files => "https://files.kvdrive.dev",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A validated resource descriptor: everything needed to build a wire client.
/// Explicit arguments win over the application configuration; validation runs
/// before any network traffic.
#[derive(Debug, Clone)]
pub struct Connection {
    pub kind: ResourceKind,
    pub project_key: String,
    pub project_id: String,
    pub name: String,
    pub host: String,
}

impl Connection {
    pub fn resolve(
        kind: ResourceKind,
        project_key: Option<&str>,
        name: Option<&str>,
        host: Option<&str>,
        config: Option<&AppConfig>,
    ) -> Result<Self> {
        let project_key = project_key
            .map(str::to_string)
            .or_else(|| config.and_then(|c| c.project_key.clone()))
            .ok_or_else(|| KvDriveError::MissingConfigError {
                field: crate::config::PROJECT_KEY_VAR.to_string(),
            })?;

        let name = name
            .map(str::to_string)
            .or_else(|| config.and_then(|c| c.resource_name(kind)))
            .ok_or_else(|| KvDriveError::MissingConfigError {
                field: kind.config_key().to_string(),
            })?;

        let host = host
            .map(str::to_string)
            .or_else(|| config.and_then(|c| c.resource_host(kind)))
            .unwrap_or_else(|| kind.default_host().to_string());

        validate_project_key("project_key", &project_key)?;
        validate_resource_name("name", &name)?;
        validate_url("host", &host)?;

        let project_id = project_key
            .split_once('_')
            .map(|(id, _)| id.to_string())
            .unwrap_or_else(|| project_key.clone());

        Ok(Self {
            kind,
            project_key,
            project_id,
            name,
            host,
        })
    }

    pub(crate) fn records_client(&self) -> RecordsClient {
        RecordsClient::new(&self.host, &self.project_id, &self.name, &self.project_key)
    }

    pub(crate) fn files_client(&self) -> FilesClient {
        FilesClient::new(&self.host, &self.project_id, &self.name, &self.project_key)
    }

    pub(crate) fn connection_error(&self, message: impl Into<String>) -> KvDriveError {
        KvDriveError::ConnectionError {
            kind: self.kind.type_name(),
            name: self.name.clone(),
            message: message.into(),
        }
    }
}
