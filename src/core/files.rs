use crate::client::files::FilesClient;
use crate::config::AppConfig;
use crate::core::connect::{Connection, ResourceKind};
use crate::domain::model::{DeleteResult, FileListing, FileSource};
use crate::utils::error::{KvDriveError, Result};
use bytes::Bytes;

pub const DEFAULT_LIST_LIMIT: usize = 1000;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Adapter for one files store. Same lifecycle as the records adapter: open
/// validates, builds the wire client, and probes once; afterwards the handle is
/// read-only and cheap to share.
#[derive(Debug, Clone)]
pub struct FileStore {
    connection: Connection,
    client: FilesClient,
}

impl FileStore {
    pub async fn open(
        project_key: Option<&str>,
        name: Option<&str>,
        host: Option<&str>,
    ) -> Result<Self> {
        let connection = Connection::resolve(ResourceKind::Files, project_key, name, host, None)?;
        Self::connect(connection).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let connection = Connection::resolve(ResourceKind::Files, None, None, None, Some(config))?;
        Self::connect(connection).await
    }

    async fn connect(connection: Connection) -> Result<Self> {
        let client = connection.files_client();
        if let Err(e) = client.list(1, None, None).await {
            tracing::error!(
                "connection probe for {} '{}' failed: {}",
                connection.kind,
                connection.name,
                e
            );
            return Err(connection.connection_error(e.to_string()));
        }
        tracing::debug!("opened {} '{}'", connection.kind, connection.name);
        Ok(Self { connection, client })
    }

    /// Name of the store this adapter is bound to.
    pub fn name(&self) -> &str {
        &self.connection.name
    }

    /// First page of file names, at most `limit` (default 1000), optionally
    /// restricted to names starting with `prefix`. Order is whatever the
    /// service returns.
    pub async fn list(&self, limit: Option<usize>, prefix: Option<&str>) -> Result<FileListing> {
        let response = self
            .client
            .list(limit.unwrap_or(DEFAULT_LIST_LIMIT), prefix, None)
            .await?;
        Ok(FileListing {
            names: response.names,
            last: response.paging.last,
        })
    }

    /// `Ok(None)` when the file does not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Bytes>> {
        self.client.download(name).await
    }

    /// Upload a file from memory or local disk, overwriting any existing file
    /// of the same name. Returns the stored name.
    pub async fn write(
        &self,
        name: &str,
        source: FileSource,
        content_type: Option<&str>,
    ) -> Result<String> {
        let data = match source {
            FileSource::Bytes(data) => data,
            FileSource::Path(path) => Bytes::from(tokio::fs::read(&path).await?),
        };
        self.client
            .upload(name, data, content_type.unwrap_or(DEFAULT_CONTENT_TYPE))
            .await
    }

    /// Returns the deleted name. Deleting an absent file is a success,
    /// matching the remote; only a service-reported failure is an error.
    pub async fn delete(&self, name: &str) -> Result<String> {
        let result = self.client.delete_many(&[name.to_string()]).await?;
        if let Some(reason) = result.failed.get(name) {
            return Err(KvDriveError::OperationError {
                operation: "files.delete",
                message: format!("could not delete '{}': {}", name, reason),
            });
        }
        Ok(name.to_string())
    }

    pub async fn delete_many(&self, names: &[String]) -> Result<DeleteResult> {
        self.client.delete_many(names).await
    }
}
