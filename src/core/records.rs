use crate::client::records::RecordsClient;
use crate::config::AppConfig;
use crate::core::connect::{Connection, ResourceKind};
use crate::domain::model::{Expiry, Record};
use crate::utils::error::{KvDriveError, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const DEFAULT_READ_LIMIT: usize = 1000;

/// The remote API caps bulk puts per call; the official clients enforce it
/// before sending.
pub const MAX_PUT_ITEMS: usize = 25;

/// Adapter for one records store. Opening it validates the configuration,
/// builds the wire client, and probes the service once; after that the handle
/// is never mutated, so the adapter is cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    connection: Connection,
    client: RecordsClient,
}

impl RecordStore {
    pub async fn open(
        project_key: Option<&str>,
        name: Option<&str>,
        host: Option<&str>,
    ) -> Result<Self> {
        let connection =
            Connection::resolve(ResourceKind::Records, project_key, name, host, None)?;
        Self::connect(connection).await
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let connection =
            Connection::resolve(ResourceKind::Records, None, None, None, Some(config))?;
        Self::connect(connection).await
    }

    async fn connect(connection: Connection) -> Result<Self> {
        let client = connection.records_client();
        if let Err(e) = client.query(1, None).await {
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

    /// Store a record, overwriting any existing record with the same key. The
    /// server assigns a key when neither the record nor `key` carries one.
    /// Returns the stored record.
    pub async fn create(
        &self,
        record: Record,
        key: Option<&str>,
        expiry: Option<Expiry>,
    ) -> Result<Record> {
        let mut record = record;
        if let Some(key) = key {
            record.key = Some(key.to_string());
        }

        let mut stored = self.create_many(vec![record], expiry).await?;
        stored.pop().ok_or_else(|| KvDriveError::OperationError {
            operation: "records.put",
            message: "remote did not return the stored record".to_string(),
        })
    }

    /// Bulk upsert of up to [`MAX_PUT_ITEMS`] records. Atomicity is whatever
    /// the remote service provides.
    pub async fn create_many(
        &self,
        records: Vec<Record>,
        expiry: Option<Expiry>,
    ) -> Result<Vec<Record>> {
        if records.len() > MAX_PUT_ITEMS {
            return Err(KvDriveError::OperationError {
                operation: "records.put",
                message: format!(
                    "cannot store more than {} items per call (got {})",
                    MAX_PUT_ITEMS,
                    records.len()
                ),
            });
        }

        let items = records
            .into_iter()
            .map(|record| to_item(record, expiry))
            .collect::<Result<Vec<_>>>()?;

        let response = self.client.put_items(&items).await?;
        if let Some(failed) = &response.failed {
            if !failed.items.is_empty() {
                return Err(KvDriveError::OperationError {
                    operation: "records.put",
                    message: format!("remote rejected {} of the submitted items", failed.items.len()),
                });
            }
        }
        Ok(response.processed.items)
    }

    /// `Ok(None)` when the key does not exist.
    pub async fn read(&self, key: &str) -> Result<Option<Record>> {
        self.client.get_item(key).await
    }

    /// First page of records, at most `limit` (default 1000). Order is
    /// whatever the service returns.
    pub async fn read_all(&self, limit: Option<usize>) -> Result<Vec<Record>> {
        let response = self
            .client
            .query(limit.unwrap_or(DEFAULT_READ_LIMIT), None)
            .await?;
        Ok(response.items)
    }

    /// Merge-style partial update. Updating an unknown key is an operation
    /// error; the remote rejects it.
    pub async fn update(
        &self,
        key: &str,
        updates: HashMap<String, Value>,
        expiry: Option<Expiry>,
    ) -> Result<()> {
        let mut set = serde_json::to_value(&updates)?;
        if let Some(expiry) = expiry {
            if let Value::Object(map) = &mut set {
                map.insert("__expires".to_string(), Value::from(expiry.unix_timestamp()));
            }
        }
        self.client.patch_item(key, &set).await
    }

    /// Deleting a key that does not exist is a success, matching the remote.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client.delete_item(key).await
    }
}

fn to_item(record: Record, expiry: Option<Expiry>) -> Result<Value> {
    let mut item = serde_json::to_value(&record)?;
    if let Some(expiry) = expiry {
        if let Value::Object(map) = &mut item {
            map.insert("__expires".to_string(), Value::from(expiry.unix_timestamp()));
        }
    }
    Ok(item)
}
