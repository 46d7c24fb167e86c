use crate::client::{operation_error, resource_url, Paging, API_KEY_HEADER};
use crate::domain::model::Record;
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw bindings for the records store API. The base URL already carries the
/// project id and store name; every request authenticates with the project key.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct PutResponse {
    pub processed: ProcessedItems,

    #[serde(default)]
    pub failed: Option<FailedItems>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessedItems {
    #[serde(default)]
    pub items: Vec<Record>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FailedItems {
    #[serde(default)]
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub paging: Paging,

    #[serde(default)]
    pub items: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    limit: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<&'a str>,
}

impl RecordsClient {
    pub fn new(host: &str, project_id: &str, name: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: resource_url(host, project_id, name),
            api_key: api_key.to_string(),
        }
    }

    /// Upsert a batch of items. The service overwrites on key collision and
    /// assigns keys to items that have none.
    pub async fn put_items(&self, items: &[Value]) -> Result<PutResponse> {
        let url = format!("{}/items", self.base_url);
        tracing::debug!("PUT {} ({} items)", url, items.len());

        let response = self
            .http
            .put(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "items": items }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("records.put", response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        let url = format!("{}/items/{}", self.base_url, key);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(operation_error("records.get", response).await);
        }
        Ok(Some(response.json().await?))
    }

    pub async fn query(&self, limit: usize, last: Option<&str>) -> Result<QueryResponse> {
        let url = format!("{}/query", self.base_url);
        tracing::debug!("POST {} (limit {})", url, limit);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&QueryBody { limit, last })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("records.query", response).await);
        }
        Ok(response.json().await?)
    }

    /// Merge `set` into the stored item. The service rejects unknown keys.
    pub async fn patch_item(&self, key: &str, set: &Value) -> Result<()> {
        let url = format!("{}/items/{}", self.base_url, key);
        tracing::debug!("PATCH {}", url);

        let response = self
            .http
            .patch(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "set": set }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("records.update", response).await);
        }
        Ok(())
    }

    /// Always succeeds on the remote side, whether or not the key existed.
    pub async fn delete_item(&self, key: &str) -> Result<()> {
        let url = format!("{}/items/{}", self.base_url, key);
        tracing::debug!("DELETE {}", url);

        let response = self
            .http
            .delete(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("records.delete", response).await);
        }
        Ok(())
    }
}
