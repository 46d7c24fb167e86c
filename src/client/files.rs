use crate::client::{operation_error, resource_url, Paging, API_KEY_HEADER};
use crate::domain::model::DeleteResult;
use crate::utils::error::Result;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Raw bindings for the files store API.
#[derive(Debug, Clone)]
pub struct FilesClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub paging: Paging,

    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    name: String,
}

impl FilesClient {
    pub fn new(host: &str, project_id: &str, name: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: resource_url(host, project_id, name),
            api_key: api_key.to_string(),
        }
    }

    /// Single-shot upload; overwrites an existing file of the same name.
    pub async fn upload(&self, name: &str, data: Bytes, content_type: &str) -> Result<String> {
        let url = format!("{}/files", self.base_url);
        tracing::debug!("POST {} (name {}, {} bytes)", url, name, data.len());

        let response = self
            .http
            .post(&url)
            .query(&[("name", name)])
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("files.upload", response).await);
        }
        let body: UploadResponse = response.json().await?;
        Ok(body.name)
    }

    pub async fn download(&self, name: &str) -> Result<Option<Bytes>> {
        let url = format!("{}/files/download", self.base_url);
        tracing::debug!("GET {} (name {})", url, name);

        let response = self
            .http
            .get(&url)
            .query(&[("name", name)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(operation_error("files.download", response).await);
        }
        Ok(Some(response.bytes().await?))
    }

    pub async fn list(
        &self,
        limit: usize,
        prefix: Option<&str>,
        last: Option<&str>,
    ) -> Result<ListResponse> {
        let url = format!("{}/files", self.base_url);
        tracing::debug!("GET {} (limit {})", url, limit);

        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(prefix) = prefix {
            query.push(("prefix", prefix.to_string()));
        }
        if let Some(last) = last {
            query.push(("last", last.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("files.list", response).await);
        }
        Ok(response.json().await?)
    }

    /// The service reports per-name outcomes; absent names count as deleted.
    pub async fn delete_many(&self, names: &[String]) -> Result<DeleteResult> {
        let url = format!("{}/files", self.base_url);
        tracing::debug!("DELETE {} ({} names)", url, names.len());

        let response = self
            .http
            .delete(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&serde_json::json!({ "names": names }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(operation_error("files.delete", response).await);
        }
        Ok(response.json().await?)
    }
}
