// Wire clients for the hosted store HTTP API. Thin pass-through bindings over
// reqwest; the adapters in `core` add configuration resolution and connection
// handling on top.

pub mod files;
pub mod records;

use crate::utils::error::KvDriveError;
use serde::Deserialize;

pub(crate) const API_KEY_HEADER: &str = "X-API-Key";

/// Pagination section of list/query responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub size: usize,

    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Turn a non-2xx response into an operation error, surfacing the service's
/// `{"errors": [...]}` payload when there is one.
pub(crate) async fn operation_error(
    operation: &'static str,
    response: reqwest::Response,
) -> KvDriveError {
    let status = response.status();
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) if !body.errors.is_empty() => body.errors.join("; "),
        _ => "no error detail".to_string(),
    };
    KvDriveError::OperationError {
        operation,
        message: format!("remote returned {} ({})", status, detail),
    }
}

pub(crate) fn resource_url(host: &str, project_id: &str, name: &str) -> String {
    format!("{}/v1/{}/{}", host.trim_end_matches('/'), project_id, name)
}
