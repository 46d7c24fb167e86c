// Demo HTTP handlers. Illustrative surface over the adapters: a missing
// record or file maps to 404 with a fallback JSON payload.

use crate::domain::model::{FileSource, Record};
use crate::server::{AppError, AppState};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub(crate) async fn index() -> Html<&'static str> {
    Html(
        r#"<html>
  <head><title>kvdrive demo</title></head>
  <body>
    <h1>kvdrive demo</h1>
    <ul>
      <li><a href="/data">All records</a></li>
      <li><a href="/files">All files</a></li>
    </ul>
  </body>
</html>"#,
    )
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

pub(crate) async fn list_records(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = state.records.read_all(None).await?;
    Ok(Json(records).into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateParams {
    key: Option<String>,
}

pub(crate) async fn create_record(
    State(state): State<AppState>,
    Query(params): Query<CreateParams>,
    Json(record): Json<Record>,
) -> Result<Response, AppError> {
    let stored = state
        .records
        .create(record, params.key.as_deref(), None)
        .await?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

pub(crate) async fn get_record(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    match state.records.read(&key).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(not_found("No records found")),
    }
}

pub(crate) async fn update_record(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(updates): Json<HashMap<String, Value>>,
) -> Result<Response, AppError> {
    state.records.update(&key, updates, None).await?;
    Ok(Json(json!({ "key": key })).into_response())
}

pub(crate) async fn delete_record(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    state.records.delete(&key).await?;
    Ok(Json(json!({ "deleted": key })).into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    limit: Option<usize>,
    prefix: Option<String>,
}

pub(crate) async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let listing = state
        .files
        .list(params.limit, params.prefix.as_deref())
        .await?;
    Ok(Json(listing).into_response())
}

pub(crate) async fn get_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    match state.files.read(&name).await? {
        Some(data) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            data,
        )
            .into_response()),
        None => Ok(not_found("No file found")),
    }
}

pub(crate) async fn put_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let stored = state
        .files
        .write(&name, FileSource::Bytes(body), content_type)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "name": stored }))).into_response())
}

pub(crate) async fn delete_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let name = state.files.delete(&name).await?;
    Ok(Json(json!({ "deleted": name })).into_response())
}
