// Host integration: builds the adapters from configuration, shares them with
// the request handlers, and runs the demo HTTP server.

mod handlers;

use crate::config::AppConfig;
use crate::core::{files::FileStore, records::RecordStore};
use crate::utils::error::{KvDriveError, Result};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across all requests. The adapters are read-only
/// after construction, so cloning the state is just two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
    pub files: Arc<FileStore>,
}

/// Adapter failure surfaced from a handler.
pub(crate) struct AppError(KvDriveError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request error: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl From<KvDriveError> for AppError {
    fn from(err: KvDriveError) -> Self {
        Self(err)
    }
}

/// Open both adapters from the configuration. Fails fast on configuration or
/// connection errors.
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let records = RecordStore::from_config(config).await?;
    let files = FileStore::from_config(config).await?;
    info!(
        "connected to records store '{}' and files store '{}'",
        records.name(),
        files.name()
    );
    Ok(AppState {
        records: Arc::new(records),
        files: Arc::new(files),
    })
}

/// Demo routes over the adapters.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/data",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/data/:key",
            get(handlers::get_record)
                .patch(handlers::update_record)
                .delete(handlers::delete_record),
        )
        .route("/files", get(handlers::list_files))
        .route(
            "/files/:name",
            get(handlers::get_file)
                .post(handlers::put_file)
                .delete(handlers::delete_file),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        },
    }
}

/// Run the demo server until Ctrl+C or SIGTERM.
pub async fn run(config: AppConfig) -> Result<()> {
    let addr = config.listen_addr().to_string();
    let state = build_state(&config).await?;

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("kvdrive demo listening on http://{}", addr);
    info!("  GET  /        - route index");
    info!("  GET  /data    - list records    GET /files        - list files");
    info!("  POST /data    - store a record  POST /files/:name - upload a file");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}
