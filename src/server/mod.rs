//! JSON content server
//!
//! Every request collects its directory again, so edits on disk show up on
//! the next request without a watcher.

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{CollectError, PostRecord, Project};
use crate::Folio;

/// Error returned to HTTP clients as `{ "error": ... }`
#[derive(Debug)]
struct ApiError(String);

impl From<CollectError> for ApiError {
    fn from(err: CollectError) -> Self {
        ApiError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.0 }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Build the application router
pub fn router(folio: Arc<Folio>) -> Router {
    Router::new()
        .route("/api/posts", get(posts_handler))
        .route("/api/projects", get(projects_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(folio)
}

/// Start the content server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(Arc::new(folio.clone()));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn posts_handler(
    State(folio): State<Arc<Folio>>,
) -> Result<Json<Vec<PostRecord>>, ApiError> {
    let posts = collect(folio, |folio| folio.posts()).await?;
    Ok(Json(posts))
}

async fn projects_handler(
    State(folio): State<Arc<Folio>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = collect(folio, |folio| folio.projects()).await?;
    Ok(Json(projects))
}

/// Run a blocking collection off the async runtime
async fn collect<T, F>(folio: Arc<Folio>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Folio) -> Result<T, CollectError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&folio))
        .await
        .map_err(|e| ApiError(format!("collection task failed: {}", e)))?
        .map_err(ApiError::from)
}
