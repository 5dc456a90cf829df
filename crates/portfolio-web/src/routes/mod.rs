//! Route handlers.

pub mod members;
pub mod projects;

use axum::Json;
use portfolio_core::PortfolioResult;
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run SQLite-backed work on the blocking thread pool.
///
/// The pool holds one connection behind a std mutex, so store calls block.
pub(crate) async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> PortfolioResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Blocking task failed");
            ApiError::internal()
        })?
        .map_err(ApiError::from)
}
