use super::ENDPOINTS;
use crate::analysis::{AnalysisRequest, AnalysisService};
use crate::errors::{AnalysisError, Result};
use crate::output::NormalizedResponse;
use crate::versions::ToolVersions;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

pub(super) async fn root(State(service): State<AnalysisService>) -> Json<Value> {
    let settings = service.settings();
    Json(json!({
        "name": settings.project_name,
        "version": settings.version,
        "endpoints": ENDPOINTS,
    }))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn versions(State(service): State<AnalysisService>) -> Result<Json<ToolVersions>> {
    blocking(move || Ok(service.versions())).await.map(Json)
}

pub(super) async fn analyze(
    State(service): State<AnalysisService>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<NormalizedResponse>> {
    tracing::info!(path = %request.code_path.display(), "analysis requested");
    blocking(move || service.analyze(&request)).await.map(Json)
}

async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AnalysisError::Internal(e.to_string()))?
}
