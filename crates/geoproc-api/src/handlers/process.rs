use std::sync::Arc;

use axum::{extract::State, Json};
use geojson::GeoJson;

use crate::dto::ProcessRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_process(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<GeoJson>, ApiError> {
    tracing::info!(
        operation = %request.operation,
        has_params = request.params.is_some(),
        "Processing request"
    );

    // Geometry work is CPU bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        state
            .processor
            .process(&request.operation, &request.geojson, request.params.as_ref())
    })
    .await
    .map_err(|e| ApiError::internal("Processing task failed").with_details(e.to_string()))??;

    Ok(Json(result))
}
