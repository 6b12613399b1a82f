use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::OperationsResponse;
use crate::state::AppState;

pub async fn list_operations(State(state): State<Arc<AppState>>) -> Json<OperationsResponse> {
    let processor = &state.processor;
    Json(OperationsResponse::new(processor.is_engine_available(), processor.defaults()))
}
