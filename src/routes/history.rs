use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use super::AppState;
use crate::models::HistoryEntry;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/history", get(list).delete(clear))
}

/// Same document shape the ledger persists, so the dashboard can consume
/// either directly.
#[derive(Serialize)]
struct HistoryResponse {
    searches: Vec<HistoryEntry>,
}

async fn list(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    info!("GET /api/history");

    let searches = state.ledger.list().await;
    Json(HistoryResponse { searches })
}

async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    info!("DELETE /api/history");

    match state.ledger.clear().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "History cleared" })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to clear history: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to clear history" })),
            )
                .into_response()
        }
    }
}
