use axum::{
    extract::Path, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::Serialize;
use tracing::{error, info};

use super::AppState;
use crate::models::{RiskLevel, WeatherReading};
use crate::{insights, InsightRecord, WeatherError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/weather/{city}", get(by_city))
        .route("/api/weather-coords/{lat}/{lon}", get(by_coords))
}

/// Weather payload returned to the dashboard: the raw reading plus the
/// derived advisories and risk level.
#[derive(Serialize)]
struct WeatherResponse {
    // ---
    reading: WeatherReading,
    insights: Vec<InsightRecord>,
    risk_level: RiskLevel,
}

async fn by_city(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/weather/{}", city);

    let reading = match state.provider.by_city(&city).await {
        Ok(reading) => reading,
        Err(e) => return error_response(&e),
    };

    // Best-effort: a history failure never fails the lookup.
    state.ledger.record(&city, &reading).await;

    respond(reading)
}

async fn by_coords(
    Path((lat, lon)): Path<(f64, f64)>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /api/weather-coords/{}/{}", lat, lon);

    let reading = match state.provider.by_coords(lat, lon).await {
        Ok(reading) => reading,
        Err(e) => return error_response(&e),
    };

    // Coordinate lookups are recorded under the resolved place name.
    let city = reading.name.clone();
    state.ledger.record(&city, &reading).await;

    respond(reading)
}

// ---

fn respond(reading: WeatherReading) -> axum::response::Response {
    // ---
    let insights = insights::generate(&reading);
    let risk_level = insights::risk_level(&reading);

    (
        StatusCode::OK,
        Json(WeatherResponse {
            reading,
            insights,
            risk_level,
        }),
    )
        .into_response()
}

fn error_response(err: &WeatherError) -> axum::response::Response {
    // ---
    match err {
        WeatherError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "City not found" })),
        )
            .into_response(),
        _ => {
            error!("Failed to fetch weather: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "Failed to fetch weather data" })),
            )
                .into_response()
        }
    }
}
