use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::{HistoryLedger, WeatherProvider};

mod health;
mod history;
mod weather;

// ---

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub provider: WeatherProvider,
    pub ledger: Arc<HistoryLedger>,
}

pub fn router(provider: WeatherProvider, ledger: Arc<HistoryLedger>) -> Router {
    // ---
    Router::new()
        .merge(weather::router())
        .merge(history::router())
        .merge(health::router())
        // The dashboard frontend is served separately.
        .layer(CorsLayer::permissive())
        .with_state(AppState { provider, ledger })
}
