//! Error taxonomy for the weather proxy.
//!
//! Unreadable or missing history state is deliberately not a variant:
//! `HistoryLedger::list` treats it as an empty log rather than an error.

use thiserror::Error;

// ---

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider could not resolve the city or coordinates.
    #[error("city or location not found")]
    NotFound,

    /// Transport or decode failure talking to the weather provider.
    #[error("weather provider error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The history document could not be written. Fatal only for `clear`;
    /// `record` is best-effort and logs instead.
    #[error("failed to write history: {0}")]
    StorageWrite(#[source] std::io::Error),
}
