//! HTTP client for the upstream weather provider (OpenWeather-compatible).
//!
//! No retry policy: a failed lookup surfaces immediately and nothing is
//! recorded in history for it.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::WeatherError;
use crate::models::WeatherReading;

// ---

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    // ---
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        // ---
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch the current reading for a city name.
    pub async fn by_city(&self, city: &str) -> Result<WeatherReading, WeatherError> {
        self.fetch(&[("q", city)]).await
    }

    /// Fetch the current reading for a coordinate pair.
    pub async fn by_coords(&self, lat: f64, lon: f64) -> Result<WeatherReading, WeatherError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.fetch(&[("lat", lat.as_str()), ("lon", lon.as_str())]).await
    }

    async fn fetch(&self, query: &[(&str, &str)]) -> Result<WeatherReading, WeatherError> {
        // ---
        debug!("Fetching weather from {} with {:?}", self.base_url, query);

        let response = self
            .client
            .get(&self.base_url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound);
        }

        let reading = response.error_for_status()?.json::<WeatherReading>().await?;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE: &str = r#"{
        "name": "London",
        "sys": { "country": "GB" },
        "main": { "temp": 14.2, "feels_like": 13.5, "temp_min": 12.0, "temp_max": 16.1, "humidity": 72 },
        "weather": [ { "main": "Drizzle", "description": "light drizzle" } ],
        "wind": { "speed": 5.1 },
        "visibility": 9000
    }"#;

    #[tokio::test]
    async fn test_by_city_parses_reading() {
        // ---
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SAMPLE, "application/json"),
            )
            .mount(&server)
            .await;

        let provider =
            WeatherProvider::new(format!("{}/data/2.5/weather", server.uri()), "test-key")
                .unwrap();
        let reading = provider.by_city("London").await.unwrap();

        assert_eq!(reading.name, "London");
        assert_eq!(reading.sys.country, "GB");
        assert_eq!(reading.condition(), "Drizzle");
        assert_eq!(reading.visibility, 9000);
    }

    #[tokio::test]
    async fn test_by_coords_sends_lat_lon() {
        // ---
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5"))
            .and(query_param("lon", "-0.12"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(SAMPLE, "application/json"),
            )
            .mount(&server)
            .await;

        let provider =
            WeatherProvider::new(format!("{}/data/2.5/weather", server.uri()), "test-key")
                .unwrap();
        let reading = provider.by_coords(51.5, -0.12).await.unwrap();
        assert_eq!(reading.name, "London");
    }

    #[tokio::test]
    async fn test_unknown_city_maps_to_not_found() {
        // ---
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider =
            WeatherProvider::new(format!("{}/data/2.5/weather", server.uri()), "test-key")
                .unwrap();
        let err = provider.by_city("Nowhereville").await.unwrap_err();
        assert!(matches!(err, WeatherError::NotFound));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_upstream() {
        // ---
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider =
            WeatherProvider::new(format!("{}/data/2.5/weather", server.uri()), "test-key")
                .unwrap();
        let err = provider.by_city("London").await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(_)));
    }
}
