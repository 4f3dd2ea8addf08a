//! Minimal Open-Meteo forecast client.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Kyiv, as used by both weather functions.
pub const KYIV: (f64, f64) = (50.4375, 30.5);

#[derive(Debug, Error)]
#[error("Error fetching weather forecast: {0}")]
pub struct WeatherError(pub String);

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError(err.to_string())
    }
}

/// Anything that can produce an hourly forecast as raw JSON.
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn forecast(&self, latitude: f64, longitude: f64, hourly: &[&str]) -> Result<Value, WeatherError>;
}

pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    /// Full request URL for an hourly forecast.
    pub fn forecast_url(&self, latitude: f64, longitude: f64, hourly: &[&str]) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly={}",
            self.base_url.trim_end_matches('/'),
            latitude,
            longitude,
            hourly.join(",")
        )
    }
}

impl ForecastSource for OpenMeteoClient {
    /// Fetch the forecast and return the decoded JSON body untouched.
    async fn forecast(&self, latitude: f64, longitude: f64, hourly: &[&str]) -> Result<Value, WeatherError> {
        let url = self.forecast_url(latitude, longitude, hourly);
        debug!(%url, "Requesting forecast");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}
