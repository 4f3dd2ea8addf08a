//! Weather functions: forecast passthrough and forecast snapshot storage.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::open_meteo::{ForecastSource, KYIV};
use crate::store::{DocumentStore, StoreError};

pub const PASSTHROUGH_HOURLY: [&str; 3] = ["temperature_2m", "relative_humidity_2m", "wind_speed_10m"];
pub const STORED_HOURLY: [&str; 1] = ["temperature_2m"];

/// Hourly series kept in the stored snapshot.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HourlySeries {
    pub temperature_2m: Vec<f64>,
    pub time: Vec<String>,
}

/// The subset of an Open-Meteo response that is persisted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Forecast {
    pub elevation: f64,
    pub generationtime_ms: f64,
    pub hourly: HourlySeries,
    pub hourly_units: Value,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct WeatherRecord {
    pub id: String,
    pub forecast: Forecast,
}

/// Current forecast for Kyiv, returned exactly as the provider sent it.
pub async fn handle_current_weather<W: ForecastSource>(weather: &W) -> Result<Value> {
    Ok(weather.forecast(KYIV.0, KYIV.1, &PASSTHROUGH_HOURLY).await?)
}

/// Fetch the temperature forecast and store a snapshot of it.
pub async fn handle_store_weather<W: ForecastSource, S: DocumentStore>(weather: &W, store: &S, collection: &str) -> Result<WeatherRecord> {
    let raw = weather.forecast(KYIV.0, KYIV.1, &STORED_HOURLY).await?;
    let forecast: Forecast = serde_json::from_value(raw)
        .map_err(|e| StoreError::Conversion(format!("Unexpected forecast shape: {}", e)))?;

    let record = WeatherRecord { id: Uuid::new_v4().to_string(), forecast };
    store.put(collection, &record).await?;
    info!(record_id = %record.id, points = record.forecast.hourly.time.len(), "Weather snapshot stored");

    Ok(record)
}
