//! OpenWeatherMap backend for the `WeatherLookup` trait.
//!
//! Current-weather-by-place lookups, metric units. An HTTP 404 maps to
//! `Ok(None)` so the typonym chain can continue; any other failure is a
//! transport error.

use crate::types::WeatherReport;
use crate::weather::WeatherLookup;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

const OWM_CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// OpenWeatherMap client.
pub struct OwmClient {
    http: reqwest::Client,
    api_key: String,
}

impl OwmClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl WeatherLookup for OwmClient {
    async fn lookup(&self, place: &str) -> Result<Option<WeatherReport>> {
        let response = self
            .http
            .get(OWM_CURRENT_WEATHER_URL)
            .query(&[("q", place), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await
            .context("weather request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let payload: Value = response
            .error_for_status()
            .context("weather service returned an error status")?
            .json()
            .await
            .context("weather response was not valid JSON")?;

        Ok(Some(report_from_payload(&payload)?))
    }
}

/// Map an OWM current-weather payload onto a `WeatherReport`.
fn report_from_payload(payload: &Value) -> Result<WeatherReport> {
    let temperature_c = payload
        .pointer("/main/temp")
        .and_then(Value::as_f64)
        .context("weather payload missing /main/temp")?;

    let cloud_coverage_percent = payload
        .pointer("/clouds/all")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let rain_1h_mm = payload
        .pointer("/rain/1h")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let snow_1h_mm = payload
        .pointer("/snow/1h")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let conditions = payload
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Ok(WeatherReport {
        temperature_c,
        cloud_coverage_percent,
        rain_1h_mm,
        snow_1h_mm,
        conditions,
        resolved_with: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_full_payload() {
        let payload = json!({
            "weather": [{ "description": "light rain" }],
            "main": { "temp": 12.3 },
            "clouds": { "all": 75 },
            "rain": { "1h": 0.6 }
        });

        let report = report_from_payload(&payload).unwrap();
        assert_eq!(report.temperature_c, 12.3);
        assert_eq!(report.cloud_coverage_percent, 75.0);
        assert_eq!(report.rain_1h_mm, 0.6);
        assert_eq!(report.snow_1h_mm, 0.0);
        assert_eq!(report.conditions, "light rain");
        assert!(report.resolved_with.is_none());
    }

    #[test]
    fn missing_precipitation_defaults_to_zero() {
        let payload = json!({
            "weather": [{ "description": "clear sky" }],
            "main": { "temp": 24.0 },
            "clouds": { "all": 0 }
        });

        let report = report_from_payload(&payload).unwrap();
        assert_eq!(report.rain_1h_mm, 0.0);
        assert_eq!(report.snow_1h_mm, 0.0);
    }

    #[test]
    fn missing_temperature_is_an_error() {
        let payload = json!({ "clouds": { "all": 10 } });
        assert!(report_from_payload(&payload).is_err());
    }
}
