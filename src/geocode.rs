//! Geocoding collaborator and static-map URL construction.
//!
//! Geocoding is used only to center the strategy document's map image.
//! Failures never abort the pipeline: a not-found location or a transport
//! error becomes a descriptive string embedded in the `map_url` field.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// A geocoded coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Geocoding collaborator. `Ok(None)` means the place could not be geocoded.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &str) -> Result<Option<GeoPoint>>;
}

/// Build a static-map image URL centered on a point, with a red "P" marker.
pub fn static_map_url(point: GeoPoint, api_key: &str) -> String {
    let GeoPoint { lat, lng } = point;
    format!(
        "{STATIC_MAP_URL}?size=400x400&center={lat},{lng}&zoom=12&maptype=terrain&markers=color:red%7Clabel:P%7C{lat},{lng}&key={api_key}"
    )
}

/// Resolve the map URL for a location, degrading to an inline error string.
pub async fn resolve_map_url(geocoder: &dyn Geocoder, place: &str, api_key: &str) -> String {
    match geocoder.geocode(place).await {
        Ok(Some(point)) => static_map_url(point, api_key),
        Ok(None) => {
            warn!(place, "location could not be geocoded");
            "Error: Could not geocode location.".to_string()
        }
        Err(e) => {
            warn!(place, error = %e, "geocoding failed");
            format!("Error generating map URL: {e}")
        }
    }
}

/// Google Maps geocoding client.
pub struct GoogleGeocoder {
    http: reqwest::Client,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, place: &str) -> Result<Option<GeoPoint>> {
        let payload: Value = self
            .http
            .get(GEOCODE_URL)
            .query(&[("address", place), ("key", &self.api_key)])
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding service returned an error status")?
            .json()
            .await
            .context("geocoding response was not valid JSON")?;

        Ok(point_from_payload(&payload))
    }
}

/// Extract the first result's coordinates; `None` when there are no results.
fn point_from_payload(payload: &Value) -> Option<GeoPoint> {
    let location = payload.pointer("/results/0/geometry/location")?;
    Some(GeoPoint {
        lat: location.get("lat")?.as_f64()?,
        lng: location.get("lng")?.as_f64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use serde_json::json;

    struct FixedGeocoder(Option<GeoPoint>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, _place: &str) -> Result<Option<GeoPoint>> {
            Ok(self.0)
        }
    }

    struct BrokenGeocoder;

    #[async_trait]
    impl Geocoder for BrokenGeocoder {
        async fn geocode(&self, _place: &str) -> Result<Option<GeoPoint>> {
            bail!("connection refused")
        }
    }

    #[test]
    fn static_map_url_embeds_center_and_marker() {
        let url = static_map_url(GeoPoint { lat: 33.57, lng: -117.84 }, "KEY");
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?"));
        assert!(url.contains("center=33.57,-117.84"));
        assert!(url.contains("markers=color:red%7Clabel:P%7C33.57,-117.84"));
        assert!(url.contains("maptype=terrain"));
        assert!(url.ends_with("key=KEY"));
    }

    #[test]
    fn payload_without_results_yields_none() {
        assert!(point_from_payload(&json!({ "results": [] })).is_none());

        let payload = json!({
            "results": [{ "geometry": { "location": { "lat": 1.5, "lng": -2.5 } } }]
        });
        assert_eq!(
            point_from_payload(&payload),
            Some(GeoPoint { lat: 1.5, lng: -2.5 })
        );
    }

    #[tokio::test]
    async fn resolve_map_url_degrades_gracefully() {
        let ok = resolve_map_url(
            &FixedGeocoder(Some(GeoPoint { lat: 1.0, lng: 2.0 })),
            "Somewhere",
            "KEY",
        )
        .await;
        assert!(ok.contains("staticmap"));

        let not_found = resolve_map_url(&FixedGeocoder(None), "Nowhere", "KEY").await;
        assert_eq!(not_found, "Error: Could not geocode location.");

        let broken = resolve_map_url(&BrokenGeocoder, "Somewhere", "KEY").await;
        assert!(broken.starts_with("Error generating map URL:"));
        assert!(broken.contains("connection refused"));
    }
}
