//! sar-planning demo binary
//!
//! Runs one planning cycle against the simulated section feeds and prints
//! the resulting document as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Offline: deterministic fallbacks, canned weather
//! cargo run --release
//!
//! # Mission plan instead of the bare strategy
//! cargo run --release -- --action create_mission_plan
//!
//! # Live collaborators (requires keys in the environment or .env)
//! cargo run --release -- --live
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: text-completion key (live mode)
//! - `OWM_API_KEY`: OpenWeatherMap key (live mode)
//! - `GMAPS_API_KEY`: Google Maps geocoding/static-map key (live mode)
//! - `SAR_CONFIG`: path to a TOML configuration file
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use sar_planning::geocode::GeoPoint;
use sar_planning::{
    Collaborators, GeminiClient, Geocoder, GoogleGeocoder, OwmClient, PlanningAgent,
    PlanningConfig, PlanningRequest, SimulatedIntel, TextCompletion, WeatherLookup,
    WeatherReport,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sar-planning")]
#[command(about = "Planning Section Chief agent for simulated SAR incident command")]
#[command(version)]
struct CliArgs {
    /// Requested action: generate_strategy or create_mission_plan
    #[arg(long, default_value = "generate_strategy")]
    action: String,

    /// Use live collaborators (Gemini, OpenWeatherMap, Google Maps) instead
    /// of the offline stubs. Requires API keys in the environment.
    #[arg(long)]
    live: bool,
}

// ============================================================================
// Offline collaborator stubs
// ============================================================================

/// Completion stub that always fails, exercising every deterministic
/// fallback path (rule-based ranking, basic typonyms, placeholder summary).
struct OfflineCompletion;

#[async_trait]
impl TextCompletion for OfflineCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("offline mode: no completion backend")
    }
    fn backend_name(&self) -> &'static str {
        "offline"
    }
}

/// Canned coastal-afternoon weather for any place name.
struct CannedWeather;

#[async_trait]
impl WeatherLookup for CannedWeather {
    async fn lookup(&self, _place: &str) -> Result<Option<WeatherReport>> {
        Ok(Some(WeatherReport {
            temperature_c: 18.0,
            cloud_coverage_percent: 40.0,
            rain_1h_mm: 0.0,
            snow_1h_mm: 0.0,
            conditions: "few clouds".to_string(),
            resolved_with: None,
        }))
    }
}

/// Fixed coordinates near the simulated incident location.
struct CannedGeocoder;

#[async_trait]
impl Geocoder for CannedGeocoder {
    async fn geocode(&self, _place: &str) -> Result<Option<GeoPoint>> {
        Ok(Some(GeoPoint {
            lat: 33.5745,
            lng: -117.8410,
        }))
    }
}

fn live_collaborators(config: &PlanningConfig) -> Result<Collaborators> {
    let gemini_key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
    let owm_key = std::env::var("OWM_API_KEY").context("OWM_API_KEY not set")?;
    let gmaps_key = std::env::var("GMAPS_API_KEY").context("GMAPS_API_KEY not set")?;

    Ok(Collaborators {
        llm: Arc::new(GeminiClient::new(gemini_key, config.model.clone())),
        weather: Arc::new(OwmClient::new(owm_key)),
        geocoder: Arc::new(GoogleGeocoder::new(gmaps_key.clone())),
        intel: Arc::new(SimulatedIntel),
        map_api_key: gmaps_key,
    })
}

fn offline_collaborators() -> Collaborators {
    Collaborators {
        llm: Arc::new(OfflineCompletion),
        weather: Arc::new(CannedWeather),
        geocoder: Arc::new(CannedGeocoder),
        intel: Arc::new(SimulatedIntel),
        map_api_key: "OFFLINE".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = CliArgs::parse();
    let config = PlanningConfig::load();

    let collaborators = if args.live {
        info!("using live collaborators");
        live_collaborators(&config)?
    } else {
        info!("using offline collaborators (deterministic fallbacks)");
        offline_collaborators()
    };

    let agent = PlanningAgent::new(config, collaborators);
    let request = PlanningRequest {
        action: args.action,
    };

    let response = agent.process_request(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
