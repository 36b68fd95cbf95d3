//! Planning Configuration Module
//!
//! Tunable values for the planning pipeline, loaded from TOML with built-in
//! defaults. Unlike a process-global configuration, the loaded value is
//! passed explicitly into `PlanningAgent` at construction so tests and
//! multi-agent setups can carry independent configurations.
//!
//! ## Loading Order
//!
//! 1. `SAR_CONFIG` environment variable (path to a TOML file)
//! 2. `sar_config.toml` in the current working directory
//! 3. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Text-completion model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_name: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "gemini-pro".to_string(),
            temperature: 0.4,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 400,
        }
    }
}

/// Search-area estimation and prioritization tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Starting radius before experience and elapsed-time adjustments.
    pub base_radius_km: f64,
    /// Radius growth per elapsed hour since the report.
    pub radius_per_hour_km: f64,
    /// Substituted when the report timestamp cannot be parsed.
    pub default_elapsed_hours: f64,
    /// Radius floor after all adjustments.
    pub min_radius_km: f64,
    /// 1-hour rain/snow accumulation above which the fallback ranking
    /// escalates forested areas and trails.
    pub precipitation_threshold_mm: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_radius_km: 1.0,
            radius_per_hour_km: 0.5,
            default_elapsed_hours: 6.0,
            min_radius_km: 1.0,
            precipitation_threshold_mm: 0.1,
        }
    }
}

/// Top-level planning configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub model: ModelConfig,
    pub search: SearchConfig,
}

impl PlanningConfig {
    /// Load configuration following the documented order. A malformed file is
    /// a recoverable condition: it logs a warning and falls back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SAR_CONFIG") {
            return Self::load_from(Path::new(&path));
        }

        let cwd_config = Path::new("sar_config.toml");
        if cwd_config.exists() {
            return Self::load_from(cwd_config);
        }

        info!("no configuration file found, using built-in defaults");
        Self::default()
    }

    /// Load configuration from a specific TOML file, falling back to defaults
    /// if the file is unreadable or malformed.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<Self>(&raw) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded planning configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed configuration, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable configuration, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = PlanningConfig::default();
        assert_eq!(config.search.base_radius_km, 1.0);
        assert_eq!(config.search.radius_per_hour_km, 0.5);
        assert_eq!(config.search.default_elapsed_hours, 6.0);
        assert_eq!(config.search.min_radius_km, 1.0);
        assert_eq!(config.search.precipitation_threshold_mm, 0.1);
        assert_eq!(config.model.model_name, "gemini-pro");
        assert_eq!(config.model.max_output_tokens, 400);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[search]\nbase_radius_km = 2.0\n\n[model]\nmodel_name = \"gemini-1.5-flash\"\n"
        )
        .unwrap();

        let config = PlanningConfig::load_from(file.path());
        assert_eq!(config.search.base_radius_km, 2.0);
        // Unnamed fields keep their defaults
        assert_eq!(config.search.radius_per_hour_km, 0.5);
        assert_eq!(config.model.model_name, "gemini-1.5-flash");
        assert_eq!(config.model.top_k, 32);
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml {{").unwrap();

        let config = PlanningConfig::load_from(file.path());
        assert_eq!(config.search.base_radius_km, 1.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = PlanningConfig::load_from(Path::new("/nonexistent/sar_config.toml"));
        assert_eq!(config.model.model_name, "gemini-pro");
    }
}
