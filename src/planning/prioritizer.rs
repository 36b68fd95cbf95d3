//! Search-Area Prioritizer
//!
//! Ranks candidate search areas into priority bands. The primary path asks
//! the completion backend for a JSON array under a strict shape contract;
//! any call failure or validation failure silently substitutes the fixed
//! rule-based ranking. The fallback is always available and never fails.

use crate::config::SearchConfig;
use crate::llm::{templates, TextCompletion};
use crate::types::{
    EnvironmentalRecord, IncidentRecord, OperationsRecord, PrioritizedArea, Priority,
};
use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

/// Rank search areas for the incident.
///
/// Never fails: a model error or contract violation falls back to
/// `fallback_ranking`.
pub async fn prioritize(
    llm: &dyn TextCompletion,
    radius_km: f64,
    incident: &IncidentRecord,
    environment: &EnvironmentalRecord,
    operations: &OperationsRecord,
    config: &SearchConfig,
) -> Vec<PrioritizedArea> {
    match model_ranking(llm, radius_km, incident, environment, operations).await {
        Ok(areas) => {
            debug!(count = areas.len(), "model ranking accepted");
            areas
        }
        Err(e) => {
            warn!(error = %e, "model ranking rejected, using rule-based fallback");
            fallback_ranking(incident, environment, operations, config)
        }
    }
}

/// Primary path: prompt the model and validate its response.
async fn model_ranking(
    llm: &dyn TextCompletion,
    radius_km: f64,
    incident: &IncidentRecord,
    environment: &EnvironmentalRecord,
    operations: &OperationsRecord,
) -> Result<Vec<PrioritizedArea>> {
    let prompt = templates::prioritization_prompt(radius_km, incident, environment, operations);
    let raw = llm.complete(&prompt).await?;
    parse_ranking(&raw)
}

/// Validate a model response against the output contract: a JSON array whose
/// elements carry exactly `area`, `priority`, `rationale`, with `priority`
/// one of the three bands. Code fences are stripped before parsing.
pub fn parse_ranking(raw: &str) -> Result<Vec<PrioritizedArea>> {
    let cleaned = strip_code_fences(raw);
    let areas: Vec<PrioritizedArea> = serde_json::from_str(cleaned)
        .context("model ranking did not match the required shape")?;
    if areas.is_empty() {
        bail!("model ranking was an empty list");
    }
    Ok(areas)
}

/// Strip leading/trailing markdown code-fence markers.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

/// Fixed rule-based ranking: four canonical areas around the last known
/// location, escalated when current precipitation exceeds the configured
/// threshold.
pub fn fallback_ranking(
    incident: &IncidentRecord,
    environment: &EnvironmentalRecord,
    operations: &OperationsRecord,
    config: &SearchConfig,
) -> Vec<PrioritizedArea> {
    let mut areas = vec![
        PrioritizedArea {
            area: incident.last_known_location.clone(),
            priority: Priority::High,
            rationale: "Proximity to last known point.".to_string(),
        },
        PrioritizedArea {
            area: "Densely forested areas within search radius".to_string(),
            priority: Priority::Medium,
            rationale: format!(
                "Terrain type: {} may impede visibility.",
                environment.terrain_type
            ),
        },
        PrioritizedArea {
            area: "Water bodies within search radius".to_string(),
            priority: Priority::Medium,
            rationale: "Potential hazard area.".to_string(),
        },
        PrioritizedArea {
            area: "Trails radiating outwards from last known location".to_string(),
            priority: Priority::Low,
            rationale: "Possible direction of travel.".to_string(),
        },
    ];

    let (rain, snow) = operations.current_weather.precipitation_1h_mm();
    if rain > config.precipitation_threshold_mm || snow > config.precipitation_threshold_mm {
        debug!(rain, snow, "active precipitation, escalating forested areas and trails");
        for area in &mut areas {
            let name = area.area.to_lowercase();
            if name.contains("forested") {
                area.priority = Priority::High;
            }
            if name.contains("trails") {
                area.priority = Priority::Medium;
            }
        }
    }

    areas
}
