//! Shared data structures for the SAR planning pipeline
//!
//! This module defines the core records for one planning cycle:
//! - Section feeds: IncidentRecord, OperationsRecord, LogisticsRecord, EnvironmentalRecord
//! - Weather resolution: WeatherReport, WeatherOutcome
//! - Planning outputs: SearchArea, PrioritizedArea, AllocationEntry
//! - Documents: StrategyDocument, MissionPlan
//! - Boundary types: PlanningRequest, PlanningResponse, ErrorReport

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Priority bands
// ============================================================================

/// Urgency classification of a search area.
///
/// Any other value coming back from a model response is a contract violation
/// and forces the deterministic fallback ranking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

// ============================================================================
// Section feed records
// ============================================================================

/// Description of the missing subject, supplied by the Incident Commander.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub clothing: String,
    pub items: Vec<String>,
    pub health_conditions: Vec<String>,
    pub experience_level: String,
}

/// Incident data from the Incident Commander. Immutable once created;
/// built once per planning cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentRecord {
    pub incident_type: String,
    pub priority: String,
    pub location: String,
    pub mission_objective: String,
    /// Report timestamp as received, e.g. "2024-08-03 14:00 PST".
    pub time_reported: String,
    pub search_area_size_km2: f64,
    pub reporting_person: String,
    pub last_known_location: String,
    pub possible_scenarios: Vec<String>,
    pub special_instructions: String,
    pub subject: SubjectProfile,
}

/// Environmental data for the incident location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentalRecord {
    pub location: String,
    pub terrain_type: String,
    pub vegetation_density: String,
    pub elevation_range_meters: String,
    pub water_sources: Vec<String>,
    pub wildlife_hazards: Vec<String>,
    pub daylight_hours: String,
    pub typical_weather_patterns: String,
}

/// Logistics data from the Logistics Section Chief.
///
/// `available` maps resource-type name to the count on hand. The map covers
/// the full catalogue (ground_teams, search_dogs, uavs, helicopters,
/// paramedics, communication_units); the allocation engine only draws on the
/// tracked subset but reports leftovers across all of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticsRecord {
    pub available: BTreeMap<String, u32>,
    pub resource_locations: BTreeMap<String, String>,
    pub communication_channels: BTreeMap<String, String>,
    pub medical_supplies_status: String,
    pub fuel_status: String,
    pub transportation: String,
}

/// Operations data from the Operations Section Chief, including the
/// weather resolution outcome for the incident location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationsRecord {
    pub available_search_teams: Vec<String>,
    pub current_weather: WeatherOutcome,
    pub visibility: String,
    pub areas_already_searched: Vec<String>,
}

// ============================================================================
// Weather resolution
// ============================================================================

/// A resolved weather observation for a place name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub cloud_coverage_percent: f64,
    /// Rain accumulation over the last hour, millimetres.
    pub rain_1h_mm: f64,
    /// Snow accumulation over the last hour, millimetres.
    pub snow_1h_mm: f64,
    pub conditions: String,
    /// Set when a typonym other than the original input resolved the lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_with: Option<String>,
}

/// Outcome of driving the typonym chain against the weather lookup.
///
/// `Unavailable` is a recoverable condition embedded in the document, never a
/// pipeline fault. `assist_used` records whether a model-assisted typonym list
/// was in play when the chain was exhausted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WeatherOutcome {
    Report(WeatherReport),
    Unavailable { error: String, assist_used: bool },
}

impl WeatherOutcome {
    /// Cloud coverage for visibility classification; an unavailable
    /// observation reads as clear sky, matching the feed's optimistic default.
    pub fn cloud_coverage_percent(&self) -> f64 {
        match self {
            WeatherOutcome::Report(r) => r.cloud_coverage_percent,
            WeatherOutcome::Unavailable { .. } => 0.0,
        }
    }

    /// Current 1-hour precipitation (rain, snow) in millimetres.
    pub fn precipitation_1h_mm(&self) -> (f64, f64) {
        match self {
            WeatherOutcome::Report(r) => (r.rain_1h_mm, r.snow_1h_mm),
            WeatherOutcome::Unavailable { .. } => (0.0, 0.0),
        }
    }
}

// ============================================================================
// Planning outputs
// ============================================================================

/// Estimated circular search area around the last known location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchArea {
    pub description: String,
    pub radius_km: f64,
}

/// A ranked search area. List order is rank order: the allocation engine
/// processes areas exactly as listed, never re-sorted.
///
/// `deny_unknown_fields` enforces the model output contract: an element must
/// carry exactly these three keys or the whole response is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PrioritizedArea {
    pub area: String,
    pub priority: Priority,
    pub rationale: String,
}

/// One allocation result: a per-area entry, or one of the synthetic
/// "Unallocated Resources" / "All areas" entries appended after the pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationEntry {
    pub area: String,
    /// Ordered `"<count> <unit>(s) (<resource_type>)"` lines.
    pub suggested_resources: Vec<String>,
    pub rationale: String,
}

// ============================================================================
// Documents
// ============================================================================

/// Complete search strategy for one planning cycle. Aggregates every section
/// feed plus the computed search area, ranking, allocation, map URL and
/// summaries; a MissionPlan can be derived from it without further lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyDocument {
    pub incident_details: IncidentRecord,
    pub operations_details: OperationsRecord,
    pub logistics_details: LogisticsRecord,
    pub environmental_details: EnvironmentalRecord,
    pub calculated_search_area: SearchArea,
    pub prioritized_search_areas: Vec<PrioritizedArea>,
    pub suggested_resource_allocation: Vec<AllocationEntry>,
    pub map_url: String,
    pub mission_objective: String,
    /// Model-generated human-readable summary, or an inline error string when
    /// the completion collaborator failed.
    pub strategy_summary_text_model: String,
    /// Static placeholder summary.
    pub strategy_summary_text_original: String,
}

/// Fixed communication plan attached to every mission plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunicationPlan {
    pub primary_channel: String,
    pub secondary_channel: String,
    pub digital_platform: String,
    pub backup_communication: String,
}

/// Fixed timeline skeleton attached to every mission plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionTimeline {
    pub briefing_time: String,
    pub start_time: String,
    pub debriefing_time: String,
    pub end_of_day: String,
}

/// Read-only projection of a StrategyDocument with the fixed communication
/// plan, safety protocols and timeline skeleton added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionPlan {
    pub mission_name: String,
    pub date_prepared: String,
    pub objective: String,
    pub search_strategy_summary: String,
    pub prioritized_search_areas: Vec<PrioritizedArea>,
    pub resource_allocation: Vec<AllocationEntry>,
    pub communication_plan: CommunicationPlan,
    pub safety_protocols: Vec<String>,
    pub timeline: MissionTimeline,
    pub map_url: String,
    pub plan_summary_text: String,
}

// ============================================================================
// Boundary types
// ============================================================================

/// Incoming request to the planning agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanningRequest {
    pub action: String,
}

/// Structured error echoed to the caller. No failure mode in this pipeline
/// escapes as a raw fault; everything surfaces through this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReport {
    pub error: String,
    pub requested_action: String,
}

/// Response from `PlanningAgent::process_request`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlanningResponse {
    Strategy(Box<StrategyDocument>),
    Plan(Box<MissionPlan>),
    Error(ErrorReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trips_exact_strings() {
        for (p, s) in [
            (Priority::High, "\"High\""),
            (Priority::Medium, "\"Medium\""),
            (Priority::Low, "\"Low\""),
        ] {
            assert_eq!(serde_json::to_string(&p).unwrap(), s);
            assert_eq!(serde_json::from_str::<Priority>(s).unwrap(), p);
        }
        assert!(serde_json::from_str::<Priority>("\"Urgent\"").is_err());
    }

    #[test]
    fn prioritized_area_rejects_extra_keys() {
        let exact = r#"{"area": "Ridge", "priority": "High", "rationale": "close"}"#;
        assert!(serde_json::from_str::<PrioritizedArea>(exact).is_ok());

        let extra =
            r#"{"area": "Ridge", "priority": "High", "rationale": "close", "score": 9}"#;
        assert!(serde_json::from_str::<PrioritizedArea>(extra).is_err());

        let missing = r#"{"area": "Ridge", "priority": "High"}"#;
        assert!(serde_json::from_str::<PrioritizedArea>(missing).is_err());
    }

    #[test]
    fn weather_outcome_defaults_when_unavailable() {
        let outcome = WeatherOutcome::Unavailable {
            error: "not found".to_string(),
            assist_used: false,
        };
        assert_eq!(outcome.cloud_coverage_percent(), 0.0);
        assert_eq!(outcome.precipitation_1h_mm(), (0.0, 0.0));
    }
}
