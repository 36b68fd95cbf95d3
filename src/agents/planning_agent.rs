//! Strategy/Plan Orchestrator
//!
//! Sequences one planning cycle through a fixed state machine:
//!
//! INIT -> DATA_COLLECTED -> AREA_ESTIMATED -> PRIORITIZED -> ALLOCATED ->
//! SUMMARIZED -> DOCUMENT_READY -> (optional) PLAN_READY
//!
//! No state may be skipped or re-run; PLAN_READY is reachable only from
//! DOCUMENT_READY. Each planning cycle builds a fresh document; nothing is
//! shared across requests. Every failure inside the pipeline is caught at
//! the `process_request` boundary and reported as a structured error.

use crate::config::PlanningConfig;
use crate::geocode::{self, Geocoder};
use crate::intel::IntelSource;
use crate::llm::{templates, TextCompletion};
use crate::planning::{allocation, prioritizer, radius};
use crate::types::{
    CommunicationPlan, ErrorReport, MissionPlan, MissionTimeline, PlanningRequest,
    PlanningResponse, StrategyDocument,
};
use crate::weather::{self, WeatherLookup};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Action names accepted by `process_request`.
const ACTION_GENERATE_STRATEGY: &str = "generate_strategy";
const ACTION_CREATE_MISSION_PLAN: &str = "create_mission_plan";

// ============================================================================
// State machine
// ============================================================================

/// Pipeline states for one planning cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanningState {
    Init,
    DataCollected,
    AreaEstimated,
    Prioritized,
    Allocated,
    Summarized,
    DocumentReady,
    PlanReady,
}

impl PlanningState {
    /// The only state reachable from this one, if any.
    pub fn successor(self) -> Option<PlanningState> {
        match self {
            PlanningState::Init => Some(PlanningState::DataCollected),
            PlanningState::DataCollected => Some(PlanningState::AreaEstimated),
            PlanningState::AreaEstimated => Some(PlanningState::Prioritized),
            PlanningState::Prioritized => Some(PlanningState::Allocated),
            PlanningState::Allocated => Some(PlanningState::Summarized),
            PlanningState::Summarized => Some(PlanningState::DocumentReady),
            PlanningState::DocumentReady => Some(PlanningState::PlanReady),
            PlanningState::PlanReady => None,
        }
    }
}

impl std::fmt::Display for PlanningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlanningState::Init => "INIT",
            PlanningState::DataCollected => "DATA_COLLECTED",
            PlanningState::AreaEstimated => "AREA_ESTIMATED",
            PlanningState::Prioritized => "PRIORITIZED",
            PlanningState::Allocated => "ALLOCATED",
            PlanningState::Summarized => "SUMMARIZED",
            PlanningState::DocumentReady => "DOCUMENT_READY",
            PlanningState::PlanReady => "PLAN_READY",
        };
        write!(f, "{name}")
    }
}

/// Tracks progression through the pipeline, rejecting skips and re-runs.
struct PipelineTracker {
    state: PlanningState,
}

impl PipelineTracker {
    fn new() -> Self {
        Self {
            state: PlanningState::Init,
        }
    }

    fn advance(&mut self, next: PlanningState) -> Result<(), PlanningError> {
        if self.state.successor() == Some(next) {
            debug!(from = %self.state, to = %next, "pipeline transition");
            self.state = next;
            Ok(())
        } else {
            Err(PlanningError::Transition {
                from: self.state,
                to: next,
            })
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failures that can reach the orchestrator boundary. Collaborator failures
/// do not appear here: they degrade to fallback values inside the pipeline.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("invalid pipeline transition from {from} to {to}")]
    Transition {
        from: PlanningState,
        to: PlanningState,
    },
    #[error("could not serialize strategy document: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Planning agent
// ============================================================================

/// External collaborators injected into the agent at construction.
///
/// All are trait objects so tests and the offline demo can substitute stubs;
/// lifecycle is scoped to the agent, not process-global.
pub struct Collaborators {
    pub llm: Arc<dyn TextCompletion>,
    pub weather: Arc<dyn WeatherLookup>,
    pub geocoder: Arc<dyn Geocoder>,
    pub intel: Arc<dyn IntelSource>,
    /// API key embedded in generated static-map URLs.
    pub map_api_key: String,
}

/// Planning Section Chief agent.
pub struct PlanningAgent {
    config: PlanningConfig,
    collaborators: Collaborators,
}

impl PlanningAgent {
    pub fn new(config: PlanningConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
        }
    }

    /// Entry point: dispatch on the requested action.
    ///
    /// Unknown actions are rejected immediately without touching any
    /// collaborator. Pipeline failures are wrapped into a structured error
    /// echoing the request; nothing propagates as a raw fault.
    pub async fn process_request(&self, request: &PlanningRequest) -> PlanningResponse {
        match request.action.as_str() {
            ACTION_GENERATE_STRATEGY => match self.run_pipeline().await {
                Ok((document, _)) => PlanningResponse::Strategy(Box::new(document)),
                Err(e) => self.error_response(&request.action, &e),
            },
            ACTION_CREATE_MISSION_PLAN => match self.run_pipeline().await {
                Ok((document, mut tracker)) => match tracker.advance(PlanningState::PlanReady) {
                    Ok(()) => {
                        let plan =
                            derive_mission_plan(&document, Utc::now().date_naive());
                        info!(mission = %plan.mission_name, "mission plan ready");
                        PlanningResponse::Plan(Box::new(plan))
                    }
                    Err(e) => self.error_response(&request.action, &e),
                },
                Err(e) => self.error_response(&request.action, &e),
            },
            unknown => {
                warn!(action = unknown, "unknown action requested");
                PlanningResponse::Error(ErrorReport {
                    error: "Unknown action requested.".to_string(),
                    requested_action: unknown.to_string(),
                })
            }
        }
    }

    fn error_response(&self, action: &str, error: &PlanningError) -> PlanningResponse {
        warn!(action, error = %error, "planning pipeline failed");
        PlanningResponse::Error(ErrorReport {
            error: format!("Error processing request: {error}"),
            requested_action: action.to_string(),
        })
    }

    /// Run the pipeline through DOCUMENT_READY.
    async fn run_pipeline(&self) -> Result<(StrategyDocument, PipelineTracker), PlanningError> {
        let mut tracker = PipelineTracker::new();
        let c = &self.collaborators;

        // DATA_COLLECTED: section feeds plus weather and map lookups.
        let incident = c.intel.incident();
        let weather_outcome = weather::resolve(
            c.weather.as_ref(),
            c.llm.as_ref(),
            &incident.location,
            true,
        )
        .await;
        let operations = c.intel.operations(weather_outcome);
        let logistics = c.intel.logistics();
        let environment = c.intel.environment(&incident.location);
        let map_url =
            geocode::resolve_map_url(c.geocoder.as_ref(), &incident.location, &c.map_api_key)
                .await;
        tracker.advance(PlanningState::DataCollected)?;

        // AREA_ESTIMATED
        let search_area = radius::estimate(&incident, self.now(), &self.config.search);
        tracker.advance(PlanningState::AreaEstimated)?;

        // PRIORITIZED
        let prioritized = prioritizer::prioritize(
            c.llm.as_ref(),
            search_area.radius_km,
            &incident,
            &environment,
            &operations,
            &self.config.search,
        )
        .await;
        tracker.advance(PlanningState::Prioritized)?;

        // ALLOCATED
        let allocation = allocation::allocate(&prioritized, &logistics);
        tracker.advance(PlanningState::Allocated)?;

        let mission_objective = incident.mission_objective.clone();
        let mut document = StrategyDocument {
            incident_details: incident,
            operations_details: operations,
            logistics_details: logistics,
            environmental_details: environment,
            calculated_search_area: search_area,
            prioritized_search_areas: prioritized,
            suggested_resource_allocation: allocation,
            map_url,
            mission_objective,
            strategy_summary_text_model: String::new(),
            strategy_summary_text_original: String::new(),
        };

        // SUMMARIZED: the summary call may fail; the field then carries an
        // inline error string instead.
        document.strategy_summary_text_model = self.summarize(&document).await?;
        tracker.advance(PlanningState::Summarized)?;

        // DOCUMENT_READY
        document.strategy_summary_text_original =
            "See the model-generated summary for a user-friendly version.".to_string();
        tracker.advance(PlanningState::DocumentReady)?;

        info!(
            areas = document.prioritized_search_areas.len(),
            allocations = document.suggested_resource_allocation.len(),
            "strategy document ready"
        );
        Ok((document, tracker))
    }

    /// Summarize the document via the completion backend, degrading to an
    /// inline error string on any failure.
    async fn summarize(&self, document: &StrategyDocument) -> Result<String, PlanningError> {
        let payload = serde_json::to_string_pretty(document)?;
        match self
            .collaborators
            .llm
            .complete(&templates::summary_prompt(&payload))
            .await
        {
            Ok(text) if !text.trim().is_empty() => Ok(text),
            Ok(_) => {
                warn!("summary backend returned empty text");
                Ok("Error: Could not generate summary from the model.".to_string())
            }
            Err(e) => {
                warn!(error = %e, "summary generation failed");
                Ok("Error: Could not generate summary from the model.".to_string())
            }
        }
    }

    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

// ============================================================================
// Mission plan derivation
// ============================================================================

/// Derive a mission plan from a completed strategy document.
///
/// Pure projection: deriving twice from the same document with the same date
/// yields identical plans. The communication plan, safety protocols and
/// timeline are fixed skeletons.
pub fn derive_mission_plan(document: &StrategyDocument, date_prepared: NaiveDate) -> MissionPlan {
    let mission_name = format!(
        "SAR Mission - {} - {}",
        document.incident_details.incident_type, document.incident_details.location
    );

    let area_lines: Vec<String> = document
        .prioritized_search_areas
        .iter()
        .map(|a| format!("- {} (Priority: {})", a.area, a.priority))
        .collect();
    let allocation_lines: Vec<String> = document
        .suggested_resource_allocation
        .iter()
        .map(|e| format!("- {}: {}", e.area, e.suggested_resources.join(", ")))
        .collect();

    let plan_summary_text = format!(
        "Mission Plan Summary:\n\nMission Name: {mission_name}\nObjective: {}\n\nKey Search Areas:\n{}\n\nResource Allocation:\n{}\n\nSee the full document for communication, safety and timeline details.",
        document.mission_objective,
        area_lines.join("\n"),
        allocation_lines.join("\n"),
    );

    MissionPlan {
        mission_name,
        date_prepared: date_prepared.format("%Y-%m-%d").to_string(),
        objective: document.mission_objective.clone(),
        search_strategy_summary: document.strategy_summary_text_model.clone(),
        prioritized_search_areas: document.prioritized_search_areas.clone(),
        resource_allocation: document.suggested_resource_allocation.clone(),
        communication_plan: CommunicationPlan {
            primary_channel: "VHF Channel 16".to_string(),
            secondary_channel: "Satellite phone".to_string(),
            digital_platform: "SARNet App".to_string(),
            backup_communication: "Runner if digital fails".to_string(),
        },
        safety_protocols: vec![
            "Team check-in every hour".to_string(),
            "Emergency contact protocols in place".to_string(),
            "Wildlife awareness briefings".to_string(),
            "First aid kits with each team".to_string(),
        ],
        timeline: MissionTimeline {
            briefing_time: "06:30 PST".to_string(),
            start_time: "07:00 PST".to_string(),
            debriefing_time: "18:00 PST".to_string(),
            end_of_day: "19:00 PST".to_string(),
        },
        map_url: document.map_url.clone(),
        plan_summary_text,
    }
}
