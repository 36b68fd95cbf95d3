//! sar-planning: Planning Section Chief agent for simulated SAR operations
//!
//! One planning cycle assembles section feeds (incident, operations,
//! logistics, environmental), estimates a circular search radius, ranks
//! candidate search areas, allocates resources deterministically and emits a
//! strategy document or a derived mission plan.
//!
//! ## Architecture
//!
//! - **Planning core**: radius estimator, prioritizer (model + rule-based
//!   fallback), resource allocation engine
//! - **Collaborators**: text completion, weather lookup with typonym retry,
//!   geocoding — all trait-seamed and injected at construction
//! - **Orchestrator**: fixed-state pipeline producing StrategyDocument /
//!   MissionPlan

pub mod agents;
pub mod config;
pub mod geocode;
pub mod intel;
pub mod llm;
pub mod planning;
pub mod types;
pub mod weather;

// Re-export configuration
pub use config::{ModelConfig, PlanningConfig, SearchConfig};

// Re-export commonly used types
pub use types::{
    AllocationEntry, EnvironmentalRecord, ErrorReport, IncidentRecord, LogisticsRecord,
    MissionPlan, OperationsRecord, PlanningRequest, PlanningResponse, PrioritizedArea, Priority,
    SearchArea, StrategyDocument, WeatherOutcome, WeatherReport,
};

// Re-export the agent and its collaborator seams
pub use agents::{derive_mission_plan, Collaborators, PlanningAgent, PlanningState};
pub use geocode::{Geocoder, GoogleGeocoder};
pub use intel::{IntelSource, SimulatedIntel};
pub use llm::{GeminiClient, TextCompletion};
pub use weather::{OwmClient, WeatherLookup};
