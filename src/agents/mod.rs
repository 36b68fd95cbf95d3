//! Planning agent orchestration
//!
//! The `PlanningAgent` sequences the section feeds, radius estimation,
//! prioritization, allocation and document assembly into a strategy document
//! and, on request, a mission plan.

pub mod planning_agent;

pub use planning_agent::{
    derive_mission_plan, Collaborators, PlanningAgent, PlanningError, PlanningState,
};
