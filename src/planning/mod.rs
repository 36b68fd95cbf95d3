//! Core planning computations
//!
//! Deterministic heart of the pipeline:
//! - `radius`: circular search-area estimation from elapsed time and subject
//!   experience
//! - `prioritizer`: model-ranked search areas with a strict output contract
//!   and a rule-based fallback
//! - `allocation`: deterministic resource distribution under the per-priority
//!   demand table

pub mod allocation;
pub mod prioritizer;
pub mod radius;
