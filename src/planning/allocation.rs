//! Resource Allocation Engine
//!
//! Deterministically distributes the tracked resource catalogue across
//! prioritized areas under a fixed per-priority demand table. Pure function
//! of its inputs: no model call, no clock, no randomness.
//!
//! ## Demand table
//!
//! | priority | ground_teams | search_dogs | uavs |
//! |----------|--------------|-------------|------|
//! | High     | 2            | 1           | 1    |
//! | Medium   | 1            | 0           | 1    |
//! | Low      | 1            | 0           | 0    |
//!
//! Areas are processed exactly in the order given by the prioritizer;
//! exhaustion is global across the pass, not per area. Leftovers over the
//! full catalogue (including types outside the demand table) surface as one
//! synthetic "Unallocated Resources" entry appended last.

use crate::types::{AllocationEntry, LogisticsRecord, PrioritizedArea, Priority};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Resource types drawn on by the demand table. Other catalogue entries
/// (helicopters, paramedics, communication_units) are tracked for leftover
/// reporting only.
const TRACKED_TYPES: [&str; 3] = ["ground_teams", "search_dogs", "uavs"];

const GROUND_TEAMS: &str = "ground_teams";

/// Per-priority demand over the tracked catalogue.
fn demand_for(priority: Priority) -> [(&'static str, u32); 3] {
    match priority {
        Priority::High => [("ground_teams", 2), ("search_dogs", 1), ("uavs", 1)],
        Priority::Medium => [("ground_teams", 1), ("search_dogs", 0), ("uavs", 1)],
        Priority::Low => [("ground_teams", 1), ("search_dogs", 0), ("uavs", 0)],
    }
}

/// Domain classification of an area name, used to pick rationale wording.
///
/// Explicit policy (case-insensitive substring on the area name), checked in
/// this order: "forested", then "water", then "trail".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    Forested,
    Water,
    Trail,
    Other,
}

/// Classify an area name for rationale augmentation.
pub fn classify_area(name: &str) -> AreaKind {
    let lower = name.to_lowercase();
    if lower.contains("forested") {
        AreaKind::Forested
    } else if lower.contains("water") {
        AreaKind::Water
    } else if lower.contains("trail") {
        AreaKind::Trail
    } else {
        AreaKind::Other
    }
}

/// Unit word for a resource type: "team" if the type name contains "team",
/// otherwise "unit".
fn unit_word(resource_type: &str) -> &'static str {
    if resource_type.contains("team") {
        "team"
    } else {
        "unit"
    }
}

/// Render one suggested-resource line.
fn resource_line(count: u32, resource_type: &str) -> String {
    format!("{count} {}(s) ({resource_type})", unit_word(resource_type))
}

/// One rationale sentence for an allocated resource type, augmented by the
/// area classification where the pairing is meaningful.
fn rationale_sentence(kind: AreaKind, resource_type: &str, priority: Priority) -> String {
    let base = format!("Assigned {resource_type} per {priority} priority demand.");
    let augmentation = match (kind, resource_type) {
        (AreaKind::Forested, "uavs") => Some("UAVs useful for thermal detection in foliage."),
        (AreaKind::Water, "ground_teams") => Some("Ground teams needed to search near water edges."),
        (AreaKind::Trail, "search_dogs") => {
            Some("Search dogs effective for scent tracking along trails.")
        }
        _ => None,
    };
    match augmentation {
        Some(extra) => format!("{base} {extra}"),
        None => base,
    }
}

/// Distribute resources across prioritized areas.
///
/// Emits a per-area entry only when at least one unit was allocated, then
/// the synthetic edge-case entries: "All areas" when nothing area-specific
/// happened, and "Unallocated Resources" listing every leftover across the
/// full catalogue. Never allocates more of any type than is available.
pub fn allocate(areas: &[PrioritizedArea], logistics: &LogisticsRecord) -> Vec<AllocationEntry> {
    let available = &logistics.available;
    let mut allocated: BTreeMap<&str, u32> = BTreeMap::new();
    let total_tracked: u32 = TRACKED_TYPES
        .iter()
        .map(|t| available.get(*t).copied().unwrap_or(0))
        .sum();

    let mut entries: Vec<AllocationEntry> = Vec::new();

    for area in areas {
        let kind = classify_area(&area.area);
        let mut lines = Vec::new();
        let mut sentences = Vec::new();

        for (resource_type, demand) in demand_for(area.priority) {
            if demand == 0 {
                continue;
            }
            let on_hand = available.get(resource_type).copied().unwrap_or(0);
            let used = allocated.get(resource_type).copied().unwrap_or(0);
            let grant = demand.min(on_hand.saturating_sub(used));
            if grant == 0 {
                continue;
            }
            *allocated.entry(resource_type).or_insert(0) += grant;
            lines.push(resource_line(grant, resource_type));
            sentences.push(rationale_sentence(kind, resource_type, area.priority));
        }

        if !lines.is_empty() {
            entries.push(AllocationEntry {
                area: area.area.clone(),
                suggested_resources: lines,
                rationale: sentences.join(" "),
            });
        } else if area.priority == Priority::High {
            // Starved High-priority area: spend one remaining ground team
            // if the pass left any.
            let on_hand = available.get(GROUND_TEAMS).copied().unwrap_or(0);
            let used = allocated.get(GROUND_TEAMS).copied().unwrap_or(0);
            if on_hand > used {
                *allocated.entry(GROUND_TEAMS).or_insert(0) += 1;
                debug!(area = %area.area, "high-priority area starved, granting reserve ground team");
                entries.push(AllocationEntry {
                    area: area.area.clone(),
                    suggested_resources: vec![resource_line(1, GROUND_TEAMS)],
                    rationale: "High priority area, allocating remaining ground team.".to_string(),
                });
            }
        }
    }

    let area_entries = entries.len();

    if area_entries == 0 {
        if total_tracked > 0 {
            entries.push(AllocationEntry {
                area: "All areas".to_string(),
                suggested_resources: vec!["None - No specific allocations".to_string()],
                rationale: "No area received a specific allocation.".to_string(),
            });
        } else {
            entries.push(AllocationEntry {
                area: "All areas".to_string(),
                suggested_resources: vec!["None - Resources depleted".to_string()],
                rationale: "No resources available for allocation.".to_string(),
            });
        }
    }

    // Leftovers over the full catalogue, not just the tracked types.
    let leftovers: Vec<String> = available
        .iter()
        .filter_map(|(resource_type, &on_hand)| {
            let used = allocated.get(resource_type.as_str()).copied().unwrap_or(0);
            let left = on_hand.saturating_sub(used);
            (left > 0).then(|| resource_line(left, resource_type))
        })
        .collect();

    if !leftovers.is_empty() {
        entries.push(AllocationEntry {
            area: "Unallocated Resources".to_string(),
            suggested_resources: leftovers,
            rationale: "Resources not assigned to any prioritized area; hold in reserve."
                .to_string(),
        });
    }

    info!(
        areas = areas.len(),
        area_entries,
        total_entries = entries.len(),
        "resource allocation pass complete"
    );

    entries
}
