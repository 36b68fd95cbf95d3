//! Section feeds - incident, operations, logistics and environmental data
//!
//! The `IntelSource` trait abstracts the command-structure collaborators
//! (Incident Commander, Operations Section Chief, Logistics Section Chief) so
//! the simulated fixture provider can be swapped for live feeds. The core
//! pipeline depends only on the record shapes, not on where they come from.

use crate::types::{
    EnvironmentalRecord, IncidentRecord, LogisticsRecord, OperationsRecord, SubjectProfile,
    WeatherOutcome,
};
use std::collections::BTreeMap;

/// Cloud coverage (percent) at or above which visibility is reported as
/// "Moderate" instead of "Good".
const VISIBILITY_CLOUD_THRESHOLD: f64 = 70.0;

/// Provider of the four section-feed records consumed each planning cycle.
pub trait IntelSource: Send + Sync {
    /// Incident data from the Incident Commander.
    fn incident(&self) -> IncidentRecord;

    /// Operations data, built around the resolved weather for the incident
    /// location.
    fn operations(&self, weather: WeatherOutcome) -> OperationsRecord;

    /// Logistics data from the Logistics Section Chief.
    fn logistics(&self) -> LogisticsRecord;

    /// Environmental data for the incident location.
    fn environment(&self, location: &str) -> EnvironmentalRecord;
}

/// Classify visibility from cloud coverage. An unavailable weather outcome
/// reads as clear sky and therefore "Good".
pub fn visibility_for(weather: &WeatherOutcome) -> &'static str {
    if weather.cloud_coverage_percent() < VISIBILITY_CLOUD_THRESHOLD {
        "Good"
    } else {
        "Moderate"
    }
}

/// Simulated section feeds: the missing-hiker scenario at Crystal Cove.
///
/// Fixture data standing in for live command-structure feeds.
pub struct SimulatedIntel;

impl IntelSource for SimulatedIntel {
    fn incident(&self) -> IncidentRecord {
        IncidentRecord {
            incident_type: "Missing Person".to_string(),
            priority: "High".to_string(),
            location: "Crystal Cove State Park, CA".to_string(),
            mission_objective: "Locate and rescue missing hiker".to_string(),
            time_reported: "2024-08-03 14:00 PST".to_string(),
            search_area_size_km2: 10.0,
            reporting_person: "Park Ranger John Doe".to_string(),
            last_known_location: "Trailhead near park entrance".to_string(),
            possible_scenarios: vec![
                "Lost on trail".to_string(),
                "Injury".to_string(),
                "Medical emergency".to_string(),
            ],
            special_instructions: "Search near marked trails first, then expand to backcountry. \
                                   Be aware of steep cliffs and wildlife."
                .to_string(),
            subject: SubjectProfile {
                name: "Alice Smith".to_string(),
                age: 34,
                gender: "Female".to_string(),
                clothing: "Red jacket, blue jeans, hiking boots".to_string(),
                items: vec![
                    "backpack".to_string(),
                    "water bottle".to_string(),
                    "cell phone (likely dead)".to_string(),
                ],
                health_conditions: vec!["asthma".to_string(), "allergies to bees".to_string()],
                experience_level: "Experienced hiker".to_string(),
            },
        }
    }

    fn operations(&self, weather: WeatherOutcome) -> OperationsRecord {
        let visibility = visibility_for(&weather).to_string();
        OperationsRecord {
            available_search_teams: vec![
                "Team Alpha".to_string(),
                "Team Bravo".to_string(),
                "Team Charlie".to_string(),
            ],
            current_weather: weather,
            visibility,
            areas_already_searched: vec![
                "Parking Area 1".to_string(),
                "Main Trails near Reservoir".to_string(),
            ],
        }
    }

    fn logistics(&self) -> LogisticsRecord {
        LogisticsRecord {
            available: BTreeMap::from([
                ("ground_teams".to_string(), 5),
                ("search_dogs".to_string(), 2),
                ("uavs".to_string(), 3),
                ("helicopters".to_string(), 1),
                ("paramedics".to_string(), 3),
                ("communication_units".to_string(), 4),
            ]),
            resource_locations: BTreeMap::from([
                ("ground_teams_base".to_string(), "Park HQ".to_string()),
                ("helicopters_base".to_string(), "Nearby airport".to_string()),
                ("uavs_staging".to_string(), "Open field near trailhead".to_string()),
            ]),
            communication_channels: BTreeMap::from([
                ("primary".to_string(), "VHF Channel 16".to_string()),
                ("secondary".to_string(), "Satellite phone".to_string()),
                ("digital".to_string(), "SARNet App".to_string()),
            ]),
            medical_supplies_status: "Adequate".to_string(),
            fuel_status: "Full".to_string(),
            transportation: "Trucks and SUVs available at Park HQ".to_string(),
        }
    }

    fn environment(&self, location: &str) -> EnvironmentalRecord {
        EnvironmentalRecord {
            location: location.to_string(),
            terrain_type: "Coastal mountains, mixed forest and trails".to_string(),
            vegetation_density: "Moderate to dense".to_string(),
            elevation_range_meters: "0-600".to_string(),
            water_sources: vec![
                "Freshwater creek".to_string(),
                "Small reservoir".to_string(),
            ],
            wildlife_hazards: vec![
                "Mountain lions".to_string(),
                "Snakes".to_string(),
                "Poison oak".to_string(),
            ],
            daylight_hours: "6:00 AM to 8:00 PM".to_string(),
            typical_weather_patterns: "Morning fog, sunny afternoons".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeatherReport;

    fn report(cloud: f64) -> WeatherOutcome {
        WeatherOutcome::Report(WeatherReport {
            temperature_c: 15.0,
            cloud_coverage_percent: cloud,
            rain_1h_mm: 0.0,
            snow_1h_mm: 0.0,
            conditions: "test".to_string(),
            resolved_with: None,
        })
    }

    #[test]
    fn visibility_thresholds() {
        assert_eq!(visibility_for(&report(0.0)), "Good");
        assert_eq!(visibility_for(&report(69.9)), "Good");
        assert_eq!(visibility_for(&report(70.0)), "Moderate");
        assert_eq!(visibility_for(&report(100.0)), "Moderate");

        // Unavailable weather reads optimistically
        let missing = WeatherOutcome::Unavailable {
            error: "x".to_string(),
            assist_used: false,
        };
        assert_eq!(visibility_for(&missing), "Good");
    }

    #[test]
    fn simulated_logistics_carries_full_catalogue() {
        let logistics = SimulatedIntel.logistics();
        for resource in [
            "ground_teams",
            "search_dogs",
            "uavs",
            "helicopters",
            "paramedics",
            "communication_units",
        ] {
            assert!(logistics.available.contains_key(resource), "missing {resource}");
        }
    }

    #[test]
    fn simulated_incident_is_stable() {
        let a = SimulatedIntel.incident();
        let b = SimulatedIntel.incident();
        assert_eq!(a, b);
        assert_eq!(a.location, "Crystal Cove State Park, CA");
    }
}
