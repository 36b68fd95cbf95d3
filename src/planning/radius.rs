//! Search-Area Radius Estimator
//!
//! Computes a naive circular search radius from subject experience and
//! elapsed time since the report. Pure in its inputs: the caller supplies
//! `now`, so repeated invocation with the same arguments is identical.

use crate::config::SearchConfig;
use crate::types::{IncidentRecord, SearchArea};
use chrono::NaiveDateTime;
use tracing::warn;

/// Timestamp layout expected in `time_reported` after dropping a trailing
/// zone token, e.g. "2024-08-03 14:00 PST" -> "2024-08-03 14:00".
const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Experience-based radius adjustment with its rationale clause.
fn experience_adjustment(experience_level: &str) -> (f64, &'static str) {
    let level = experience_level.to_lowercase();
    if level.contains("experienced") {
        (2.0, "experienced subject may have travelled farther")
    } else if level.contains("novice") || level.contains("beginner") {
        (0.5, "novice subject likely stayed close")
    } else {
        (1.0, "unknown experience level, assuming moderate range")
    }
}

/// Hours elapsed between the report and `now`. An unparseable timestamp is a
/// recovered error: the configured default is substituted and logged.
fn elapsed_hours(time_reported: &str, now: NaiveDateTime, config: &SearchConfig) -> f64 {
    let fields: Vec<&str> = time_reported.split_whitespace().take(2).collect();
    let candidate = fields.join(" ");

    match NaiveDateTime::parse_from_str(&candidate, REPORT_TIME_FORMAT) {
        Ok(reported) => {
            let hours = (now - reported).num_seconds() as f64 / 3600.0;
            hours.max(0.0)
        }
        Err(e) => {
            warn!(
                time_reported,
                error = %e,
                default_hours = config.default_elapsed_hours,
                "unparseable report timestamp, using default elapsed time"
            );
            config.default_elapsed_hours
        }
    }
}

/// Estimate the search area for an incident.
///
/// Base radius plus the experience adjustment, grown by elapsed hours,
/// floored at the configured minimum. The description states the radius and
/// elapsed hours to two decimal places alongside the location and the
/// experience rationale.
pub fn estimate(incident: &IncidentRecord, now: NaiveDateTime, config: &SearchConfig) -> SearchArea {
    let (adjustment, clause) = experience_adjustment(&incident.subject.experience_level);
    let hours = elapsed_hours(&incident.time_reported, now, config);

    let radius_km = (config.base_radius_km + adjustment + hours * config.radius_per_hour_km)
        .max(config.min_radius_km);

    let description = format!(
        "Estimated search radius: {:.2} km around {}. Subject profile: {} ({}). Elapsed since report: {:.2} hours.",
        radius_km, incident.last_known_location, incident.subject.experience_level, clause, hours
    );

    SearchArea {
        description,
        radius_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::{IntelSource, SimulatedIntel};

    fn incident_with(experience: &str, time_reported: &str) -> IncidentRecord {
        let mut incident = SimulatedIntel.incident();
        incident.subject.experience_level = experience.to_string();
        incident.time_reported = time_reported.to_string();
        incident
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn novice_at_report_time_is_exactly_one_point_five() {
        let incident = incident_with("Novice", "2024-08-03 14:00 PST");
        let area = estimate(&incident, at("2024-08-03 14:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 1.5);
        assert!(area.description.contains("1.50 km"));
        assert!(area.description.contains("0.00 hours"));
    }

    #[test]
    fn experienced_subject_grows_with_elapsed_time() {
        let incident = incident_with("Experienced hiker", "2024-08-03 14:00 PST");
        // 4 hours elapsed: 1.0 + 2.0 + 4 * 0.5 = 5.0
        let area = estimate(&incident, at("2024-08-03 18:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 5.0);
        assert!(area.description.contains("5.00 km"));
        assert!(area.description.contains("4.00 hours"));
        assert!(area.description.contains("Trailhead near park entrance"));
    }

    #[test]
    fn unknown_experience_gets_moderate_adjustment() {
        let incident = incident_with("avid birdwatcher", "2024-08-03 14:00 PST");
        let area = estimate(&incident, at("2024-08-03 14:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 2.0);
        assert!(area.description.contains("moderate range"));
    }

    #[test]
    fn experience_matching_is_case_insensitive_substring() {
        let incident = incident_with("BEGINNER skier", "2024-08-03 14:00 PST");
        let area = estimate(&incident, at("2024-08-03 14:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 1.5);
    }

    #[test]
    fn unparseable_timestamp_defaults_to_six_hours() {
        let incident = incident_with("Novice", "yesterday afternoon");
        // 1.0 + 0.5 + 6 * 0.5 = 4.5
        let area = estimate(&incident, at("2024-08-03 14:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 4.5);
        assert!(area.description.contains("6.00 hours"));
    }

    #[test]
    fn future_report_clamps_elapsed_at_zero() {
        let incident = incident_with("Novice", "2024-08-03 14:00 PST");
        let area = estimate(&incident, at("2024-08-03 12:00"), &SearchConfig::default());
        assert_eq!(area.radius_km, 1.5);
    }

    #[test]
    fn identical_inputs_are_idempotent() {
        let incident = incident_with("Experienced hiker", "2024-08-03 14:00 PST");
        let now = at("2024-08-03 20:30");
        let config = SearchConfig::default();
        let a = estimate(&incident, now, &config);
        let b = estimate(&incident, now, &config);
        assert_eq!(a, b);
    }
}
