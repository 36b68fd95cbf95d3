//! Prompt templates for the planning pipeline.
//!
//! Three prompts are issued per full cycle: search-area prioritization,
//! typonym generation for the weather lookup, and the final strategy summary.
//! Each is a const template filled by a small builder so tests can assert on
//! the embedded context.

use crate::types::{EnvironmentalRecord, IncidentRecord, OperationsRecord, WeatherOutcome};

/// Prioritization prompt. The output contract is strict: a JSON array of
/// objects with exactly the keys `area`, `priority`, `rationale`, where
/// `priority` is one of High | Medium | Low. Anything else is rejected by the
/// caller and replaced with the rule-based ranking.
const PRIORITIZATION_PROMPT: &str = r#"You are assisting a Planning Section Chief in a search and rescue operation.
Rank candidate search areas for a missing subject.

### SITUATION
Last known location: {last_known_location}
Search radius: {radius_km} km
Subject: {experience_level}; health conditions: {health_conditions}
Terrain: {terrain_type} | Vegetation: {vegetation_density}
Weather: {weather}
Available teams: {teams}
Incident priority: {urgency}

### INSTRUCTIONS
1. Propose between 3 and 5 search areas within the radius.
2. Order them from highest to lowest urgency.
3. Output ONLY a JSON array. No preamble. No markdown.

### OUTPUT FORMAT
[{"area": "<name>", "priority": "High|Medium|Low", "rationale": "<one sentence>"}]"#;

/// Typonym prompt: comma-separated place-name variants, specific to general.
const TYPONYM_PROMPT: &str = r#"Generate a list of alternative location names that are geographically related to "{location}".
These names should be suitable for a weather API that might not recognize very specific locations.
Provide variations that range from more specific to more general, if applicable.
Return the locations as a comma-separated list and nothing else.

Example input: Crystal Cove State Park, CA
Example output: Crystal Cove State Park, CA, Crystal Cove, Newport Beach, CA, Orange County, CA, California, USA"#;

/// Strategy summary prompt over the serialized document.
const SUMMARY_PROMPT: &str = r#"You are a helpful assistant for a Planning Section Chief in search and rescue operations.
Based on the following structured search strategy, write a concise, human-readable summary.

Focus on:
- Clearly stating the incident and missing subject details.
- Summarizing the key prioritized search areas and the rationale behind them.
- Presenting the suggested resource allocation in an actionable way.
- Including the current weather conditions and the map link if available.
- Maintain a professional tone appropriate for emergency response personnel.

Structured search strategy (JSON):
```json
{strategy_json}
```"#;

/// Render the weather outcome as a one-line snapshot for prompts.
pub fn weather_snapshot(weather: &WeatherOutcome) -> String {
    match weather {
        WeatherOutcome::Report(r) => format!(
            "{}, {:.1}C, {:.0}% cloud, rain {:.1} mm/h, snow {:.1} mm/h",
            r.conditions, r.temperature_c, r.cloud_coverage_percent, r.rain_1h_mm, r.snow_1h_mm
        ),
        WeatherOutcome::Unavailable { error, .. } => format!("unavailable ({error})"),
    }
}

/// Build the prioritization prompt from the planning context.
pub fn prioritization_prompt(
    radius_km: f64,
    incident: &IncidentRecord,
    environment: &EnvironmentalRecord,
    operations: &OperationsRecord,
) -> String {
    PRIORITIZATION_PROMPT
        .replace("{last_known_location}", &incident.last_known_location)
        .replace("{radius_km}", &format!("{radius_km:.2}"))
        .replace("{experience_level}", &incident.subject.experience_level)
        .replace("{health_conditions}", &incident.subject.health_conditions.join(", "))
        .replace("{terrain_type}", &environment.terrain_type)
        .replace("{vegetation_density}", &environment.vegetation_density)
        .replace("{weather}", &weather_snapshot(&operations.current_weather))
        .replace("{teams}", &operations.available_search_teams.join(", "))
        .replace("{urgency}", &incident.priority)
}

/// Build the typonym-generation prompt for a place name.
pub fn typonym_prompt(location: &str) -> String {
    TYPONYM_PROMPT.replace("{location}", location)
}

/// Build the summary prompt from the serialized strategy document.
pub fn summary_prompt(strategy_json: &str) -> String {
    SUMMARY_PROMPT.replace("{strategy_json}", strategy_json)
}
