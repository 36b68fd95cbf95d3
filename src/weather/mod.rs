//! Weather Resolution
//!
//! Drives the typonym sequence against the weather-lookup collaborator until
//! one candidate resolves or all are exhausted. A not-found candidate is
//! recoverable (try the next); transport/auth errors and exhaustion both wrap
//! into `WeatherOutcome::Unavailable`, which the pipeline embeds in the
//! document rather than failing.

use crate::llm::TextCompletion;
use crate::types::{WeatherOutcome, WeatherReport};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

mod owm;
pub mod typonyms;

pub use owm::OwmClient;

/// Weather-by-place collaborator.
///
/// `Ok(None)` means the place name was not recognized (recoverable within the
/// typonym chain); `Err` is a transport/auth failure that aborts the chain.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn lookup(&self, place: &str) -> Result<Option<WeatherReport>>;
}

/// Resolve weather for a location, retrying through typonym candidates.
///
/// With `assisted` set, candidates come from the model-assisted generator
/// (which itself falls back to the deterministic one); `assist_used` is
/// recorded whenever the assisted list held more than one candidate. A
/// success under a substituted name carries a diagnostic note naming the
/// substitution.
pub async fn resolve(
    lookup: &dyn WeatherLookup,
    llm: &dyn TextCompletion,
    location: &str,
    assisted: bool,
) -> WeatherOutcome {
    let candidates = if assisted {
        typonyms::assisted_typonyms(llm, location).await
    } else {
        typonyms::basic_typonyms(location)
    };
    let assist_used = assisted && candidates.len() > 1;

    for candidate in &candidates {
        match lookup.lookup(candidate).await {
            Ok(Some(mut report)) => {
                if candidate != location {
                    info!(original = location, resolved = %candidate, "weather resolved under typonym");
                    report.resolved_with = Some(format!(
                        "Original name '{location}' wasn't found; '{candidate}' was used to get weather info."
                    ));
                }
                return WeatherOutcome::Report(report);
            }
            Ok(None) => {
                debug!(candidate = %candidate, "location not found, trying next typonym");
            }
            Err(e) => {
                warn!(error = %e, "weather lookup failed");
                return WeatherOutcome::Unavailable {
                    error: format!("Error fetching weather data: {e}"),
                    assist_used,
                };
            }
        }
    }

    let mut error = format!("Location '{location}' and variations not found.");
    if assist_used {
        error.push_str(" Model-generated variations were used but none were successful.");
    }
    error.push_str(
        " Please check the location name and try again with a more general or correctly formatted name (e.g., 'City,Country').",
    );
    WeatherOutcome::Unavailable { error, assist_used }
}
