//! Location typonym generation.
//!
//! Produces an ordered sequence of place-name variants to retry against the
//! weather lookup, most specific first. Two strategies: a deterministic
//! comma-splitting generator and a model-assisted generator that falls back
//! to the deterministic one on any failure.

use crate::llm::{templates, TextCompletion};
use tracing::{debug, warn};

/// Deterministic typonym generator.
///
/// Splitting on commas: with two or more segments the sequence is
/// `[original, "first,last", last, first]`; with one segment it is just
/// `[original]`. Empty segments still count toward arity, so a trailing
/// comma produces the four-candidate form (an empty candidate simply never
/// resolves).
pub fn basic_typonyms(location: &str) -> Vec<String> {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();

    match parts.as_slice() {
        [] | [_] => vec![location.to_string()],
        [first, .., last] => vec![
            location.to_string(),
            format!("{first},{last}"),
            (*last).to_string(),
            (*first).to_string(),
        ],
    }
}

/// Model-assisted typonym generator.
///
/// Asks the completion backend for a comma-separated list of geographically
/// related variants, specific to general. A call error or an empty response
/// falls back to `basic_typonyms`.
pub async fn assisted_typonyms(llm: &dyn TextCompletion, location: &str) -> Vec<String> {
    match llm.complete(&templates::typonym_prompt(location)).await {
        Ok(response) => {
            let candidates: Vec<String> = response
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();

            if candidates.is_empty() {
                warn!(location, "typonym model returned no candidates, using basic generator");
                basic_typonyms(location)
            } else {
                debug!(location, count = candidates.len(), "model-assisted typonyms generated");
                candidates
            }
        }
        Err(e) => {
            warn!(location, error = %e, "typonym model call failed, using basic generator");
            basic_typonyms(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    struct FixedCompletion(&'static str);

    #[async_trait]
    impl TextCompletion for FixedCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
        fn backend_name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl TextCompletion for FailingCompletion {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            bail!("quota exceeded")
        }
        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn basic_two_part_name_narrows_in_order() {
        assert_eq!(
            basic_typonyms("Crystal Cove State Park, CA"),
            vec![
                "Crystal Cove State Park, CA".to_string(),
                "Crystal Cove State Park,CA".to_string(),
                "CA".to_string(),
                "Crystal Cove State Park".to_string(),
            ]
        );
    }

    #[test]
    fn basic_three_part_name_uses_first_and_last() {
        assert_eq!(
            basic_typonyms("Big Sur, Monterey County, CA"),
            vec![
                "Big Sur, Monterey County, CA".to_string(),
                "Big Sur,CA".to_string(),
                "CA".to_string(),
                "Big Sur".to_string(),
            ]
        );
    }

    #[test]
    fn basic_single_and_empty_names_pass_through() {
        assert_eq!(basic_typonyms("Yosemite"), vec!["Yosemite".to_string()]);
        assert_eq!(basic_typonyms(""), vec![String::new()]);
    }

    #[test]
    fn basic_trailing_comma_counts_as_two_segments() {
        assert_eq!(
            basic_typonyms("CA,"),
            vec![
                "CA,".to_string(),
                "CA,".to_string(),
                String::new(),
                "CA".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn assisted_splits_and_trims_model_output() {
        let llm = FixedCompletion("Crystal Cove, Newport Beach , California");
        let typonyms = assisted_typonyms(&llm, "Crystal Cove State Park, CA").await;
        assert_eq!(
            typonyms,
            vec![
                "Crystal Cove".to_string(),
                "Newport Beach".to_string(),
                "California".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn assisted_falls_back_on_call_error() {
        let typonyms = assisted_typonyms(&FailingCompletion, "Crystal Cove State Park, CA").await;
        assert_eq!(typonyms, basic_typonyms("Crystal Cove State Park, CA"));
    }

    #[tokio::test]
    async fn assisted_falls_back_on_empty_response() {
        let llm = FixedCompletion("  , ,  ");
        let typonyms = assisted_typonyms(&llm, "Yosemite").await;
        assert_eq!(typonyms, vec!["Yosemite".to_string()]);
    }
}
