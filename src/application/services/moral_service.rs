//! Moral Service - Safety classification and selection of the story moral
//!
//! A caller-supplied moral is vetted by one classification call; a
//! rejected or missing moral is replaced by a random pick from the
//! curated safe corpus. Classification never errors toward the caller:
//! any failure, including a transport failure, resolves to Unsafe.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::application::ports::outbound::{InferencePort, InferenceRequest};
use crate::application::services::llm::prompt_builder;
use crate::domain::value_objects::{MoralDecision, MoralVerdict, SAFE_MORALS};

/// Service deciding which moral guides the story
pub struct MoralService {
    inference: Arc<dyn InferencePort>,
}

impl MoralService {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Classify a requested moral as safe or unsafe for the target age
    ///
    /// Sends one inference call asking for a single-word verdict and
    /// parses the first token case-insensitively. Empty, malformed, or
    /// failed responses all classify as Unsafe.
    pub async fn classify_moral(&self, moral: &str, age: u8) -> MoralVerdict {
        let prompt = prompt_builder::build_moral_classifier_prompt(moral, age);
        let request = InferenceRequest::from_user_prompt(prompt)
            .with_temperature(0.0)
            .with_max_tokens(5);

        let response = match self.inference.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Moral classification call failed, treating moral as unsafe");
                return MoralVerdict::Unsafe;
            }
        };

        let verdict_text = response.payload.collect_text().unwrap_or_default();
        if verdict_text.trim().to_uppercase().starts_with("SAFE") {
            MoralVerdict::Safe
        } else {
            debug!(verdict = %verdict_text.trim(), "Moral did not classify as SAFE");
            MoralVerdict::Unsafe
        }
    }

    /// Resolve the moral for a story
    ///
    /// An empty request picks uniformly at random from the safe corpus.
    /// A supplied moral is classified once: safe morals pass through
    /// unchanged, unsafe morals are replaced and the original preserved.
    pub async fn select_moral<R: Rng + ?Sized>(
        &self,
        requested: Option<&str>,
        age: u8,
        rng: &mut R,
    ) -> MoralDecision {
        let requested = requested.map(str::trim).filter(|moral| !moral.is_empty());

        let Some(moral) = requested else {
            let pick = random_safe_moral(rng);
            debug!(moral = pick, "No moral requested, picked from safe corpus");
            return MoralDecision::accepted(pick);
        };

        match self.classify_moral(moral, age).await {
            MoralVerdict::Safe => MoralDecision::accepted(moral),
            MoralVerdict::Unsafe => {
                let replacement = random_safe_moral(rng);
                info!(
                    original = moral,
                    replacement, "Requested moral rejected, overriding with safe moral"
                );
                MoralDecision::overridden(replacement, moral)
            }
        }
    }
}

fn random_safe_moral<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SAFE_MORALS.choose(rng).copied().unwrap_or(SAFE_MORALS[0])
}
