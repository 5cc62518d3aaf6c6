//! Moral selection value objects
//!
//! The safe-moral corpus is process-wide immutable configuration data.
//! Random selection from it always goes through an injected `Rng` so
//! callers (and tests) control the source of randomness.

use serde::Serialize;

/// Curated morals known to be safe and age-appropriate for ages 5-10
pub const SAFE_MORALS: [&str; 10] = [
    "Kindness to others is important.",
    "Sharing and generosity make everyone happier.",
    "Being honest and telling the truth matters.",
    "It is okay to be afraid; courage means trying anyway.",
    "Friends help each other and work together.",
    "Taking care of the world and nature is important.",
    "Everyone makes mistakes, and we can learn from them.",
    "Being patient and not giving up helps you grow.",
    "It is important to be yourself and accept who you are.",
    "Helping others when they need it is a good thing.",
];

/// Disclaimer attached to the result when a requested moral was replaced
pub const MORAL_OVERRIDE_DISCLAIMER: &str = "The requested moral/lesson was deemed unsafe or \
     inappropriate for ages 5-10. A safe, age-appropriate moral was selected at random instead.";

/// Verdict of the moral safety classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoralVerdict {
    Safe,
    Unsafe,
}

/// The moral that will actually guide the story
#[derive(Debug, Clone, Serialize)]
pub struct MoralDecision {
    /// Moral guiding the generated story
    pub moral: String,
    /// True if the caller's moral was rejected and replaced
    pub overridden: bool,
    /// The caller's original moral, present iff overridden
    pub original_moral: Option<String>,
}

impl MoralDecision {
    /// Decision that keeps the given moral unchanged
    pub fn accepted(moral: impl Into<String>) -> Self {
        Self {
            moral: moral.into(),
            overridden: false,
            original_moral: None,
        }
    }

    /// Decision that replaces `original` with a vetted alternative
    pub fn overridden(moral: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            moral: moral.into(),
            overridden: true,
            original_moral: Some(original.into()),
        }
    }
}
