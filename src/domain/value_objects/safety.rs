//! Scene safety value objects
//!
//! A `SafetyReport` is the strict JSON contract the validating model is
//! asked to fill in for one rendered scene. A report that cannot be
//! parsed is replaced by [`SafetyReport::conservative`], which fails the
//! overall verdict while leaving the per-axis fields at their harmless
//! values.

use serde::{Deserialize, Serialize};

/// Amount of violent content in a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolenceLevel {
    None,
    Mild,
    Moderate,
    Severe,
}

/// How frightening a scene reads for a young child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FearLevel {
    Calm,
    SlightlySpooky,
    Scary,
}

/// Whether the scene contains medical misinformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalMisinformation {
    None,
    Possible,
    Present,
}

/// Whether the scene contains sexual content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexualContent {
    None,
    Present,
}

/// Structured safety verdict for one piece of scene text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyReport {
    pub violence: ViolenceLevel,
    pub fear_level: FearLevel,
    pub medical_misinformation: MedicalMisinformation,
    pub sexual_content: SexualContent,
    pub overall_safe_for_age: bool,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl SafetyReport {
    /// Synthetic report substituted when the model's verdict cannot be
    /// parsed: per-axis fields stay at their harmless values, the
    /// overall verdict fails so the retry/fallback path engages.
    pub fn conservative(reason: impl Into<String>) -> Self {
        Self {
            violence: ViolenceLevel::None,
            fear_level: FearLevel::Calm,
            medical_misinformation: MedicalMisinformation::None,
            sexual_content: SexualContent::None,
            overall_safe_for_age: false,
            reasons: vec![reason.into()],
        }
    }

    /// True iff every one of the five safety conditions holds
    pub fn is_scene_safe(&self) -> bool {
        self.overall_safe_for_age
            && self.violence == ViolenceLevel::None
            && self.sexual_content == SexualContent::None
            && self.fear_level != FearLevel::Scary
            && self.medical_misinformation != MedicalMisinformation::Present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_report() -> SafetyReport {
        SafetyReport {
            violence: ViolenceLevel::None,
            fear_level: FearLevel::Calm,
            medical_misinformation: MedicalMisinformation::None,
            sexual_content: SexualContent::None,
            overall_safe_for_age: true,
            reasons: vec![],
        }
    }

    #[test]
    fn test_clean_report_is_safe() {
        assert!(clean_report().is_scene_safe());
    }

    #[test]
    fn test_overall_flag_dominates_other_fields() {
        let mut report = clean_report();
        report.overall_safe_for_age = false;
        assert!(!report.is_scene_safe());
    }

    #[test]
    fn test_any_violence_fails() {
        let mut report = clean_report();
        report.violence = ViolenceLevel::Mild;
        assert!(!report.is_scene_safe());
    }

    #[test]
    fn test_scary_fear_level_fails_but_spooky_passes() {
        let mut report = clean_report();
        report.fear_level = FearLevel::SlightlySpooky;
        assert!(report.is_scene_safe());

        report.fear_level = FearLevel::Scary;
        assert!(!report.is_scene_safe());
    }

    #[test]
    fn test_possible_misinformation_passes_present_fails() {
        let mut report = clean_report();
        report.medical_misinformation = MedicalMisinformation::Possible;
        assert!(report.is_scene_safe());

        report.medical_misinformation = MedicalMisinformation::Present;
        assert!(!report.is_scene_safe());
    }

    #[test]
    fn test_sexual_content_fails() {
        let mut report = clean_report();
        report.sexual_content = SexualContent::Present;
        assert!(!report.is_scene_safe());
    }

    #[test]
    fn test_conservative_report_is_unsafe_with_reason() {
        let report = SafetyReport::conservative("could not parse model verdict");
        assert!(!report.is_scene_safe());
        assert!(!report.overall_safe_for_age);
        assert_eq!(report.violence, ViolenceLevel::None);
        assert_eq!(report.fear_level, FearLevel::Calm);
        assert_eq!(report.reasons.len(), 1);
    }

    #[test]
    fn test_wire_format_uses_snake_case() {
        let json = r#"{
            "violence": "none",
            "fear_level": "slightly_spooky",
            "medical_misinformation": "possible",
            "sexual_content": "none",
            "overall_safe_for_age": true,
            "reasons": ["gentle suspense in the middle"]
        }"#;
        let report: SafetyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.fear_level, FearLevel::SlightlySpooky);
        assert!(report.is_scene_safe());
    }

    #[test]
    fn test_unknown_enum_value_is_a_parse_error() {
        let json = r#"{
            "violence": "extreme",
            "fear_level": "calm",
            "medical_misinformation": "none",
            "sexual_content": "none",
            "overall_safe_for_age": true
        }"#;
        assert!(serde_json::from_str::<SafetyReport>(json).is_err());
    }
}
