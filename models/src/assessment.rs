// models/src/assessment.rs
// Outputs of the assessment pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Severity label used both for the reasoning service's urgency and for the
/// final status shown to the user. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "moderate" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" | "severe" | "emergency" => Ok(RiskLevel::Critical),
            _ => Err(ValidationError::UnknownRiskLevel(s.to_string())),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

deserialize_via_from_str!(RiskLevel);

/// Projections of the additive statistical score, all percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskStatistics {
    pub heart_attack_prob: f64,
    pub stroke_prob: f64,
    pub diabetic_prob: f64,
    pub overall_risk_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Warning,
    High,
    Critical,
}

/// A rule-triggered clinical warning with its citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineAlert {
    pub level: AlertLevel,
    pub message: String,
    pub source: String,
}

/// Natural-language explanation of a risk profile.
///
/// Whether it came from the primary service, the backup service or the
/// static fallback is deliberately not recorded in the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub analysis: String,
    /// `null` on the wire when the service gave no recognisable label.
    #[serde(default)]
    pub urgency: Option<RiskLevel>,
    pub explanation: String,
    pub recommendations: [String; 3],
}

/// The combined response for one assessment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub statistical_risk: RiskStatistics,
    pub guidelines: Vec<GuidelineAlert>,
    pub ai_analysis: ReasoningResult,
    pub final_status: RiskLevel,
    pub timestamp: DateTime<Utc>,
    /// False when the record could not be stored; the analysis itself is unaffected.
    pub persisted: bool,
}

impl AssessmentResult {
    pub fn has_critical_alert(&self) -> bool {
        self.guidelines
            .iter()
            .any(|alert| alert.level == AlertLevel::Critical)
    }
}
