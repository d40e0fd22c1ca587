// lib/src/reasoning/fallback.rs

use models::{ReasoningResult, RiskLevel};

const FALLBACK_ANALYSIS: &str = "AI services are currently experiencing high traffic. However, based on the statistical analysis, your metrics have been recorded. Please consult a healthcare professional for a detailed evaluation.";
const FALLBACK_EXPLANATION: &str = "This is a generated fallback assessment because the external AI service is temporarily unavailable (Rate Limit/Connection Error).";
const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Consult a doctor",
    "Monitor Vital Signs",
    "Maintain Healthy Diet",
];

/// Canned answer returned when no reasoning service produced a usable reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallback;

impl StaticFallback {
    pub fn result(&self) -> ReasoningResult {
        ReasoningResult {
            analysis: FALLBACK_ANALYSIS.to_string(),
            urgency: Some(RiskLevel::Medium),
            explanation: FALLBACK_EXPLANATION.to_string(),
            recommendations: FALLBACK_RECOMMENDATIONS.map(String::from),
        }
    }
}
