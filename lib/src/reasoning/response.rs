// lib/src/reasoning/response.rs
// Turns free-form model output into a `ReasoningResult`.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use models::{ReasoningResult, RiskLevel};

use crate::errors::{AssessmentError, Result};

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```(?:json|JSON)?").expect("valid fence regex");
}

/// The loosely typed object a model replies with before shape checks.
#[derive(Debug, Deserialize)]
struct RawReasoning {
    analysis: String,
    #[serde(default)]
    urgency: Option<Value>,
    #[serde(default)]
    explanation: String,
    recommendations: Vec<String>,
}

pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Slice from the first `{` to the last `}`, dropping any chatter around it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses a fenced JSON reply. After the fences go, the whole remaining
/// text must be the object; any prose around it is malformed.
pub fn parse_reasoning(text: &str) -> Result<ReasoningResult> {
    let cleaned = strip_code_fences(text);
    let raw: RawReasoning = serde_json::from_str(&cleaned)
        .map_err(|e| AssessmentError::MalformedResponse(e.to_string()))?;
    into_reasoning(raw)
}

/// Parses a reply that embeds its JSON object somewhere in free text.
pub fn parse_embedded_reasoning(text: &str) -> Result<ReasoningResult> {
    let cleaned = strip_code_fences(text);
    let object = extract_json_object(&cleaned).ok_or_else(|| {
        AssessmentError::MalformedResponse("no JSON object in reply".to_string())
    })?;
    let raw: RawReasoning = serde_json::from_str(object)
        .map_err(|e| AssessmentError::MalformedResponse(e.to_string()))?;
    into_reasoning(raw)
}

/// Extra recommendations are truncated to three; fewer than three is
/// malformed. An urgency label outside the known levels is dropped rather
/// than failing the whole reply.
fn into_reasoning(raw: RawReasoning) -> Result<ReasoningResult> {
    let count = raw.recommendations.len();
    let mut recommendations = raw.recommendations.into_iter();
    let recommendations = match (recommendations.next(), recommendations.next(), recommendations.next()) {
        (Some(first), Some(second), Some(third)) => [first, second, third],
        _ => {
            return Err(AssessmentError::MalformedResponse(format!(
                "expected 3 recommendations, got {}",
                count
            )))
        }
    };

    let urgency = raw.urgency.as_ref().and_then(parse_urgency);
    if urgency.is_none() {
        debug!("Reply urgency {:?} not recognised; leaving it unset", raw.urgency);
    }

    Ok(ReasoningResult {
        analysis: raw.analysis,
        urgency,
        explanation: raw.explanation,
        recommendations,
    })
}

fn parse_urgency(value: &Value) -> Option<RiskLevel> {
    value.as_str().and_then(|label| label.parse().ok())
}
