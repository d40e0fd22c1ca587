// models/src/record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HealthInput, RiskLevel, RiskStatistics};

/// The stored form of an assessment: the submitted fields plus the score and
/// final status they produced, keyed by the submitting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(flatten)]
    pub input: HealthInput,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecg_image_url: Option<String>,
    pub prediction_date: DateTime<Utc>,
}

impl HealthRecord {
    pub fn new(
        user_id: &str,
        input: HealthInput,
        stats: &RiskStatistics,
        risk_level: RiskLevel,
        prediction_date: DateTime<Utc>,
    ) -> Self {
        HealthRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            input,
            risk_score: stats.overall_risk_score,
            risk_level,
            ecg_image_url: None,
            prediction_date,
        }
    }
}
