// lib/src/orchestrator.rs
// Runs one assessment end to end: score, rules, reasoning, final status,
// persistence.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info};

use models::{
    AlertLevel, AssessmentResult, GuidelineAlert, HealthInput, HealthRecord, RiskLevel,
    RiskStatistics,
};

use crate::errors::Result;
use crate::reasoning::ClinicalReasoningProvider;
use crate::risk::{GuidelineRuleEngine, StatisticalRiskScorer};
use crate::storage_engine::HealthRecordStorage;

/// Scores above this escalate the status to at least `High`.
pub const HIGH_SCORE_THRESHOLD: f64 = 80.0;

/// Combines the three signals into the status shown to the user.
///
/// Starts from the reasoning urgency (`Low` when absent), replaces it with
/// `High` when the score exceeds the threshold, and finally with `Critical`
/// when any guideline alert is critical. Later steps always win.
pub fn derive_final_status(
    urgency: Option<RiskLevel>,
    stats: &RiskStatistics,
    alerts: &[GuidelineAlert],
) -> RiskLevel {
    let mut status = urgency.unwrap_or(RiskLevel::Low);
    if stats.overall_risk_score > HIGH_SCORE_THRESHOLD {
        status = RiskLevel::High;
    }
    if alerts.iter().any(|alert| alert.level == AlertLevel::Critical) {
        status = RiskLevel::Critical;
    }
    status
}

pub struct RiskAssessmentOrchestrator {
    scorer: StatisticalRiskScorer,
    rules: GuidelineRuleEngine,
    reasoning: Arc<ClinicalReasoningProvider>,
    records: Arc<dyn HealthRecordStorage>,
}

impl RiskAssessmentOrchestrator {
    pub fn new(
        reasoning: Arc<ClinicalReasoningProvider>,
        records: Arc<dyn HealthRecordStorage>,
    ) -> Self {
        RiskAssessmentOrchestrator {
            scorer: StatisticalRiskScorer::new(),
            rules: GuidelineRuleEngine::new(),
            reasoning,
            records,
        }
    }

    /// Assesses `input` for `user_id` and stores the outcome.
    ///
    /// Only invalid input is an error. A failed save is logged and reported
    /// through `persisted = false`; the analysis is returned unchanged.
    pub async fn assess(&self, user_id: &str, input: HealthInput) -> Result<AssessmentResult> {
        input.validate()?;

        let statistical_risk = self.scorer.score(&input);
        let guidelines = self.rules.evaluate(&input);
        let ai_analysis = self.reasoning.reason(&input, &statistical_risk).await;
        let final_status =
            derive_final_status(ai_analysis.urgency, &statistical_risk, &guidelines);
        let timestamp = Utc::now();

        let record = HealthRecord::new(user_id, input, &statistical_risk, final_status, timestamp);
        let persisted = match self.records.save(&record).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to store assessment {} for user {}: {}", record.id, user_id, e);
                false
            }
        };

        info!(
            "Assessment for user {}: score {}, {} alert(s), final status {}",
            user_id,
            statistical_risk.overall_risk_score,
            guidelines.len(),
            final_status
        );

        Ok(AssessmentResult {
            statistical_risk,
            guidelines,
            ai_analysis,
            final_status,
            timestamp,
            persisted,
        })
    }

    /// The user's stored assessments, newest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<HealthRecord>> {
        self.records.find_by_user(user_id).await
    }
}
