// lib/src/risk/guidelines.rs
// Fixed threshold rules after AHA, Mayo Clinic and ADA red-flag criteria.

use models::{ActivityLevel, AlertLevel, GuidelineAlert, HealthInput};

struct GuidelineRule {
    applies: fn(&HealthInput) -> bool,
    level: AlertLevel,
    message: &'static str,
    source: &'static str,
}

impl GuidelineRule {
    fn to_alert(&self) -> GuidelineAlert {
        GuidelineAlert {
            level: self.level,
            message: self.message.to_string(),
            source: self.source.to_string(),
        }
    }
}

// Evaluation order is declaration order.
const RULES: [GuidelineRule; 3] = [
    GuidelineRule {
        applies: |input| input.systolic_bp > 180 || input.diastolic_bp > 120,
        level: AlertLevel::Critical,
        message: "Hypertensive Crisis Detected. Seek emergency care immediately.",
        source: "AHA Guidelines",
    },
    GuidelineRule {
        applies: |input| input.heart_rate > 100 && input.activity_level == ActivityLevel::Sedentary,
        level: AlertLevel::Warning,
        message: "Resting Heart Rate is high (Tachycardia).",
        source: "Mayo Clinic Standards",
    },
    GuidelineRule {
        applies: |input| input.blood_sugar > 126.0 && !input.has_diabetes,
        level: AlertLevel::High,
        message: "Fasting blood sugar indicates potential Diabetes.",
        source: "ADA Standards",
    },
];

/// Evaluates every rule independently; all matching rules fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidelineRuleEngine;

impl GuidelineRuleEngine {
    pub fn new() -> Self {
        GuidelineRuleEngine
    }

    pub fn evaluate(&self, input: &HealthInput) -> Vec<GuidelineAlert> {
        RULES
            .iter()
            .filter(|rule| (rule.applies)(input))
            .map(GuidelineRule::to_alert)
            .collect()
    }
}
