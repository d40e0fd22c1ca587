// lib/src/risk/statistical.rs

use log::debug;
use models::{HealthInput, RiskStatistics};

const OVERALL_CAP: f64 = 99.0;
const HEART_ATTACK_CAP: f64 = 95.0;
const STROKE_CAP: f64 = 90.0;
const DIABETIC_CAP: f64 = 95.0;
const NON_DIABETIC_CAP: f64 = 50.0;

/// Additive threshold scorer.
///
/// Every threshold is checked independently, so crossing a higher band adds
/// on top of the lower one (age 65 earns both the >45 and the >60 points).
/// The score is total: callers validate the input first, and unvalidated
/// NaN fields simply never cross a threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalRiskScorer;

impl StatisticalRiskScorer {
    pub fn new() -> Self {
        StatisticalRiskScorer
    }

    pub fn score(&self, input: &HealthInput) -> RiskStatistics {
        let accumulated = Self::accumulate(input);
        let overall = accumulated.min(OVERALL_CAP);

        let diabetic_prob = if input.has_diabetes {
            (overall + 15.0).min(DIABETIC_CAP)
        } else {
            (overall / 2.0).min(NON_DIABETIC_CAP)
        };

        let stats = RiskStatistics {
            heart_attack_prob: (overall + 5.0).min(HEART_ATTACK_CAP),
            stroke_prob: (overall + 2.0).min(STROKE_CAP),
            diabetic_prob,
            overall_risk_score: overall,
        };
        debug!("Statistical risk computed: {:?}", stats);
        stats
    }

    fn accumulate(input: &HealthInput) -> f64 {
        let mut score = 0.0;

        // Age
        if input.age > 45 {
            score += 10.0;
        }
        if input.age > 60 {
            score += 10.0;
        }

        // Overweight, then obese
        let bmi = input.bmi();
        if bmi > 25.0 {
            score += 5.0;
        }
        if bmi > 30.0 {
            score += 10.0;
        }

        // Stage 1, then stage 2 hypertension
        if input.systolic_bp > 130 || input.diastolic_bp > 80 {
            score += 10.0;
        }
        if input.systolic_bp > 140 || input.diastolic_bp > 90 {
            score += 10.0;
        }

        if input.cholesterol > 200.0 {
            score += 10.0;
        }
        if input.is_smoker {
            score += 15.0;
        }
        if input.has_diabetes {
            score += 10.0;
        }
        if input.has_hypertension {
            score += 5.0;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ActivityLevel, Sex};

    fn baseline() -> HealthInput {
        HealthInput {
            age: 25,
            gender: Sex::Female,
            weight: 60.0,
            height: 165.0,
            systolic_bp: 110,
            diastolic_bp: 70,
            heart_rate: 65,
            cholesterol: 160.0,
            blood_sugar: 85.0,
            is_smoker: false,
            has_diabetes: false,
            has_hypertension: false,
            activity_level: ActivityLevel::High,
            symptoms: vec![],
        }
    }

    fn worst_case() -> HealthInput {
        HealthInput {
            age: 65,
            gender: Sex::Male,
            weight: 120.0,
            height: 170.0,
            systolic_bp: 190,
            diastolic_bp: 125,
            heart_rate: 120,
            cholesterol: 300.0,
            blood_sugar: 250.0,
            is_smoker: true,
            has_diabetes: true,
            has_hypertension: true,
            activity_level: ActivityLevel::Sedentary,
            symptoms: vec![],
        }
    }

    #[test]
    fn healthy_profile_scores_zero() {
        let stats = StatisticalRiskScorer::new().score(&baseline());
        assert_eq!(stats.overall_risk_score, 0.0);
        assert_eq!(stats.heart_attack_prob, 5.0);
        assert_eq!(stats.stroke_prob, 2.0);
        assert_eq!(stats.diabetic_prob, 0.0);
    }

    #[test]
    fn high_risk_diabetic_profile() {
        let input = HealthInput {
            age: 55,
            gender: Sex::Male,
            weight: 95.0,
            height: 175.0,
            systolic_bp: 180,
            diastolic_bp: 110,
            heart_rate: 115,
            cholesterol: 280.0,
            blood_sugar: 200.0,
            is_smoker: true,
            has_diabetes: true,
            has_hypertension: true,
            activity_level: ActivityLevel::Sedentary,
            symptoms: vec![],
        };
        let stats = StatisticalRiskScorer::new().score(&input);
        // 10 (age) + 15 (bmi 31) + 20 (bp) + 10 + 15 + 10 + 5
        assert_eq!(stats.overall_risk_score, 85.0);
        assert_eq!(stats.heart_attack_prob, 90.0);
        assert_eq!(stats.stroke_prob, 87.0);
        assert_eq!(stats.diabetic_prob, 95.0);
    }

    #[test]
    fn every_factor_stays_within_its_cap() {
        let stats = StatisticalRiskScorer::new().score(&worst_case());
        assert_eq!(stats.overall_risk_score, 95.0);
        assert!(stats.overall_risk_score <= 99.0);
        assert_eq!(stats.heart_attack_prob, 95.0);
        assert_eq!(stats.stroke_prob, 90.0);
        assert_eq!(stats.diabetic_prob, 95.0);
    }

    #[test]
    fn non_diabetic_probability_is_half_the_score() {
        let mut input = worst_case();
        input.has_diabetes = false;
        let stats = StatisticalRiskScorer::new().score(&input);
        assert_eq!(stats.overall_risk_score, 85.0);
        assert_eq!(stats.diabetic_prob, 42.5);
    }

    #[test]
    fn score_is_monotonic_in_age() {
        let scorer = StatisticalRiskScorer::new();
        let mut input = baseline();
        let mut previous = -1.0;
        for age in [40, 50, 65] {
            input.age = age;
            let score = scorer.score(&input).overall_risk_score;
            assert!(score >= previous, "score dropped at age {age}");
            previous = score;
        }
        assert_eq!(previous, 20.0);
    }

    #[test]
    fn thresholds_are_strict() {
        let scorer = StatisticalRiskScorer::new();
        let mut input = baseline();
        input.age = 45;
        input.systolic_bp = 130;
        input.diastolic_bp = 80;
        input.cholesterol = 200.0;
        assert_eq!(scorer.score(&input).overall_risk_score, 0.0);

        input.diastolic_bp = 81;
        assert_eq!(scorer.score(&input).overall_risk_score, 10.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = StatisticalRiskScorer::new();
        let input = worst_case();
        assert_eq!(scorer.score(&input), scorer.score(&input));
    }
}
