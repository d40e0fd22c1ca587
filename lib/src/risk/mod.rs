// lib/src/risk/mod.rs
// Deterministic, stateless scoring of a single health record.

pub mod guidelines;
pub mod statistical;

pub use guidelines::GuidelineRuleEngine;
pub use statistical::StatisticalRiskScorer;
