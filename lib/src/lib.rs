// lib/src/lib.rs
// The CardioGuard assessment pipeline: statistical scoring, guideline rules,
// external clinical reasoning with fallbacks, and record persistence.

pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod reasoning;
pub mod risk;
pub mod storage_engine;

pub use crate::errors::{AssessmentError, Result};
pub use crate::orchestrator::{derive_final_status, RiskAssessmentOrchestrator};
pub use crate::reasoning::{ClinicalReasoningProvider, ReasoningStrategy};
pub use crate::risk::{GuidelineRuleEngine, StatisticalRiskScorer};
pub use crate::storage_engine::{
    open_storage, HealthRecordStorage, InMemoryStorage, SledHealthRecordStorage, SledUserStorage,
    Storage, UserStorageEngine,
};
