// models/src/lib.rs
// Shared data model for the CardioGuard assessment pipeline.

/// Implements `Deserialize` for a type through its `FromStr` impl, so the
/// enumerations below accept loosely-cased labels from web forms and
/// language-model output alike.
macro_rules! deserialize_via_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let raw = String::deserialize(deserializer)?;
                    raw.parse().map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

pub mod assessment;
pub mod errors;
pub mod health;
pub mod record;
pub mod user;

pub use assessment::{
    AlertLevel, AssessmentResult, GuidelineAlert, ReasoningResult, RiskLevel, RiskStatistics,
};
pub use errors::{ValidationError, ValidationResult};
pub use health::{ActivityLevel, HealthInput, Sex, Symptom};
pub use record::HealthRecord;
pub use user::{Login, NewUser, User};
