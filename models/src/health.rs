// models/src/health.rs
// The self-assessment request submitted by the web form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::errors::{ValidationError, ValidationResult};

/// Biological sex as captured by the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            _ => Err(ValidationError::UnknownSex(s.to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
            Sex::Other => write!(f, "Other"),
        }
    }
}

/// Self-reported level of physical activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Moderate,
    High,
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "low" is what older form versions send; it never counted as sedentary.
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "moderate" | "low" => Ok(ActivityLevel::Moderate),
            "high" | "active" => Ok(ActivityLevel::High),
            _ => Err(ValidationError::UnknownActivityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::High => write!(f, "high"),
        }
    }
}

/// The fixed symptom vocabulary offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Symptom {
    #[serde(rename = "Chest Pain")]
    ChestPain,
    #[serde(rename = "Shortness of Breath")]
    ShortnessOfBreath,
    Dizziness,
    Palpitations,
    Numbness,
    Sweating,
    Fatigue,
    Nausea,
}

impl Symptom {
    pub const ALL: [Symptom; 8] = [
        Symptom::ChestPain,
        Symptom::ShortnessOfBreath,
        Symptom::Dizziness,
        Symptom::Palpitations,
        Symptom::Numbness,
        Symptom::Sweating,
        Symptom::Fatigue,
        Symptom::Nausea,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Symptom::ChestPain => "Chest Pain",
            Symptom::ShortnessOfBreath => "Shortness of Breath",
            Symptom::Dizziness => "Dizziness",
            Symptom::Palpitations => "Palpitations",
            Symptom::Numbness => "Numbness",
            Symptom::Sweating => "Sweating",
            Symptom::Fatigue => "Fatigue",
            Symptom::Nausea => "Nausea",
        }
    }
}

impl FromStr for Symptom {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Symptom::ALL
            .into_iter()
            .find(|symptom| symptom.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownSymptom(s.to_string()))
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

deserialize_via_from_str!(Sex, ActivityLevel, Symptom);

/// One self-assessment: vitals, history flags and current symptoms.
///
/// Numeric fields accept JSON numbers or numeric strings, since browsers
/// submit `<input type="number">` values as text.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInput {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub age: u32,
    #[serde(alias = "sex")]
    pub gender: Sex,
    /// Kilograms.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub weight: f64,
    /// Centimetres.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub height: f64,
    #[serde(rename = "systolicBP")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub systolic_bp: u32,
    #[serde(rename = "diastolicBP")]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub diastolic_bp: u32,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub heart_rate: u32,
    /// Total cholesterol, mg/dL.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub cholesterol: f64,
    /// Fasting blood sugar, mg/dL.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub blood_sugar: f64,
    #[serde(default)]
    pub is_smoker: bool,
    #[serde(default)]
    pub has_diabetes: bool,
    #[serde(default)]
    pub has_hypertension: bool,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub symptoms: Vec<Symptom>,
}

impl HealthInput {
    /// Body mass index, weight(kg) / height(m)².
    pub fn bmi(&self) -> f64 {
        let height_m = self.height / 100.0;
        self.weight / (height_m * height_m)
    }

    /// Comma-joined symptom labels in submission order.
    pub fn symptom_list(&self) -> String {
        self.symptoms
            .iter()
            .map(Symptom::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Rejects values that cannot describe a living adult or child.
    pub fn validate(&self) -> ValidationResult<()> {
        check_range("age", f64::from(self.age), 1.0, 130.0)?;
        check_range("weight", self.weight, 1.0, 500.0)?;
        check_range("height", self.height, 30.0, 272.0)?;
        check_range("systolicBP", f64::from(self.systolic_bp), 40.0, 300.0)?;
        check_range("diastolicBP", f64::from(self.diastolic_bp), 20.0, 200.0)?;
        check_range("heartRate", f64::from(self.heart_rate), 20.0, 300.0)?;
        check_range("cholesterol", self.cholesterol, 0.0, 1000.0)?;
        check_range("bloodSugar", self.blood_sugar, 0.0, 1500.0)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
