use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_analysis::entities::GlucoseCurve;

/// Peaks at or above this value call for a walk.
pub const HIGH_GLUCOSE_THRESHOLD: f64 = 180.0;
/// Peaks strictly below this value call for a snack.
pub const LOW_GLUCOSE_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    NoFoodDetected,
    Walk,
    Snack,
    Stable,
}

impl Recommendation {
    pub fn from_peak(peak: Option<f64>) -> Self {
        match peak {
            None => Recommendation::NoFoodDetected,
            Some(peak) if peak >= HIGH_GLUCOSE_THRESHOLD => Recommendation::Walk,
            Some(peak) if peak < LOW_GLUCOSE_THRESHOLD => Recommendation::Snack,
            Some(_) => Recommendation::Stable,
        }
    }

    pub fn from_curve(curve: &GlucoseCurve) -> Self {
        Self::from_peak(curve.peak())
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::NoFoodDetected => "No food detected. Please upload a clearer image.",
            Recommendation::Walk => "Walk for 15–20 minutes to reduce glucose spike",
            Recommendation::Snack => "Consume a small carbohydrate snack",
            Recommendation::Stable => "Glucose level expected to remain stable",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
