use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        recommendation::Recommendation,
        value_objects::{FORECAST_INTERVAL_MINUTES, GLUCOSE_WINDOW_LEN},
    },
};

/// A single detector hit, one per detected bounding region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A detection whose label has been mapped onto the nutrition table vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedDetection {
    #[serde(rename = "name")]
    pub canonical_name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionFact {
    pub glycemic_index: f64,
    pub carbs_per_100g: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlycemicLoadResult {
    /// Only foods with a nutrition record appear here.
    pub per_item: BTreeMap<String, f64>,
    pub total: f64,
}

/// The three most recent glucose readings in mg/dL, oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucoseWindow([f64; GLUCOSE_WINDOW_LEN]);

impl GlucoseWindow {
    pub fn new(readings: [f64; GLUCOSE_WINDOW_LEN]) -> Self {
        Self(readings)
    }

    /// Builds a window from caller supplied readings, rejecting values that
    /// cannot be a glucose concentration.
    pub fn try_from_readings(readings: &[f64]) -> Result<Self, CoreError> {
        let readings: [f64; GLUCOSE_WINDOW_LEN] = readings.try_into().map_err(|_| {
            CoreError::Invalid(format!(
                "expected {} glucose readings, got {}",
                GLUCOSE_WINDOW_LEN,
                readings.len()
            ))
        })?;

        if let Some(bad) = readings.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(CoreError::Invalid(format!(
                "glucose readings must be positive numbers, got {}",
                bad
            )));
        }

        Ok(Self(readings))
    }

    pub fn readings(&self) -> [f64; GLUCOSE_WINDOW_LEN] {
        self.0
    }

    pub fn latest(&self) -> f64 {
        self.0[GLUCOSE_WINDOW_LEN - 1]
    }

    /// Drops the oldest reading and appends `next`.
    pub fn slide(&self, next: f64) -> Self {
        let [_, w1, w2] = self.0;
        Self([w1, w2, next])
    }
}

impl Default for GlucoseWindow {
    fn default() -> Self {
        Self([100.0, 105.0, 110.0])
    }
}

/// Forecast glucose values, one per interval, starting one interval after the meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GlucoseCurve(Vec<f64>);

impl GlucoseCurve {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn peak(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::max)
    }

    /// `(minutes after the meal, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, v)| ((i as u32 + 1) * FORECAST_INTERVAL_MINUTES, *v))
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Everything produced by one run of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MealAnalysis {
    pub foods: Vec<NormalizedDetection>,
    pub glycemic_load: GlycemicLoadResult,
    pub curve: GlucoseCurve,
    pub recommendation: Recommendation,
}

impl MealAnalysis {
    pub fn no_food_detected() -> Self {
        Self {
            foods: Vec::new(),
            glycemic_load: GlycemicLoadResult::default(),
            curve: GlucoseCurve::empty(),
            recommendation: Recommendation::NoFoodDetected,
        }
    }

    pub fn predicted_peak_glucose(&self) -> Option<f64> {
        self.curve.peak()
    }
}
