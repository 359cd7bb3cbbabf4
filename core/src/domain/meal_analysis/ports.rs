use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::{Detection, MealAnalysis, NutritionFact},
        value_objects::{AnalyzeDetectionsInput, AnalyzeMealInput, ForecastInput},
    },
};

/// Object detector turning opaque image bytes into labelled detections
#[cfg_attr(test, mockall::automock)]
pub trait FoodDetector: Send + Sync {
    fn detect(
        &self,
        image_data: Bytes,
    ) -> impl Future<Output = Result<Vec<Detection>, CoreError>> + Send;
}

/// Read-only nutrition reference keyed by canonical food name
#[cfg_attr(test, mockall::automock)]
pub trait NutritionLookup: Send + Sync {
    fn glycemic_index(&self, canonical_name: &str) -> Option<f64>;

    fn carbs_per_100g(&self, canonical_name: &str) -> Option<f64>;

    /// Both values, or `None` when either one is missing.
    fn fact(&self, canonical_name: &str) -> Option<NutritionFact> {
        Some(NutritionFact {
            glycemic_index: self.glycemic_index(canonical_name)?,
            carbs_per_100g: self.carbs_per_100g(canonical_name)?,
        })
    }
}

/// Point-forecast model predicting the next glucose reading
#[cfg_attr(test, mockall::automock)]
pub trait GlucoseForecaster: Send + Sync {
    fn forecast(
        &self,
        input: ForecastInput,
    ) -> impl Future<Output = Result<f64, CoreError>> + Send;
}

/// Service trait for the meal analysis pipeline
#[cfg_attr(test, mockall::automock)]
pub trait MealAnalysisService: Send + Sync {
    fn analyze_meal(
        &self,
        input: AnalyzeMealInput,
    ) -> impl Future<Output = Result<MealAnalysis, CoreError>> + Send;

    fn analyze_detections(
        &self,
        input: AnalyzeDetectionsInput,
    ) -> impl Future<Output = Result<MealAnalysis, CoreError>> + Send;
}
