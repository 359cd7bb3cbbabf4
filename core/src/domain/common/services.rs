use std::sync::Arc;

use crate::domain::{
    common::AnalysisSettings,
    meal_analysis::{
        normalizer::LabelNormalizer,
        ports::{FoodDetector, GlucoseForecaster, NutritionLookup},
    },
};

/// Holds the long-lived collaborators of the meal analysis pipeline.
///
/// Everything in here is built once at start-up and only read afterwards, so
/// cloning the service for each request is cheap and lock-free.
pub struct Service<D, N, F>
where
    D: FoodDetector,
    N: NutritionLookup,
    F: GlucoseForecaster,
{
    pub(crate) detector: Arc<D>,
    pub(crate) nutrition_lookup: Arc<N>,
    pub(crate) forecaster: Arc<F>,
    pub(crate) normalizer: Arc<LabelNormalizer>,
    pub(crate) settings: AnalysisSettings,
}

impl<D, N, F> Service<D, N, F>
where
    D: FoodDetector,
    N: NutritionLookup,
    F: GlucoseForecaster,
{
    pub fn new(
        detector: D,
        nutrition_lookup: N,
        forecaster: F,
        normalizer: LabelNormalizer,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            detector: Arc::new(detector),
            nutrition_lookup: Arc::new(nutrition_lookup),
            forecaster: Arc::new(forecaster),
            normalizer: Arc::new(normalizer),
            settings,
        }
    }
}

impl<D, N, F> Clone for Service<D, N, F>
where
    D: FoodDetector,
    N: NutritionLookup,
    F: GlucoseForecaster,
{
    fn clone(&self) -> Self {
        Self {
            detector: Arc::clone(&self.detector),
            nutrition_lookup: Arc::clone(&self.nutrition_lookup),
            forecaster: Arc::clone(&self.forecaster),
            normalizer: Arc::clone(&self.normalizer),
            settings: self.settings,
        }
    }
}
