use tracing::info;

use crate::{
    domain::{
        common::{GlycoloadConfig, entities::app_errors::CoreError, services::Service},
        meal_analysis::normalizer::LabelNormalizer,
    },
    infrastructure::{
        detector::HttpFoodDetector,
        forecast::TfServingForecaster,
        nutrition::{NutritionTable, load_label_aliases},
    },
};

pub type GlycoloadService = Service<HttpFoodDetector, NutritionTable, TfServingForecaster>;

pub async fn create_service(config: GlycoloadConfig) -> Result<GlycoloadService, CoreError> {
    let nutrition_table = match &config.nutrition.table_path {
        Some(path) => NutritionTable::load(path).await?,
        None => NutritionTable::embedded()?,
    };

    let mut normalizer = LabelNormalizer::default();
    if let Some(path) = &config.nutrition.label_aliases_path {
        normalizer = normalizer.with_overrides(load_label_aliases(path).await?);
    }

    let detector = HttpFoodDetector::new(&config.detector)?;
    let forecaster = TfServingForecaster::new(&config.forecast)?;

    info!(
        foods = nutrition_table.len(),
        aliases = normalizer.len(),
        portion_grams = config.analysis.portion_grams,
        forecast_steps = config.analysis.forecast_steps,
        "Meal analysis service ready"
    );

    Ok(Service::new(
        detector,
        nutrition_table,
        forecaster,
        normalizer,
        config.analysis,
    ))
}
