use tracing::{error, info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    meal_analysis::{
        deduplication::deduplicate,
        entities::MealAnalysis,
        glycemic_load::GlycemicLoadCalculator,
        ports::{FoodDetector, GlucoseForecaster, MealAnalysisService, NutritionLookup},
        recommendation::Recommendation,
        trajectory::TrajectoryPredictor,
        value_objects::{AnalyzeDetectionsInput, AnalyzeMealInput},
    },
};

impl<D, N, F> MealAnalysisService for Service<D, N, F>
where
    D: FoodDetector,
    N: NutritionLookup,
    F: GlucoseForecaster,
{
    #[instrument(
        skip(self, input),
        fields(analysis_id = %generate_uuid_v7(), image_bytes = input.image_data.len())
    )]
    async fn analyze_meal(&self, input: AnalyzeMealInput) -> Result<MealAnalysis, CoreError> {
        let detections = self.detector.detect(input.image_data).await.map_err(|e| {
            error!("Food detection failed: {}", e);
            e
        })?;

        info!(detections = detections.len(), "Food detection completed");

        self.analyze_detections(AnalyzeDetectionsInput {
            detections,
            recent_glucose: input.recent_glucose,
        })
        .await
    }

    #[instrument(skip(self, input), fields(detections = input.detections.len()))]
    async fn analyze_detections(
        &self,
        input: AnalyzeDetectionsInput,
    ) -> Result<MealAnalysis, CoreError> {
        if input.detections.is_empty() {
            info!("No food detected, skipping forecast");
            return Ok(MealAnalysis::no_food_detected());
        }

        // 1. Normalize labels, then keep one record per food
        let normalized = self.normalizer.normalize(&input.detections);
        let foods = deduplicate(normalized);

        // 2. Glycemic load of the assumed portion
        let glycemic_load =
            GlycemicLoadCalculator::new(self.nutrition_lookup.as_ref(), self.settings.portion_grams)
                .calculate(&foods);

        // 3. Forecast the post-meal curve
        let curve =
            TrajectoryPredictor::new(self.forecaster.as_ref(), self.settings.forecast_steps)
                .predict(input.recent_glucose, glycemic_load.total)
                .await
                .map_err(|e| {
                    error!("Glucose forecast failed: {}", e);
                    e
                })?;

        let recommendation = Recommendation::from_curve(&curve);

        info!(
            foods = foods.len(),
            glycemic_load = glycemic_load.total,
            peak = ?curve.peak(),
            ?recommendation,
            "Meal analysis completed"
        );

        Ok(MealAnalysis {
            foods,
            glycemic_load,
            curve,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        common::AnalysisSettings,
        meal_analysis::{
            entities::{Detection, GlucoseWindow, NormalizedDetection},
            normalizer::LabelNormalizer,
            ports::{MockFoodDetector, MockGlucoseForecaster},
            value_objects::ForecastInput,
        },
    };

    struct StaticNutrition(HashMap<&'static str, (f64, f64)>);

    impl NutritionLookup for StaticNutrition {
        fn glycemic_index(&self, canonical_name: &str) -> Option<f64> {
            self.0.get(canonical_name).map(|(gi, _)| *gi)
        }

        fn carbs_per_100g(&self, canonical_name: &str) -> Option<f64> {
            self.0.get(canonical_name).map(|(_, carbs)| *carbs)
        }
    }

    fn nutrition() -> StaticNutrition {
        StaticNutrition(HashMap::from([
            ("white_rice", (73.0, 28.0)),
            ("dal", (30.0, 20.0)),
        ]))
    }

    fn drift_forecaster() -> MockGlucoseForecaster {
        let mut forecaster = MockGlucoseForecaster::new();
        forecaster.expect_forecast().returning(|input: ForecastInput| {
            Box::pin(std::future::ready(Ok(
                input.readings[2] + 0.1 * input.glycemic_load
            )))
        });
        forecaster
    }

    fn detector_returning(detections: Vec<Detection>) -> MockFoodDetector {
        let mut detector = MockFoodDetector::new();
        detector
            .expect_detect()
            .times(1)
            .returning(move |_| Box::pin(std::future::ready(Ok(detections.clone()))));
        detector
    }

    fn service(
        detector: MockFoodDetector,
        forecaster: MockGlucoseForecaster,
    ) -> Service<MockFoodDetector, StaticNutrition, MockGlucoseForecaster> {
        Service::new(
            detector,
            nutrition(),
            forecaster,
            LabelNormalizer::default(),
            AnalysisSettings::default(),
        )
    }

    fn meal_input() -> AnalyzeMealInput {
        AnalyzeMealInput {
            image_data: Bytes::from_static(b"jpeg"),
            recent_glucose: GlucoseWindow::new([100.0, 105.0, 110.0]),
        }
    }

    #[tokio::test]
    async fn test_analyze_meal_end_to_end() {
        let detector = detector_returning(vec![
            Detection::new("rice", 0.92),
            Detection::new("dal", 0.88),
            Detection::new("rice", 0.41),
        ]);
        let service = service(detector, drift_forecaster());

        let analysis = service.analyze_meal(meal_input()).await.unwrap();

        assert_eq!(
            analysis.foods,
            vec![
                NormalizedDetection {
                    canonical_name: "white_rice".to_string(),
                    confidence: 0.92
                },
                NormalizedDetection {
                    canonical_name: "dal".to_string(),
                    confidence: 0.88
                },
            ]
        );
        assert_eq!(analysis.glycemic_load.total, 52.88);
        assert_eq!(analysis.curve.len(), 12);

        let peak = analysis.predicted_peak_glucose().unwrap();
        assert!((peak - 173.456).abs() < 1e-9);
        assert_eq!(analysis.recommendation, Recommendation::Stable);
    }

    #[tokio::test]
    async fn test_empty_detections_short_circuit() {
        let detector = detector_returning(Vec::new());
        let mut forecaster = MockGlucoseForecaster::new();
        forecaster.expect_forecast().never();
        let service = service(detector, forecaster);

        let analysis = service.analyze_meal(meal_input()).await.unwrap();

        assert_eq!(analysis, MealAnalysis::no_food_detected());
        assert!(analysis.foods.is_empty());
        assert_eq!(analysis.glycemic_load.total, 0.0);
        assert!(analysis.curve.is_empty());
        assert_eq!(analysis.predicted_peak_glucose(), None);
        assert_eq!(analysis.recommendation, Recommendation::NoFoodDetected);
    }

    #[tokio::test]
    async fn test_unknown_foods_still_forecast() {
        let detector = detector_returning(vec![Detection::new("burger", 0.8)]);
        let service = service(detector, drift_forecaster());

        let analysis = service.analyze_meal(meal_input()).await.unwrap();

        assert_eq!(analysis.foods.len(), 1);
        assert_eq!(analysis.foods[0].canonical_name, "burger");
        assert_eq!(analysis.glycemic_load.total, 0.0);
        assert!(analysis.glycemic_load.per_item.is_empty());
        assert_eq!(analysis.curve.values(), &[110.0; 12]);
    }

    #[tokio::test]
    async fn test_detector_failure_fails_request() {
        let mut detector = MockFoodDetector::new();
        detector.expect_detect().returning(|_| {
            Box::pin(std::future::ready(Err(CoreError::DetectorUnavailable(
                "connection refused".to_string(),
            ))))
        });
        let mut forecaster = MockGlucoseForecaster::new();
        forecaster.expect_forecast().never();
        let service = service(detector, forecaster);

        let err = service.analyze_meal(meal_input()).await.unwrap_err();
        assert!(matches!(err, CoreError::DetectorUnavailable(_)));
    }

    #[tokio::test]
    async fn test_forecaster_failure_fails_request() {
        let detector = detector_returning(vec![Detection::new("dal", 0.9)]);
        let mut forecaster = MockGlucoseForecaster::new();
        forecaster.expect_forecast().returning(|_| {
            Box::pin(std::future::ready(Err(CoreError::ForecastUnavailable(
                "timeout".to_string(),
            ))))
        });
        let service = service(detector, forecaster);

        let err = service.analyze_meal(meal_input()).await.unwrap_err();
        assert!(matches!(err, CoreError::ForecastUnavailable(_)));
    }

    #[tokio::test]
    async fn test_high_glycemic_meal_recommends_walk() {
        let mut forecaster = MockGlucoseForecaster::new();
        forecaster
            .expect_forecast()
            .returning(|input: ForecastInput| {
                Box::pin(std::future::ready(Ok(input.readings[2] + input.glycemic_load)))
            });
        let service = service(MockFoodDetector::new(), forecaster);

        let analysis = service
            .analyze_detections(AnalyzeDetectionsInput {
                detections: vec![Detection::new("rice", 0.9)],
                recent_glucose: GlucoseWindow::new([120.0, 125.0, 130.0]),
            })
            .await
            .unwrap();

        assert_eq!(analysis.glycemic_load.total, 40.88);
        assert_eq!(analysis.recommendation, Recommendation::Walk);
    }

    #[tokio::test]
    async fn test_portion_and_steps_come_from_settings() {
        let service = Service::new(
            MockFoodDetector::new(),
            nutrition(),
            drift_forecaster(),
            LabelNormalizer::default(),
            AnalysisSettings {
                portion_grams: 100.0,
                forecast_steps: 4,
            },
        );

        let analysis = service
            .analyze_detections(AnalyzeDetectionsInput {
                detections: vec![Detection::new("dal", 0.9)],
                recent_glucose: GlucoseWindow::default(),
            })
            .await
            .unwrap();

        assert_eq!(analysis.glycemic_load.total, 6.0);
        assert_eq!(analysis.curve.len(), 4);
    }
}
