use axum::extract::{Multipart, Query, State, rejection::QueryRejection};
use glycoload_core::domain::meal_analysis::{
    entities::{GlucoseWindow, MealAnalysis, NormalizedDetection},
    ports::MealAnalysisService,
    value_objects::AnalyzeMealInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::{
    meal_analysis::validators::GlucoseReadingsParams,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodResponse {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMealResponse {
    pub foods: Vec<FoodResponse>,
    pub glycemic_load: f64,
    pub predicted_peak_glucose: Option<f64>,
    pub predicted_glucose_curve: Vec<f64>,
    pub recommendation: String,
}

/// Documents the multipart body; the handler reads the form directly.
#[derive(ToSchema)]
pub struct MealImageUpload {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

impl From<NormalizedDetection> for FoodResponse {
    fn from(item: NormalizedDetection) -> Self {
        Self {
            name: item.canonical_name,
            confidence: item.confidence,
        }
    }
}

impl From<MealAnalysis> for AnalyzeMealResponse {
    fn from(analysis: MealAnalysis) -> Self {
        Self {
            predicted_peak_glucose: analysis.predicted_peak_glucose(),
            glycemic_load: analysis.glycemic_load.total,
            recommendation: analysis.recommendation.message().to_string(),
            foods: analysis.foods.into_iter().map(FoodResponse::from).collect(),
            predicted_glucose_curve: analysis.curve.into_inner(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/analyze-meal",
    tag = "meal-analysis",
    summary = "Analyze a meal image",
    description = "Detects foods in the image, estimates the meal's glycemic load and forecasts the glucose curve for the next 3 hours",
    params(GlucoseReadingsParams),
    request_body(content = MealImageUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_meal(
    State(state): State<AppState>,
    params: Result<Query<GlucoseReadingsParams>, QueryRejection>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeMealResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    params
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;
    let recent_glucose = GlucoseWindow::try_from_readings(&params.readings())?;

    let mut image_data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        image_data = Some(data);
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;

    if image_data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    let analysis = state
        .service
        .analyze_meal(AnalyzeMealInput {
            image_data,
            recent_glucose,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeMealResponse::from(analysis)))
}
