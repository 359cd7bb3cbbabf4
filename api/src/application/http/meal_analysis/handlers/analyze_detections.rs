use axum::extract::State;
use glycoload_core::domain::meal_analysis::{
    entities::{Detection, GlucoseWindow},
    ports::MealAnalysisService,
    value_objects::AnalyzeDetectionsInput,
};

use crate::application::http::{
    meal_analysis::{
        handlers::analyze_meal::AnalyzeMealResponse, validators::AnalyzeDetectionsRequest,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze-detections",
    tag = "meal-analysis",
    summary = "Analyze already detected foods",
    description = "Runs the analysis pipeline on detections produced by a client side detector",
    request_body = AnalyzeDetectionsRequest,
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
)]
pub async fn analyze_detections(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeDetectionsRequest>,
) -> Result<Response<AnalyzeMealResponse>, ApiError> {
    let recent_glucose = GlucoseWindow::try_from_readings(&payload.readings())?;

    let analysis = state
        .service
        .analyze_detections(AnalyzeDetectionsInput {
            detections: payload.detections.into_iter().map(Detection::from).collect(),
            recent_glucose,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeMealResponse::from(analysis)))
}
