use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_detections::{__path_analyze_detections, analyze_detections},
    analyze_meal::{__path_analyze_meal, MAX_IMAGE_SIZE, analyze_meal},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_meal, analyze_detections))]
pub struct MealAnalysisApiDoc;

pub fn meal_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analyze-meal", state.args.server.root_path),
            post(analyze_meal),
        )
        .route(
            &format!("{}/analyze-detections", state.args.server.root_path),
            post(analyze_detections),
        )
        // Leave room for the multipart envelope around the image
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024))
}
