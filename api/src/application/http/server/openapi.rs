use utoipa::OpenApi;

use crate::application::http::{health::HealthApiDoc, meal_analysis::router::MealAnalysisApiDoc};

#[derive(OpenApi)]
#[openapi(info(
    title = "Glycoload API",
    description = "Glycemic load estimation and post-meal glucose forecasting"
))]
pub struct ApiDoc;

impl ApiDoc {
    /// The full document with every router's paths merged in and mounted
    /// under `root_path`.
    pub fn document(root_path: &str) -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(HealthApiDoc::openapi());
        openapi.merge(MealAnalysisApiDoc::openapi());

        if !root_path.is_empty() {
            openapi.paths.paths = std::mem::take(&mut openapi.paths.paths)
                .into_iter()
                .map(|(path, item)| (format!("{root_path}{path}"), item))
                .collect();
        }

        openapi
    }
}
