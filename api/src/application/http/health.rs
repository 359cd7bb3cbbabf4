use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Service status",
    responses(
        (status = 200, body = HealthStatus)
    )
)]
pub async fn root() -> Response<HealthStatus> {
    Response::OK(HealthStatus {
        status: "Backend running successfully".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(paths(root))]
pub struct HealthApiDoc;

pub fn health_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/", root_path), get(root))
}
