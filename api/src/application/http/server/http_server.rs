use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::{PrometheusMetricLayer, metrics_exporter_prometheus::PrometheusHandle};
use glycoload_core::{application::create_service, domain::common::GlycoloadConfig};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info_span, warn};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::health::health_routes;
use crate::application::http::meal_analysis::router::meal_analysis_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::args::Args;

/// The prometheus recorder is process global and can only be installed once.
static METRIC_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = GlycoloadConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(AllowOrigin::any());
    }

    let origins = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", origins);
    cors.allow_origin(origins)
}

/// Scalar, Swagger UI, Redoc and RapiDoc, all serving the same document.
fn docs_routes(root_path: &str) -> Router<AppState> {
    let openapi = ApiDoc::document(root_path);
    let api_docs_url = format!("{root_path}/api-docs/openapi.json");

    Router::new()
        .merge(Scalar::with_url(format!("{root_path}/scalar"), openapi.clone()))
        .merge(
            SwaggerUi::new(format!("{root_path}/swagger-ui"))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{root_path}/redoc"), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{root_path}/rapidoc")))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let cors = cors_layer(&state.args.server.allowed_origins);

    let metric_handle = METRIC_HANDLE
        .get_or_init(|| PrometheusMetricLayer::pair().1)
        .clone();
    let prometheus_layer = PrometheusMetricLayer::new();

    let root_path = state.args.server.root_path.clone();

    let router = Router::new()
        .merge(docs_routes(&root_path))
        .merge(health_routes(&root_path))
        .merge(meal_analysis_routes(state.clone()))
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}
