use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    common::{ForecastConfig, entities::app_errors::CoreError},
    meal_analysis::{
        ports::GlucoseForecaster,
        value_objects::{ForecastInput, GLUCOSE_WINDOW_LEN},
    },
};

/// Forecaster backed by a model behind a TensorFlow Serving style REST
/// `:predict` endpoint.
#[derive(Debug, Clone)]
pub struct TfServingForecaster {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<[[f64; 2]; GLUCOSE_WINDOW_LEN]>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f64>>,
}

impl TfServingForecaster {
    pub fn new(config: &ForecastConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::ForecastUnavailable(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

impl GlucoseForecaster for TfServingForecaster {
    #[instrument(skip(self), level = "debug")]
    async fn forecast(&self, input: ForecastInput) -> Result<f64, CoreError> {
        let request = PredictRequest {
            instances: vec![input.rows()],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Forecast request failed: {}", e);
                CoreError::ForecastUnavailable(format!("forecast request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Forecast model error: {} - {}", status, error_text);
            return Err(CoreError::ForecastUnavailable(format!(
                "forecast model returned error: {} - {}",
                status, error_text
            )));
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse forecast response: {}", e);
            CoreError::ForecastUnavailable(format!("failed to parse forecast response: {}", e))
        })?;

        body.predictions
            .first()
            .and_then(|row| row.first())
            .copied()
            .ok_or_else(|| CoreError::ForecastUnavailable("empty prediction".to_string()))
    }
}
