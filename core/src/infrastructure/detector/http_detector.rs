use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::{
    common::{DetectorConfig, entities::app_errors::CoreError, round2},
    meal_analysis::{entities::Detection, ports::FoodDetector},
};

/// Detector classes that are food, and the food label each one stands for.
pub const DEFAULT_FOOD_CLASSES: &[(&str, &str)] = &[
    ("bowl", "rice"),
    ("pizza", "pizza"),
    ("sandwich", "sandwich"),
];

/// Client for an object detection service reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFoodDetector {
    endpoint: String,
    client: Client,
    food_classes: Option<HashMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct DetectRequest {
    image: String,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    detections: Vec<RawDetection>,
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    label: String,
    confidence: f64,
}

impl HttpFoodDetector {
    pub fn new(config: &DetectorConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::DetectorUnavailable(format!("HTTP client error: {}", e)))?;

        let food_classes = config.class_filter.then(|| {
            DEFAULT_FOOD_CLASSES
                .iter()
                .map(|(class, label)| (class.to_string(), label.to_string()))
                .collect()
        });

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client,
            food_classes,
        })
    }

    fn to_detection(&self, raw: RawDetection) -> Option<Detection> {
        let label = match &self.food_classes {
            Some(classes) => classes.get(&raw.label)?.clone(),
            None => raw.label,
        };

        Some(Detection {
            label,
            confidence: round2(raw.confidence.clamp(0.0, 1.0)),
        })
    }
}

impl FoodDetector for HttpFoodDetector {
    #[instrument(skip(self, image_data), fields(endpoint = %self.endpoint, bytes = image_data.len()))]
    async fn detect(&self, image_data: Bytes) -> Result<Vec<Detection>, CoreError> {
        let request = DetectRequest {
            image: general_purpose::STANDARD.encode(&image_data),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Detector request failed: {}", e);
                CoreError::DetectorUnavailable(format!("detector request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Detector error: {} - {}", status, error_text);
            return Err(CoreError::DetectorUnavailable(format!(
                "detector returned error: {} - {}",
                status, error_text
            )));
        }

        let body: DetectResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse detector response: {}", e);
            CoreError::DetectorUnavailable(format!("failed to parse detector response: {}", e))
        })?;

        let raw_count = body.detections.len();
        let detections: Vec<Detection> = body
            .detections
            .into_iter()
            .filter_map(|raw| self.to_detection(raw))
            .collect();

        if raw_count > 0 && detections.is_empty() {
            info!(raw = raw_count, "Class filter dropped every detection");
        } else {
            debug!(raw = raw_count, kept = detections.len(), "Detector response");
        }
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(endpoint: String, class_filter: bool) -> DetectorConfig {
        DetectorConfig {
            endpoint,
            timeout: Duration::from_secs(5),
            class_filter,
        }
    }

    #[tokio::test]
    async fn test_filters_and_renames_food_classes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "detections": [
                    { "label": "bowl", "confidence": 0.9234 },
                    { "label": "person", "confidence": 0.99 },
                    { "label": "pizza", "confidence": 0.456 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let detector =
            HttpFoodDetector::new(&config(format!("{}/detect", server.uri()), true)).unwrap();
        let detections = detector.detect(Bytes::from_static(b"img")).await.unwrap();

        assert_eq!(
            detections,
            vec![Detection::new("rice", 0.92), Detection::new("pizza", 0.46)]
        );
    }

    #[tokio::test]
    async fn test_without_filter_keeps_all_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "detections": [{ "label": "dal", "confidence": 0.88 }]
            })))
            .mount(&server)
            .await;

        let detector = HttpFoodDetector::new(&config(server.uri(), false)).unwrap();
        let detections = detector.detect(Bytes::from_static(b"img")).await.unwrap();

        assert_eq!(detections, vec![Detection::new("dal", 0.88)]);
    }

    #[tokio::test]
    async fn test_filter_drops_labels_outside_class_map() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "detections": [
                    { "label": "dal", "confidence": 0.88 },
                    { "label": "rice", "confidence": 0.7 }
                ]
            })))
            .mount(&server)
            .await;

        let detector = HttpFoodDetector::new(&config(server.uri(), true)).unwrap();
        let detections = detector.detect(Bytes::from_static(b"img")).await.unwrap();

        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn test_sends_base64_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(wiremock::matchers::body_json(json!({ "image": "aW1n" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detections": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let detector = HttpFoodDetector::new(&config(server.uri(), true)).unwrap();
        let detections = detector.detect(Bytes::from_static(b"img")).await.unwrap();

        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_detector_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let detector = HttpFoodDetector::new(&config(server.uri(), true)).unwrap();
        let err = detector.detect(Bytes::from_static(b"img")).await.unwrap_err();

        assert!(matches!(err, CoreError::DetectorUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_detector_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "boxes": [] })))
            .mount(&server)
            .await;

        let detector = HttpFoodDetector::new(&config(server.uri(), true)).unwrap();
        assert!(detector.detect(Bytes::from_static(b"img")).await.is_err());
    }
}
