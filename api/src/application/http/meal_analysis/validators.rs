use glycoload_core::domain::meal_analysis::entities::{Detection, GlucoseWindow};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

const MIN_GLUCOSE: f64 = 1.0;
const MAX_GLUCOSE: f64 = 1000.0;

fn default_g1() -> f64 {
    100.0
}

fn default_g2() -> f64 {
    105.0
}

fn default_g3() -> f64 {
    110.0
}

/// Recent glucose readings in mg/dL, oldest first.
#[derive(Debug, Serialize, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct GlucoseReadingsParams {
    #[serde(default = "default_g1")]
    #[param(example = 100.0)]
    #[validate(range(min = 1.0, max = 1000.0, message = "g1 must be between 1 and 1000 mg/dL"))]
    pub g1: f64,
    #[serde(default = "default_g2")]
    #[param(example = 105.0)]
    #[validate(range(min = 1.0, max = 1000.0, message = "g2 must be between 1 and 1000 mg/dL"))]
    pub g2: f64,
    #[serde(default = "default_g3")]
    #[param(example = 110.0)]
    #[validate(range(min = 1.0, max = 1000.0, message = "g3 must be between 1 and 1000 mg/dL"))]
    pub g3: f64,
}

impl GlucoseReadingsParams {
    pub fn readings(&self) -> [f64; 3] {
        [self.g1, self.g2, self.g3]
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct DetectionRequest {
    #[validate(length(min = 1, max = 128, message = "label must be between 1 and 128 characters"))]
    pub label: String,
    #[validate(range(min = 0.0, max = 1.0, message = "confidence must be between 0 and 1"))]
    pub confidence: f64,
}

impl From<DetectionRequest> for Detection {
    fn from(request: DetectionRequest) -> Self {
        Detection::new(request.label, request.confidence)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeDetectionsRequest {
    #[validate(
        length(max = 256, message = "at most 256 detections are accepted"),
        nested
    )]
    pub detections: Vec<DetectionRequest>,
    /// Three readings, oldest first. Defaults to 100, 105, 110.
    #[validate(
        length(equal = 3, message = "recent_glucose must contain exactly 3 readings"),
        custom(function = "validate_glucose_readings")
    )]
    pub recent_glucose: Option<Vec<f64>>,
}

impl AnalyzeDetectionsRequest {
    pub fn readings(&self) -> Vec<f64> {
        self.recent_glucose
            .clone()
            .unwrap_or_else(|| GlucoseWindow::default().readings().to_vec())
    }
}

/// Same bounds as the `g1..g3` query parameters.
fn validate_glucose_readings(readings: &[f64]) -> Result<(), ValidationError> {
    if readings
        .iter()
        .all(|reading| (MIN_GLUCOSE..=MAX_GLUCOSE).contains(reading))
    {
        return Ok(());
    }

    Err(ValidationError::new("glucose_range")
        .with_message("recent_glucose readings must be between 1 and 1000 mg/dL".into()))
}
