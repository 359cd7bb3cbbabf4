use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Food detector unavailable: {0}")]
    DetectorUnavailable(String),

    #[error("Glucose forecaster unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("Nutrition table error: {0}")]
    NutritionTable(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// True when the failure comes from one of the external inference services.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            CoreError::DetectorUnavailable(_) | CoreError::ForecastUnavailable(_)
        )
    }
}
