use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use glycoload_core::domain::common::entities::app_errors::CoreError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "E_VALIDATION"),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_UPSTREAM"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        if error.is_external() {
            return ApiError::BadGateway(error.to_string());
        }

        match error {
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            _ => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that also runs `validator` rules.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::ValidationError(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        assert!(matches!(
            ApiError::from(CoreError::DetectorUnavailable("down".to_string())),
            ApiError::BadGateway(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::ForecastUnavailable("down".to_string())),
            ApiError::BadGateway(_)
        ));
        assert_eq!(
            ApiError::from(CoreError::Invalid("bad window".to_string())),
            ApiError::BadRequest("bad window".to_string())
        );
        assert!(matches!(
            ApiError::from(CoreError::InternalServerError),
            ApiError::InternalServerError(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::NutritionTable("bad row".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadGateway("x".to_string()).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::ValidationError("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
