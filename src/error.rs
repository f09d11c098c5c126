//! Error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::detection::AnalysisError;
use crate::logic::model::PredictionError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Classification errors
    InvalidInput(String),
    PredictionFailed(String),
    NoFlowRecords,

    // Validation errors
    ValidationError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(msg) => {
                tracing::warn!("Rejected upload: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid CSV file")
            }
            AppError::PredictionFailed(msg) => {
                tracing::error!("Primary model prediction failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
            AppError::NoFlowRecords => {
                tracing::warn!("Rejected upload: no flow records left after cleaning");
                (StatusCode::UNPROCESSABLE_ENTITY, "Prediction failed")
            }
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Ingest(e) => AppError::InvalidInput(e.to_string()),
            AnalysisError::Gate(PredictionError::EmptyBatch) => AppError::NoFlowRecords,
            AnalysisError::Gate(e) => AppError::PredictionFailed(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::ValidationError(format!("Malformed upload: {}", err.body_text()))
    }
}
