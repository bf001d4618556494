use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Blockchain RPC error: {0}")]
    BlockchainRPC(String),

    #[error("Wrong network: expected chain {expected}, node reports {actual}")]
    WrongNetwork { expected: String, actual: String },

    #[error("Invalid account address: {0}")]
    InvalidAddress(String),

    #[error("Challenge submission failed: {0}")]
    SubmissionFailed(String),

    #[error("A challenge is already being processed for {0}")]
    SubmissionInFlight(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),

    #[error("Unexpected contract response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code sent to the browser.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BlockchainRPC(_) => "NETWORK_UNAVAILABLE",
            AppError::WrongNetwork { .. } => "WRONG_NETWORK",
            AppError::InvalidAddress(_) => "INVALID_ADDRESS",
            AppError::SubmissionFailed(_) => "SUBMISSION_FAILED",
            AppError::SubmissionInFlight(_) => "SUBMISSION_IN_FLIGHT",
            AppError::UploadFailed(_) => "UPLOAD_FAILED",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BlockchainRPC(_)
            | AppError::SubmissionFailed(_)
            | AppError::UploadFailed(_)
            | AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::WrongNetwork { .. }
            | AppError::InvalidAddress(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::SubmissionInFlight(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let details = match &self {
            AppError::WrongNetwork { expected, actual } => Some(serde_json::json!({
                "expected_chain_id": expected,
                "actual_chain_id": actual,
            })),
            _ => None,
        };

        let body = Json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
