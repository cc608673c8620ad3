//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Account-not-found keyed by internal id
    pub fn account_not_found_by_id(id: i64) -> Self {
        Self::AccountNotFound(format!("id {}", id))
    }

    /// Account-not-found keyed by public account number
    pub fn account_not_found_by_number(number: i64) -> Self {
        Self::AccountNotFound(format!("number {}", number))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 404 Not Found
            AppError::AccountNotFound(key) => {
                (StatusCode::NOT_FOUND, "account_not_found", Some(key.clone()))
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(ref domain_err) => {
                use crate::domain::DomainError;
                match domain_err {
                    DomainError::InvalidAmount(_) => {
                        (StatusCode::BAD_REQUEST, "invalid_amount", Some(domain_err.to_string()))
                    }
                    DomainError::SameAccountTransfer => {
                        (StatusCode::BAD_REQUEST, "same_account_transfer", None)
                    }
                    DomainError::InsufficientFunds { .. } => {
                        (StatusCode::BAD_REQUEST, "insufficient_funds", Some(domain_err.to_string()))
                    }
                    DomainError::BalanceOverflow => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "balance_overflow", None)
                    }
                }
            }

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_formatting() {
        let err = AppError::account_not_found_by_number(4711);
        assert!(err.to_string().contains("number 4711"));

        let err = AppError::account_not_found_by_id(9);
        assert!(err.to_string().contains("id 9"));
    }

    #[test]
    fn test_domain_error_passthrough() {
        let err: AppError = DomainError::InvalidAmount(-5).into();
        assert!(err.to_string().contains("-5"));
    }
}
