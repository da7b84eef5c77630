//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    #[error("Sale number already exists: {0}")]
    DuplicateSaleNumber(String),

    #[error("Version conflict: concurrent modification detected")]
    VersionConflict,

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::VersionConflict { .. } => AppError::VersionConflict,
            RepositoryError::DuplicateSaleNumber(number) => AppError::DuplicateSaleNumber(number),
            RepositoryError::UnknownStatus(status) => {
                AppError::Internal(format!("unknown sale status in storage: {status}"))
            }
            RepositoryError::Database(e) => AppError::Database(e),
        }
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
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::SaleNotFound(id) => {
                (StatusCode::NOT_FOUND, "sale_not_found", Some(id.clone()))
            }

            // 409 Conflict
            AppError::DuplicateSaleNumber(number) => {
                (StatusCode::CONFLICT, "duplicate_sale_number", Some(number.clone()))
            }
            AppError::VersionConflict => {
                (StatusCode::CONFLICT, "version_conflict", None)
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(ref domain_err) => {
                use crate::domain::DomainError;
                match domain_err {
                    DomainError::ItemNotFound(id) => {
                        (StatusCode::NOT_FOUND, "item_not_found", Some(id.to_string()))
                    }
                    DomainError::SaleCancelled | DomainError::SaleAlreadyCancelled => {
                        (StatusCode::CONFLICT, "sale_cancelled", Some(domain_err.to_string()))
                    }
                    DomainError::ItemAlreadyCancelled(id) => {
                        (StatusCode::CONFLICT, "item_already_cancelled", Some(id.to_string()))
                    }
                    DomainError::ValidationFailed { errors } => {
                        (StatusCode::BAD_REQUEST, "validation_failed", Some(errors.join("; ")))
                    }
                    DomainError::QuantityNotPositive
                    | DomainError::QuantityAboveLimit
                    | DomainError::UnitPriceNotPositive
                    | DomainError::DiscountNotAllowed => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "business_rule_violation", Some(domain_err.to_string()))
                    }
                }
            }

            // 500 Internal Server Error
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
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
    use uuid::Uuid;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::SaleNotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::DuplicateSaleNumber("S-1".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(AppError::VersionConflict), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::Domain(DomainError::ItemNotFound(Uuid::new_v4()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Domain(DomainError::SaleCancelled)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Domain(DomainError::QuantityAboveLimit)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Domain(DomainError::ValidationFailed {
                errors: vec!["Customer is required".into()]
            })),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: AppError = RepositoryError::VersionConflict {
            sale_id: Uuid::new_v4(),
            expected: 3,
        }
        .into();
        assert!(matches!(err, AppError::VersionConflict));

        let err: AppError = RepositoryError::DuplicateSaleNumber("S-1".to_string()).into();
        assert!(matches!(err, AppError::DuplicateSaleNumber(_)));
    }
}
