use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::types::PostJobResponse;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Salary values must not be negative")]
    NegativeSalary,

    #[error("Salary values must be whole numbers")]
    FractionalSalary,

    #[error("Minimum salary cannot be greater than maximum salary")]
    SalaryRange,

    #[error("Invalid job type: {0}")]
    InvalidJobType(String),

    #[error("Failed to create job posting: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Short, stable message placed in the `error` field of the response
    pub fn summary(&self) -> &'static str {
        match self {
            ApiError::MissingFields(_) => "Missing required fields",
            ApiError::NegativeSalary => "Salary values must not be negative",
            ApiError::FractionalSalary => "Salary values must be whole numbers",
            ApiError::SalaryRange => "Minimum salary cannot be greater than maximum salary",
            ApiError::InvalidJobType(_) => "Invalid job type",
            ApiError::Storage(_) => "Failed to create job posting",
            ApiError::Internal(_) => "Internal server error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields(_)
            | ApiError::NegativeSalary
            | ApiError::FractionalSalary
            | ApiError::SalaryRange
            | ApiError::InvalidJobType(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.status() == StatusCode::BAD_REQUEST
    }
}

impl From<crate::db::DbError> for ApiError {
    fn from(e: crate::db::DbError) -> Self {
        ApiError::Storage(e.to_string())
    }
}

/// Convert ApiError into HTTP response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = PostJobResponse::failure(self.summary());

        if self.is_validation() {
            tracing::debug!(status = %status, error = %self, "Rejected submission");
        }

        match self {
            ApiError::MissingFields(fields) => {
                body.missing_fields = Some(fields);
            }
            ApiError::InvalidJobType(value) => {
                body.details = Some(format!(
                    "'{}' is not one of: Full-time, Part-time, Contract, Internship",
                    value
                ));
            }
            ApiError::Storage(details) => {
                tracing::error!(error = %details, "Database error");
                body.details = Some(details);
            }
            ApiError::Internal(details) => {
                tracing::error!(error = %details, "Internal error");
                body.details = Some(details);
            }
            ApiError::NegativeSalary | ApiError::FractionalSalary | ApiError::SalaryRange => {}
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(
            ApiError::MissingFields(vec!["title".into()]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NegativeSalary.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::SalaryRange.status(), StatusCode::BAD_REQUEST);
        assert!(ApiError::InvalidJobType("Remote".into()).is_validation());
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let err = ApiError::Storage("disk I/O error".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::MissingFields(vec!["title".into(), "company".into()]);
        assert_eq!(err.to_string(), "Missing required fields: title, company");
    }

    #[test]
    fn test_db_error_becomes_storage() {
        let err: ApiError = crate::db::DbError::Config("boom".into()).into();
        assert!(matches!(err, ApiError::Storage(msg) if msg.contains("boom")));
    }
}
