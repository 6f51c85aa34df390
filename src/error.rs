use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Conflict(String),
    InternalServerError(String),
    ValidationError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Message shown to the client, without the status prefix used in logs.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ValidationError(msg) => msg,
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            success: false,
            message: self.message().to_string(),
        };

        match self {
            ApiError::BadRequest(_) => HttpResponse::BadRequest().json(error_response),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(error_response),
            ApiError::Conflict(_) => HttpResponse::Conflict().json(error_response),
            ApiError::ValidationError(_) => HttpResponse::UnprocessableEntity().json(error_response),
            ApiError::InternalServerError(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::InternalServerError(format!("CSV export failed: {}", err))
    }
}

// Domain errors
impl ApiError {
    pub fn request_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Request with ID '{}' not found", id))
    }

    pub fn request_already_processed(id: &str, status: &str) -> Self {
        ApiError::Conflict(format!("Request '{}' is already {}", id, status))
    }

    pub fn resource_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Resource with ID '{}' not found", id))
    }

    pub fn user_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("User with ID '{}' not found", id))
    }

    pub fn backup_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Backup with ID '{}' not found", id))
    }

    pub fn service_not_found(name: &str) -> Self {
        ApiError::NotFound(format!("Service '{}' not found", name))
    }

    pub fn unknown_view(view: &str) -> Self {
        ApiError::BadRequest(format!("Unknown view '{}' for this dashboard", view))
    }

    pub fn view_not_mounted(expected: &str, current: &str) -> Self {
        ApiError::Conflict(format!(
            "View '{}' is not displayed (current view: '{}')",
            expected, current
        ))
    }

    pub fn wrong_dashboard(expected: &str) -> Self {
        ApiError::Conflict(format!("This action requires the {} dashboard", expected))
    }

    pub fn session_expired() -> Self {
        ApiError::Unauthorized("Session not found or expired".to_string())
    }

    pub fn incomplete_form(form: &str) -> Self {
        ApiError::ValidationError(format!("Required fields of the {} form are empty", form))
    }
}

/// Presence check used by every mock form.
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}
