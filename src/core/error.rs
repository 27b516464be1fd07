//! Typed error handling for the bookshelf service
//!
//! Every failure a handler can produce is one of a small set of categories,
//! each with a fixed HTTP status and a machine-readable code.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a record was not found
//! - [`RequestError`]: authentication and permission failures
//! - [`ValidationError`]: malformed or missing input, duplicate unique fields
//! - [`StorageError`]: persistence failures
//! - [`ConfigError`]: configuration parsing and loading
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf::prelude::*;
//!
//! match catalog.book(42).await {
//!     Ok(book) => println!("{}", book.title),
//!     Err(BookshelfError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("book {} is gone", id);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the service
#[derive(Debug)]
pub enum BookshelfError {
    /// Record lookups
    Entity(EntityError),

    /// Authentication and authorization
    Request(RequestError),

    /// Input validation
    Validation(ValidationError),

    /// Persistence layer
    Storage(StorageError),

    /// Configuration
    Config(ConfigError),

    /// Anything that should not happen in normal operation
    Internal(String),
}

impl fmt::Display for BookshelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookshelfError::Entity(e) => write!(f, "{}", e),
            BookshelfError::Request(e) => write!(f, "{}", e),
            BookshelfError::Validation(e) => write!(f, "{}", e),
            BookshelfError::Storage(e) => write!(f, "{}", e),
            BookshelfError::Config(e) => write!(f, "{}", e),
            BookshelfError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BookshelfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookshelfError::Entity(e) => Some(e),
            BookshelfError::Request(e) => Some(e),
            BookshelfError::Validation(e) => Some(e),
            BookshelfError::Storage(e) => Some(e),
            BookshelfError::Config(e) => Some(e),
            BookshelfError::Internal(_) => None,
        }
    }
}

/// Error body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl BookshelfError {
    /// Shorthand for a missing record
    pub fn not_found(entity_type: &str, id: u64) -> Self {
        BookshelfError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        })
    }

    /// Shorthand for a failed permission check
    pub fn forbidden(message: impl Into<String>) -> Self {
        BookshelfError::Request(RequestError::Forbidden {
            message: message.into(),
        })
    }

    /// Shorthand for a failed authentication
    pub fn unauthorized(message: impl Into<String>) -> Self {
        BookshelfError::Request(RequestError::Unauthorized {
            message: message.into(),
        })
    }

    /// Shorthand for a single invalid field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookshelfError::Validation(ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookshelfError::Entity(e) => e.status_code(),
            BookshelfError::Request(e) => e.status_code(),
            BookshelfError::Validation(_) => StatusCode::BAD_REQUEST,
            BookshelfError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookshelfError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookshelfError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BookshelfError::Entity(e) => e.error_code(),
            BookshelfError::Request(e) => e.error_code(),
            BookshelfError::Validation(_) => "VALIDATION_ERROR",
            BookshelfError::Storage(_) => "STORAGE_ERROR",
            BookshelfError::Config(_) => "CONFIG_ERROR",
            BookshelfError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BookshelfError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            BookshelfError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            _ => None,
        }
    }
}

impl IntoResponse for BookshelfError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug)]
pub enum EntityError {
    /// Record was not found
    NotFound { entity_type: String, id: u64 },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for BookshelfError {
    fn from(err: EntityError) -> Self {
        BookshelfError::Entity(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to who is making a request
#[derive(Debug)]
pub enum RequestError {
    /// Missing, expired or invalid credentials
    Unauthorized { message: String },

    /// Authenticated but not allowed to touch the record
    Forbidden { message: String },

    /// Path segments that do not name any route (e.g. a non-numeric id)
    BadRoute { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            RequestError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            RequestError::BadRoute { message } => write!(f, "Not found: {}", message),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RequestError::BadRoute { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
            RequestError::BadRoute { .. } => "NOT_FOUND",
        }
    }
}

impl From<RequestError> for BookshelfError {
    fn from(err: RequestError) -> Self {
        BookshelfError::Request(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to submitted input
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be decoded at all
    InvalidBody { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Field-level messages, in submission order
    pub fn fields(&self) -> Vec<FieldValidationError> {
        match self {
            ValidationError::FieldError { field, message } => vec![FieldValidationError {
                field: field.clone(),
                message: message.clone(),
            }],
            ValidationError::FieldErrors(errors) => errors.clone(),
            ValidationError::InvalidBody { message } => vec![FieldValidationError {
                field: "__all__".to_string(),
                message: message.clone(),
            }],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for BookshelfError {
    fn from(err: ValidationError) -> Self {
        BookshelfError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a data service
#[derive(Debug)]
pub enum StorageError {
    /// A unique field already holds this value
    UniqueViolation { entity_type: String, field: String },

    /// The store could not be accessed
    Unavailable { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::UniqueViolation { entity_type, field } => {
                write!(f, "{} with this {} already exists.", entity_type, field)
            }
            StorageError::Unavailable { message } => {
                write!(f, "Storage unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Unique violations surface to the submitter as field errors
impl From<StorageError> for BookshelfError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { entity_type, field } => {
                let message = format!("{} with this {} already exists.", entity_type, field);
                BookshelfError::Validation(ValidationError::FieldError { field, message })
            }
            other => BookshelfError::Storage(other),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue { field: String, message: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for field '{}': {}", field, message)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for BookshelfError {
    fn from(err: ConfigError) -> Self {
        BookshelfError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for BookshelfError {
    fn from(err: std::io::Error) -> Self {
        BookshelfError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for BookshelfError {
    fn from(err: serde_yaml::Error) -> Self {
        BookshelfError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for BookshelfError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code)),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        BookshelfError::Validation(ValidationError::FieldErrors(fields))
    }
}

impl From<PathRejection> for BookshelfError {
    fn from(rejection: PathRejection) -> Self {
        BookshelfError::Request(RequestError::BadRoute {
            message: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for BookshelfError {
    fn from(rejection: QueryRejection) -> Self {
        BookshelfError::Validation(ValidationError::InvalidBody {
            message: rejection.body_text(),
        })
    }
}

/// A specialized Result type for bookshelf operations
pub type BookshelfResult<T> = Result<T, BookshelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_and_status() {
        let err = BookshelfError::not_found("book", 7);
        assert!(err.to_string().contains("book"));
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            BookshelfError::unauthorized("expired").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BookshelfError::forbidden("not yours").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "title".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "isbn13".to_string(),
                message: "must be 13 digits".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("title"));
        assert!(display.contains("isbn13"));
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn test_unique_violation_becomes_field_error() {
        let err: BookshelfError = StorageError::UniqueViolation {
            entity_type: "user".to_string(),
            field: "username".to_string(),
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details["fields"][0]["field"], "username");
        assert_eq!(
            details["fields"][0]["message"],
            "user with this username already exists."
        );
    }

    #[test]
    fn test_storage_unavailable_is_server_error() {
        let err: BookshelfError = StorageError::Unavailable {
            message: "poisoned lock".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ParseError {
            file: Some("bookshelf.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert!(err.to_string().contains("bookshelf.yaml"));
    }
}
