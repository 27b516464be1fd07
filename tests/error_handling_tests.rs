//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry a machine code, a message and field details
//! - Conversions from storage, validator and config failures land in the
//!   right category

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bookshelf::core::error::{ConfigError, FieldValidationError, StorageError};
use bookshelf::prelude::*;
use validator::Validate;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = BookshelfError::not_found("book", 7);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error_returns_400() {
        let err = BookshelfError::invalid_field("isbn13", "Enter 13 digits.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_request_unauthorized_returns_401() {
        let err = BookshelfError::unauthorized("Invalid token.");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_request_forbidden_returns_403() {
        let err = BookshelfError::forbidden("Not yours.");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_storage_unavailable_returns_500() {
        let err: BookshelfError = StorageError::Unavailable {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_returns_500() {
        let err = BookshelfError::Config(ConfigError::InvalidValue {
            field: "pagination.page_size".to_string(),
            message: "must be at least 1".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            BookshelfError::not_found("book", 1).error_code(),
            "ENTITY_NOT_FOUND"
        );
        assert_eq!(
            BookshelfError::unauthorized("x").error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(BookshelfError::forbidden("x").error_code(), "FORBIDDEN");
        assert_eq!(
            BookshelfError::invalid_field("f", "x").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            BookshelfError::Internal("x".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[test]
    fn test_error_response_has_code_and_message() {
        let response = BookshelfError::not_found("book", 42).to_response();

        assert_eq!(response.code, "ENTITY_NOT_FOUND");
        assert!(response.message.contains("book"));
        assert!(response.message.contains("not found"));
    }

    #[test]
    fn test_error_response_includes_details_for_entity_not_found() {
        let details = BookshelfError::not_found("review", 9)
            .to_response()
            .details
            .expect("not found carries details");

        assert_eq!(details["entity_type"], "review");
        assert_eq!(details["id"], 9);
    }

    #[test]
    fn test_validation_errors_include_field_details() {
        let err = BookshelfError::Validation(ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "email".to_string(),
                message: "Enter a valid email address.".to_string(),
            },
            FieldValidationError {
                field: "password".to_string(),
                message: "Password must be 8 to 128 characters.".to_string(),
            },
        ]));

        let details = err.to_response().details.unwrap();
        let fields = details["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["field"], "password");
    }

    #[test]
    fn test_forbidden_has_no_details() {
        assert!(BookshelfError::forbidden("x").to_response().details.is_none());
    }
}

// =============================================================================
// Error Conversion Tests
// =============================================================================

mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_field_error() {
        let err: BookshelfError = StorageError::UniqueViolation {
            entity_type: "user".to_string(),
            field: "username".to_string(),
        }
        .into();

        match err {
            BookshelfError::Validation(ValidationError::FieldError { field, message }) => {
                assert_eq!(field, "username");
                assert!(message.contains("already exists"));
            }
            other => panic!("expected a field error, got {:?}", other),
        }
    }

    #[test]
    fn test_validator_errors_convert_to_field_errors() {
        let form = SignUpForm {
            username: "ann".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            first_name: None,
            last_name: None,
        };
        let err: BookshelfError = form.validate().unwrap_err().into();

        let fields: Vec<String> = match &err {
            BookshelfError::Validation(e) => e.fields().into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        };
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_yaml_error_converts_to_config_error() {
        let yaml_err = serde_yaml::from_str::<AppConfig>("server: [").unwrap_err();
        let err: BookshelfError = yaml_err.into();
        assert!(matches!(err, BookshelfError::Config(_)));
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    #[test]
    fn test_can_match_specific_entity_errors() {
        let err = BookshelfError::not_found("book", 3);
        match err {
            BookshelfError::Entity(EntityError::NotFound { entity_type, id }) => {
                assert_eq!(entity_type, "book");
                assert_eq!(id, 3);
            }
            _ => panic!("expected EntityError::NotFound"),
        }
    }

    #[test]
    fn test_can_match_request_errors() {
        let err = BookshelfError::forbidden("You don't have permission to edit this book.");
        assert!(matches!(
            err,
            BookshelfError::Request(RequestError::Forbidden { .. })
        ));
    }
}

// =============================================================================
// IntoResponse Tests
// =============================================================================

mod into_response_tests {
    use super::*;

    #[test]
    fn test_into_response_status() {
        let cases = [
            (BookshelfError::not_found("book", 1), StatusCode::NOT_FOUND),
            (
                BookshelfError::invalid_field("body", "required"),
                StatusCode::BAD_REQUEST,
            ),
            (BookshelfError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (BookshelfError::forbidden("x"), StatusCode::FORBIDDEN),
            (
                BookshelfError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
