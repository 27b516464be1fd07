//! Axum extractor for validated forms
//!
//! `Validated<T>` accepts both JSON bodies and url-encoded form submissions,
//! normalizes the decoded value and runs its `validator` rules before the
//! handler sees it. Failures become field-level validation errors.

use crate::core::error::{BookshelfError, ValidationError};
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Cleanup applied to a form before validation (trimming, empty-to-None)
pub trait Normalize {
    fn normalize(&mut self);
}

/// Trim a required text field in place
pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional text field, turning blank input into `None`
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
        if inner.is_empty() {
            *value = None;
        }
    }
}

/// Validated request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_book(
///     State(catalog): State<Catalog>,
///     user: CurrentUser,
///     Validated(form): Validated<BookForm>,
/// ) -> BookshelfResult<(StatusCode, Json<Book>)> {
///     let book = catalog.create_book(&user.context, form).await?;
///     Ok((StatusCode::CREATED, Json(book)))
/// }
/// ```
#[derive(Debug)]
pub struct Validated<T>(pub T);

fn is_form_submission(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Normalize + Send,
{
    type Rejection = BookshelfError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut form: T = if is_form_submission(&req) {
            let Form(form) = Form::<T>::from_request(req, state).await.map_err(|e| {
                ValidationError::InvalidBody {
                    message: e.body_text(),
                }
            })?;
            form
        } else {
            let Json(form) = Json::<T>::from_request(req, state).await.map_err(|e| {
                ValidationError::InvalidBody {
                    message: e.body_text(),
                }
            })?;
            form
        };

        form.normalize();
        form.validate()?;

        Ok(Validated(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NoteForm {
        #[validate(length(min = 1, max = 5, message = "Too long."))]
        body: String,
        #[serde(default)]
        tag: Option<String>,
    }

    impl Normalize for NoteForm {
        fn normalize(&mut self) {
            trim(&mut self.body);
            trim_optional(&mut self.tag);
        }
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/notes")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_is_normalized() {
        let req = request("application/json", r#"{"body": "  hi  ", "tag": "   "}"#);
        let Validated(form) = Validated::<NoteForm>::from_request(req, &()).await.unwrap();

        assert_eq!(form.body, "hi");
        assert_eq!(form.tag, None);
    }

    #[tokio::test]
    async fn test_form_body_is_accepted() {
        let req = request("application/x-www-form-urlencoded", "body=hey&tag=x");
        let Validated(form) = Validated::<NoteForm>::from_request(req, &()).await.unwrap();

        assert_eq!(form.body, "hey");
        assert_eq!(form.tag.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_rule_failure_is_field_error() {
        let req = request("application/json", r#"{"body": "far too long"}"#);
        let err = Validated::<NoteForm>::from_request(req, &())
            .await
            .unwrap_err();

        let fields = match err {
            BookshelfError::Validation(e) => e.fields(),
            other => panic!("expected validation error, got {:?}", other),
        };
        assert_eq!(fields[0].field, "body");
        assert_eq!(fields[0].message, "Too long.");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let req = request("application/json", "{not json");
        let err = Validated::<NoteForm>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookshelfError::Validation(ValidationError::InvalidBody { .. })
        ));
    }
}
