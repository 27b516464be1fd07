//! JSON API exposure under `/api`
//!
//! Read paths require a bearer token. Lists are returned whole and wrapped
//! in a plural key (`{"books": [...]}`); single records under the singular
//! key (`{"book": {...}}`).

use crate::catalog::Catalog;
use crate::core::error::BookshelfResult;
use crate::core::extractors::{CurrentUser, PathArgs};
use crate::core::validation::Validated;
use crate::entities::{Author, Book, LoginForm, ProfileForm, SignUpForm, UserEnvelope};
use crate::identity::{IdentityService, Session};
use crate::server::AppState;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;

/// Book as listed by the API
#[derive(Debug, Serialize, PartialEq)]
pub struct BookSummary {
    pub id: u64,
    pub isbn13: Option<String>,
    pub title: String,
    pub authors: Vec<u64>,
}

impl From<Book> for BookSummary {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            isbn13: book.isbn13,
            title: book.title,
            authors: book.authors,
        }
    }
}

/// Book as shown by the API detail route
#[derive(Debug, Serialize, PartialEq)]
pub struct BookView {
    pub id: u64,
    pub isbn13: Option<String>,
    pub title: String,
    pub authors: Vec<u64>,
    pub description: Option<String>,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            isbn13: book.isbn13,
            title: book.title,
            authors: book.authors,
            description: book.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AuthorView {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookEnvelope {
    pub book: BookView,
}

#[derive(Debug, Serialize)]
pub struct AuthorList {
    pub authors: Vec<AuthorView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorEnvelope {
    pub author: AuthorView,
}

/// API exposure implementation
pub struct ApiExposure;

impl ApiExposure {
    /// Routes of the JSON API, still awaiting state
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/api/users/signup", post(signup))
            .route("/api/users/login", post(login))
            .route("/api/user", get(current_user).put(update_current_user))
            .route("/api/user/", get(current_user).put(update_current_user))
            .route("/api/books", get(list_books))
            .route("/api/books/", get(list_books))
            .route("/api/books/{id}", get(get_book))
            .route("/api/authors", get(list_authors))
            .route("/api/authors/", get(list_authors))
            .route("/api/authors/{id}", get(get_author))
    }
}

async fn signup(
    State(identity): State<IdentityService>,
    Validated(form): Validated<SignUpForm>,
) -> BookshelfResult<(StatusCode, Json<UserEnvelope>)> {
    let session = identity.register(form).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

async fn login(
    State(identity): State<IdentityService>,
    Validated(form): Validated<LoginForm>,
) -> BookshelfResult<Json<UserEnvelope>> {
    Ok(Json(identity.login(form).await?.into()))
}

async fn current_user(
    State(identity): State<IdentityService>,
    user: CurrentUser,
) -> BookshelfResult<Json<UserEnvelope>> {
    let user = identity.user(user.user_id).await?;
    let token = identity.issue_token(&user)?;
    Ok(Json(Session { user, token }.into()))
}

async fn update_current_user(
    State(identity): State<IdentityService>,
    user: CurrentUser,
    Validated(form): Validated<ProfileForm>,
) -> BookshelfResult<Json<UserEnvelope>> {
    let updated = identity
        .update_profile(&user.context, user.user_id, form)
        .await?;
    let token = identity.issue_token(&updated)?;
    Ok(Json(
        Session {
            user: updated,
            token,
        }
        .into(),
    ))
}

async fn list_books(
    State(catalog): State<Catalog>,
    _user: CurrentUser,
) -> BookshelfResult<Json<BookList>> {
    let books = catalog.books_ranked().await?;
    tracing::debug!(count = books.len(), "api book list");
    Ok(Json(BookList {
        books: books.into_iter().map(BookSummary::from).collect(),
    }))
}

async fn get_book(
    State(catalog): State<Catalog>,
    _user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<Json<BookEnvelope>> {
    let book = catalog.book(id).await?;
    Ok(Json(BookEnvelope { book: book.into() }))
}

async fn list_authors(
    State(catalog): State<Catalog>,
    _user: CurrentUser,
) -> BookshelfResult<Json<AuthorList>> {
    let authors = catalog.authors_by_last_name().await?;
    Ok(Json(AuthorList {
        authors: authors.into_iter().map(AuthorView::from).collect(),
    }))
}

async fn get_author(
    State(catalog): State<Catalog>,
    _user: CurrentUser,
    PathArgs(id): PathArgs<u64>,
) -> BookshelfResult<Json<AuthorEnvelope>> {
    let author = catalog.author(id).await?;
    Ok(Json(AuthorEnvelope {
        author: author.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_book_summary_omits_description() {
        let mut book = Book::new("Dune".to_string());
        book.id = 3;
        book.isbn13 = Some("9780441013593".to_string());
        book.description = Some("Spice".to_string());
        book.authors = vec![1];

        let summary = serde_json::to_value(BookSummary::from(book)).unwrap();
        assert_eq!(
            summary,
            json!({"id": 3, "isbn13": "9780441013593", "title": "Dune", "authors": [1]})
        );
    }

    #[test]
    fn test_author_view_shape() {
        let mut author = Author::new("Frank".into(), "Herbert".into(), Some("bio".into()));
        author.id = 7;
        let view = serde_json::to_value(AuthorView::from(author)).unwrap();
        assert_eq!(view, json!({"id": 7, "first_name": "Frank", "last_name": "Herbert"}));
    }
}
