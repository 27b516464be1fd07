//! # Bookshelf
//!
//! A book cataloguing service: users register and sign in, authors publish
//! books, readers review them and discuss the reviews in threaded comments.
//!
//! ## Features
//!
//! - **One write rule**: staff may edit anything, everyone else only what they
//!   own, decided by a single owner-or-staff predicate
//! - **Search and pagination**: books by title or ISBN, authors by name
//! - **Bearer tokens**: HS256 tokens valid for one day by default
//! - **Two surfaces**: form-style web routes and a JSON API under `/api`
//! - **YAML configuration** with defaults for every key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bookshelf::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load(None)?;
//!     let addr = config.bind_address();
//!     ServerBuilder::new().with_config(config).serve(&addr).await
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod identity;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{
            Action, AuthContext, AuthPolicy, Owned, Owner, Resource, Role, authorize, can_write,
        },
        entity::Entity,
        error::{BookshelfError, BookshelfResult, EntityError, RequestError, ValidationError},
        extractors::{CurrentUser, MaybeUser},
        query::{AuthorListParams, BookListParams, PaginatedResponse, PaginationMeta},
        service::DataService,
        validation::{Normalize, Validated},
    };

    // === Entities ===
    pub use crate::entities::{
        Author, AuthorForm, AuthorUpdateForm, Book, BookForm, BookReview, CommentForm, LoginForm,
        PasswordChangeForm, ProfileForm, ReviewComment, ReviewForm, SignUpForm, User,
    };
    pub use crate::impl_entity;

    // === Services ===
    pub use crate::catalog::{AuthorDetail, BookDetail, Catalog, ReplyDraft, ReviewThread};
    pub use crate::identity::{IdentityService, Session, TokenService};
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{
        AppState, EntityDescriptor, EntityRegistry, RestExposure, ServerBuilder, ServerHost,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
