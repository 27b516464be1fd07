//! Bookshelf entities
//!
//! Each entity module carries its record type and forms (`model`), its HTTP
//! handlers and the descriptor that registers its web routes.

pub mod macros;

pub mod author;
pub mod book;
pub mod comment;
pub mod review;
pub mod user;

pub use author::{Author, AuthorDescriptor, AuthorForm, AuthorUpdateForm};
pub use book::{Book, BookDescriptor, BookForm};
pub use comment::{CommentDescriptor, CommentForm, ReviewComment};
pub use review::{BookReview, ReviewDescriptor, ReviewForm};
pub use user::{
    LoginForm, PasswordChangeForm, ProfileForm, SignUpForm, User, UserDescriptor, UserEnvelope,
};

use crate::server::EntityRegistry;

/// Register the web routes of every entity
pub fn register_all(registry: &mut EntityRegistry) {
    registry.register(Box::new(AuthorDescriptor));
    registry.register(Box::new(BookDescriptor));
    registry.register(Box::new(CommentDescriptor));
    registry.register(Box::new(ReviewDescriptor));
    registry.register(Box::new(UserDescriptor));
}
