//! Book review model and its form

use crate::core::auth::{Owned, Owner};
use crate::core::validation::extractor::{Normalize, trim};
use crate::core::validation::validators;
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user's review of a book
#[derive(Debug, Clone, Serialize)]
pub struct BookReview {
    pub id: u64,
    pub book_id: u64,
    pub user_id: u64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl_entity!(BookReview, "review", created_at: created_at);

impl BookReview {
    pub fn new(book_id: u64, user_id: u64, body: String) -> Self {
        Self {
            id: 0,
            book_id,
            user_id,
            body,
            created_at: Utc::now(),
        }
    }
}

impl Owned for BookReview {
    fn owner(&self) -> Owner {
        Owner::Field(self.user_id)
    }
}

/// Review creation and edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(
        length(max = 1000, message = "Review must be at most 1000 characters."),
        custom(function = "validators::not_blank")
    )]
    pub body: String,
}

impl Normalize for ReviewForm {
    fn normalize(&mut self) {
        trim(&mut self.body);
    }
}
