//! Review comment model and its form

use crate::core::auth::{Owned, Owner};
use crate::core::validation::extractor::{Normalize, trim};
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A comment on a review, optionally replying to another comment
#[derive(Debug, Clone, Serialize)]
pub struct ReviewComment {
    pub id: u64,
    pub review_id: u64,
    pub user_id: u64,
    pub body: String,
    /// The comment this one replies to; always on the same review
    pub reply_to: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl_entity!(ReviewComment, "comment", created_at: created_at);

impl ReviewComment {
    /// Longest accepted body, in characters
    pub const MAX_BODY_CHARS: usize = 1000;

    pub fn new(review_id: u64, user_id: u64, body: String) -> Self {
        Self {
            id: 0,
            review_id,
            user_id,
            body,
            reply_to: None,
            created_at: Utc::now(),
        }
    }

    /// The initial body of a reply: the parent's body, quoted
    pub fn quote(&self) -> String {
        format!("<q>{}</q><br/>", self.body)
    }
}

impl Owned for ReviewComment {
    fn owner(&self) -> Owner {
        Owner::Field(self.user_id)
    }
}

/// Comment creation and edit form
///
/// The body may be left empty when replying; it is then seeded with the
/// quoted parent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters."))]
    pub body: String,
}

impl Normalize for CommentForm {
    fn normalize(&mut self) {
        trim(&mut self.body);
    }
}
