//! Author profile model and its forms

use crate::core::auth::{Owned, Owner};
use crate::core::validation::extractor::{Normalize, trim, trim_optional};
use crate::core::validation::validators;
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A person credited on books, optionally backed by a user account
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    /// The account this profile belongs to (at most one profile per account)
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl_entity!(Author, "author", created_at: created_at, unique(author) {
    "user" => author.user_id.map(|id| id.to_string()),
});

impl Author {
    pub fn new(first_name: String, last_name: String, description: Option<String>) -> Self {
        Self {
            id: 0,
            first_name,
            last_name,
            description,
            user_id: None,
            created_at: Utc::now(),
        }
    }
}

impl Owned for Author {
    fn owner(&self) -> Owner {
        match self.user_id {
            Some(user_id) => Owner::Field(user_id),
            None => Owner::Unowned,
        }
    }
}

/// Author profile creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AuthorForm {
    #[validate(
        length(max = 100, message = "First name must be at most 100 characters."),
        custom(function = "validators::not_blank")
    )]
    pub first_name: String,

    #[validate(
        length(max = 100, message = "Last name must be at most 100 characters."),
        custom(function = "validators::not_blank")
    )]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,

    /// Account to link; only staff may link someone else's account
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl Normalize for AuthorForm {
    fn normalize(&mut self) {
        trim(&mut self.first_name);
        trim(&mut self.last_name);
        trim_optional(&mut self.description);
    }
}

/// Author profile changes; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorUpdateForm {
    #[validate(
        length(max = 100, message = "First name must be at most 100 characters."),
        custom(function = "validators::not_blank")
    )]
    pub first_name: Option<String>,

    #[validate(
        length(max = 100, message = "Last name must be at most 100 characters."),
        custom(function = "validators::not_blank")
    )]
    pub last_name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,
}

impl Normalize for AuthorUpdateForm {
    fn normalize(&mut self) {
        if let Some(first_name) = self.first_name.as_mut() {
            trim(first_name);
        }
        if let Some(last_name) = self.last_name.as_mut() {
            trim(last_name);
        }
        if let Some(description) = self.description.as_mut() {
            trim(description);
        }
    }
}
