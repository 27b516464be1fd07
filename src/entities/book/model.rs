//! Book model and its form

use crate::core::validation::extractor::{Normalize, trim, trim_optional};
use crate::core::validation::validators;
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lowest and highest popularity rank
pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 10;

/// A catalogued book
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: u64,
    pub isbn13: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Ids of the credited author profiles
    pub authors: Vec<u64>,
    /// Popularity, 1 (lowest) to 10 (highest)
    pub popularity_rank: u8,
    pub created_at: DateTime<Utc>,
}

impl_entity!(Book, "book", created_at: created_at, unique(book) {
    "isbn13" => book.isbn13.clone(),
});

impl Book {
    pub fn new(title: String) -> Self {
        Self {
            id: 0,
            isbn13: None,
            title,
            description: None,
            authors: Vec::new(),
            popularity_rank: MIN_RANK,
            created_at: Utc::now(),
        }
    }

    /// Credit an author, keeping the list free of duplicates
    pub fn add_author(&mut self, author_id: u64) {
        if !self.authors.contains(&author_id) {
            self.authors.push(author_id);
        }
    }
}

/// Book creation and edit form
///
/// On edit every field is replaced except `authors` (kept when empty) and
/// `popularity_rank` (kept when absent).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookForm {
    #[validate(
        length(max = 150, message = "Title must be at most 150 characters."),
        custom(function = "validators::not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "validators::isbn13"))]
    pub isbn13: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,

    #[serde(default)]
    pub authors: Vec<u64>,

    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 10,
        message = "Popularity rank must be between 1 and 10."
    ))]
    pub popularity_rank: Option<u8>,
}

impl Normalize for BookForm {
    fn normalize(&mut self) {
        trim(&mut self.title);
        trim_optional(&mut self.isbn13);
        trim_optional(&mut self.description);
        let mut seen = std::collections::HashSet::new();
        self.authors.retain(|id| seen.insert(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookForm {
        BookForm {
            title: "Dune".into(),
            isbn13: Some("9780441172719".into()),
            description: None,
            authors: vec![],
            popularity_rank: Some(7),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_rank_bounds() {
        let mut f = form();
        f.popularity_rank = Some(0);
        assert!(f.validate().is_err());
        f.popularity_rank = Some(11);
        assert!(f.validate().is_err());
        f.popularity_rank = Some(10);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_blank_isbn_becomes_none() {
        let mut f = form();
        f.isbn13 = Some("   ".into());
        f.normalize();
        assert_eq!(f.isbn13, None);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_bad_isbn_is_field_error() {
        let mut f = form();
        f.isbn13 = Some("12345".into());
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("isbn13"));
    }

    #[test]
    fn test_add_author_dedups() {
        let mut book = Book::new("Dune".into());
        book.add_author(1);
        book.add_author(1);
        book.add_author(2);
        assert_eq!(book.authors, vec![1, 2]);
        assert_eq!(book.popularity_rank, MIN_RANK);
    }
}
