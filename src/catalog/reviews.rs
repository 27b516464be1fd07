//! Review flows, addressed under their book

use super::{Catalog, fetch};
use crate::core::auth::{Action, AuthContext, Owned, Resource, authorize};
use crate::core::error::{BookshelfError, BookshelfResult};
use crate::entities::{BookReview, ReviewComment, ReviewForm};

impl Catalog {
    /// Fetch a review, failing with `NotFound` unless it belongs to `book_id`
    pub async fn review_in_book(&self, book_id: u64, id: u64) -> BookshelfResult<BookReview> {
        let review = fetch(self.reviews.as_ref(), id).await?;
        if review.book_id != book_id {
            return Err(BookshelfError::not_found("review", id));
        }
        Ok(review)
    }

    /// Post a review of a book as the actor
    pub async fn create_review(
        &self,
        actor: &AuthContext,
        book_id: u64,
        form: ReviewForm,
    ) -> BookshelfResult<BookReview> {
        authorize(actor, Resource::Review, Action::Create, None)?;
        let user_id = actor
            .user_id()
            .ok_or_else(|| BookshelfError::unauthorized("Authentication required"))?;
        self.book(book_id).await?;

        let review = self
            .reviews
            .create(BookReview::new(book_id, user_id, form.body))
            .await?;
        tracing::info!(review_id = review.id, book_id, user_id, "review posted");
        Ok(review)
    }

    /// Edit a review's body; its writer and staff only
    pub async fn update_review(
        &self,
        actor: &AuthContext,
        book_id: u64,
        id: u64,
        form: ReviewForm,
    ) -> BookshelfResult<BookReview> {
        let mut review = self.review_in_book(book_id, id).await?;
        authorize(actor, Resource::Review, Action::Update, Some(&review.owner()))?;

        review.body = form.body;
        self.reviews.update(review).await
    }

    /// Delete a review and its comments; its writer and staff only
    pub async fn delete_review(
        &self,
        actor: &AuthContext,
        book_id: u64,
        id: u64,
    ) -> BookshelfResult<()> {
        let review = self.review_in_book(book_id, id).await?;
        authorize(actor, Resource::Review, Action::Delete, Some(&review.owner()))?;

        let comments = self
            .comments
            .delete_where(&|comment: &ReviewComment| comment.review_id == id)
            .await?;
        self.reviews.delete(id).await?;

        tracing::info!(review_id = id, book_id, comments, "review deleted");
        Ok(())
    }
}
