//! Comment flows: threaded replies on a review, addressed under the book

use super::{Catalog, by_creation, fetch};
use crate::core::auth::{Action, AuthContext, Owned, Resource, authorize};
use crate::core::error::{BookshelfError, BookshelfResult};
use crate::entities::{CommentForm, ReviewComment};
use serde::Serialize;

/// The prefilled reply form for a comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyDraft {
    pub body: String,
    pub reply_to: u64,
}

impl Catalog {
    /// Fetch a comment, failing with `NotFound` unless its review is on `book_id`
    pub async fn comment_in_book(&self, book_id: u64, id: u64) -> BookshelfResult<ReviewComment> {
        let comment = fetch(self.comments.as_ref(), id).await?;
        match self.reviews.get(comment.review_id).await? {
            Some(review) if review.book_id == book_id => Ok(comment),
            _ => Err(BookshelfError::not_found("comment", id)),
        }
    }

    /// Comments on a review, oldest first
    pub async fn comments_for_review(&self, review_id: u64) -> BookshelfResult<Vec<ReviewComment>> {
        let mut comments: Vec<ReviewComment> = self
            .comments
            .list()
            .await?
            .into_iter()
            .filter(|comment| comment.review_id == review_id)
            .collect();
        by_creation(&mut comments);
        Ok(comments)
    }

    /// The reply form for `reply_id`, seeded with its quoted body
    pub async fn reply_draft(
        &self,
        book_id: u64,
        review_id: u64,
        reply_id: u64,
    ) -> BookshelfResult<ReplyDraft> {
        self.review_in_book(book_id, review_id).await?;
        let parent = self.reply_target(review_id, reply_id).await?;
        Ok(ReplyDraft {
            body: parent.quote(),
            reply_to: parent.id,
        })
    }

    /// Comment on a review, optionally as a reply to another of its comments
    ///
    /// An empty reply body is replaced by the quoted parent; an empty
    /// top-level comment is rejected.
    pub async fn create_comment(
        &self,
        actor: &AuthContext,
        book_id: u64,
        review_id: u64,
        reply_to: Option<u64>,
        form: CommentForm,
    ) -> BookshelfResult<ReviewComment> {
        authorize(actor, Resource::Comment, Action::Create, None)?;
        let user_id = actor
            .user_id()
            .ok_or_else(|| BookshelfError::unauthorized("Authentication required"))?;
        self.review_in_book(book_id, review_id).await?;

        let parent = match reply_to {
            Some(reply_id) => Some(self.reply_target(review_id, reply_id).await?),
            None => None,
        };

        let body = match (&parent, form.body.is_empty()) {
            (Some(parent), true) => parent.quote(),
            (None, true) => {
                return Err(BookshelfError::invalid_field(
                    "body",
                    "This field is required.",
                ));
            }
            (_, false) => form.body,
        };
        if body.chars().count() > ReviewComment::MAX_BODY_CHARS {
            return Err(BookshelfError::invalid_field(
                "body",
                format!(
                    "Comment must be at most {} characters.",
                    ReviewComment::MAX_BODY_CHARS
                ),
            ));
        }

        let mut comment = ReviewComment::new(review_id, user_id, body);
        comment.reply_to = parent.map(|parent| parent.id);
        let comment = self.comments.create(comment).await?;

        tracing::info!(
            comment_id = comment.id,
            review_id,
            reply_to = ?comment.reply_to,
            "comment posted"
        );
        Ok(comment)
    }

    /// Edit a comment's body; its writer and staff only
    pub async fn update_comment(
        &self,
        actor: &AuthContext,
        book_id: u64,
        id: u64,
        form: CommentForm,
    ) -> BookshelfResult<ReviewComment> {
        let mut comment = self.comment_in_book(book_id, id).await?;
        authorize(actor, Resource::Comment, Action::Update, Some(&comment.owner()))?;

        if form.body.is_empty() {
            return Err(BookshelfError::invalid_field("body", "This field is required."));
        }
        comment.body = form.body;
        self.comments.update(comment).await
    }

    /// Delete a comment, detaching its replies; its writer and staff only
    pub async fn delete_comment(
        &self,
        actor: &AuthContext,
        book_id: u64,
        id: u64,
    ) -> BookshelfResult<()> {
        let comment = self.comment_in_book(book_id, id).await?;
        authorize(actor, Resource::Comment, Action::Delete, Some(&comment.owner()))?;

        self.comments.delete(id).await?;
        for mut reply in self.comments_for_review(comment.review_id).await? {
            if reply.reply_to == Some(id) {
                reply.reply_to = None;
                self.comments.update(reply).await?;
            }
        }

        tracing::info!(comment_id = id, book_id, "comment deleted");
        Ok(())
    }

    /// The comment being replied to; it must sit on the same review
    async fn reply_target(&self, review_id: u64, reply_id: u64) -> BookshelfResult<ReviewComment> {
        match self.comments.get(reply_id).await? {
            Some(parent) if parent.review_id == review_id => Ok(parent),
            _ => Err(BookshelfError::not_found("comment", reply_id)),
        }
    }
}
