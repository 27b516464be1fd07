//! Catalog operations
//!
//! The catalog owns the data services for authors, books, reviews and
//! comments and implements every list/detail/create/update/delete flow on
//! top of them. Each write runs [`authorize`](crate::core::auth::authorize)
//! before touching the store, so a refused request never mutates anything.

pub mod authors;
pub mod books;
pub mod comments;
pub mod reviews;

use crate::core::entity::Entity;
use crate::core::error::{BookshelfError, BookshelfResult};
use crate::core::service::DataService;
use crate::entities::{Author, Book, BookReview, ReviewComment, User};
use crate::storage::InMemoryDataService;
use std::sync::Arc;

pub use authors::AuthorDetail;
pub use books::{BookDetail, ReviewThread};
pub use comments::ReplyDraft;

/// Records and the rules around them
#[derive(Clone)]
pub struct Catalog {
    users: Arc<dyn DataService<User>>,
    authors: Arc<dyn DataService<Author>>,
    books: Arc<dyn DataService<Book>>,
    reviews: Arc<dyn DataService<BookReview>>,
    comments: Arc<dyn DataService<ReviewComment>>,
    page_size: usize,
}

impl Catalog {
    /// Default number of items per list page
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    pub fn new(
        users: Arc<dyn DataService<User>>,
        authors: Arc<dyn DataService<Author>>,
        books: Arc<dyn DataService<Book>>,
        reviews: Arc<dyn DataService<BookReview>>,
        comments: Arc<dyn DataService<ReviewComment>>,
    ) -> Self {
        Self {
            users,
            authors,
            books,
            reviews,
            comments,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// A catalog over in-memory stores, sharing `users` with the identity service
    pub fn in_memory(users: Arc<dyn DataService<User>>) -> Self {
        Self::new(
            users,
            Arc::new(InMemoryDataService::<Author>::new()),
            Arc::new(InMemoryDataService::<Book>::new()),
            Arc::new(InMemoryDataService::<BookReview>::new()),
            Arc::new(InMemoryDataService::<ReviewComment>::new()),
        )
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

/// Fetch a record or fail with `NotFound`
async fn fetch<T: Entity>(service: &dyn DataService<T>, id: u64) -> BookshelfResult<T> {
    service
        .get(id)
        .await?
        .ok_or_else(|| BookshelfError::not_found(T::resource_name_singular(), id))
}

/// Order records by creation time, oldest first, ties by id
fn by_creation<T: Entity>(records: &mut [T]) {
    records.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then(a.id().cmp(&b.id()))
    });
}
