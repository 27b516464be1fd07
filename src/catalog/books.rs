//! Book flows: ranked listing, detail with reviews, author-only creation,
//! owner-or-staff edit and cascading delete

use super::{Catalog, by_creation, fetch};
use crate::core::auth::{Action, AuthContext, Owner, Resource, authorize};
use crate::core::error::{BookshelfError, BookshelfResult, FieldValidationError, ValidationError};
use crate::core::query::{PaginatedResponse, contains_ci, search_term};
use crate::entities::{Author, Book, BookForm, BookReview, ReviewComment};
use serde::Serialize;

/// A review together with its comments, both oldest first
#[derive(Debug, Clone, Serialize)]
pub struct ReviewThread {
    #[serde(flatten)]
    pub review: BookReview,
    pub comments: Vec<ReviewComment>,
}

/// Everything shown on a book page
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    /// Credited author profiles, in crediting order
    pub author_profiles: Vec<Author>,
    pub reviews: Vec<ReviewThread>,
    /// Whether the requester is one of the book's authors
    pub is_author: bool,
}

fn by_rank(books: &mut [Book]) {
    books.sort_by(|a, b| {
        b.popularity_rank
            .cmp(&a.popularity_rank)
            .then(a.id.cmp(&b.id))
    });
}

impl Catalog {
    /// All books, most popular first
    pub async fn books_ranked(&self) -> BookshelfResult<Vec<Book>> {
        let mut books = self.books.list().await?;
        by_rank(&mut books);
        Ok(books)
    }

    /// One page of books, optionally filtered by title substring or exact ISBN
    pub async fn list_books(
        &self,
        search: Option<&str>,
        page: Option<usize>,
    ) -> BookshelfResult<PaginatedResponse<Book>> {
        let mut books = self.books_ranked().await?;

        if let Some(term) = search_term(search) {
            books.retain(|book| {
                contains_ci(&[&book.title], &term)
                    || book.isbn13.as_deref().is_some_and(|isbn| isbn == term)
            });
        }

        tracing::debug!(total = books.len(), search = ?search, "listing books");
        Ok(PaginatedResponse::paginate(books, page, self.page_size)
            .with_search_query(search.map(String::from)))
    }

    /// Fetch a book
    pub async fn book(&self, id: u64) -> BookshelfResult<Book> {
        fetch(self.books.as_ref(), id).await
    }

    /// The users behind a book's author profiles
    pub async fn book_owners(&self, book: &Book) -> BookshelfResult<Owner> {
        let mut members = Vec::new();
        for author_id in &book.authors {
            if let Some(user_id) = self
                .authors
                .get(*author_id)
                .await?
                .and_then(|author| author.user_id)
            {
                members.push(user_id);
            }
        }
        Ok(Owner::Members(members))
    }

    /// A book with its authors, review threads and the requester's authorship
    pub async fn book_detail(&self, actor: &AuthContext, id: u64) -> BookshelfResult<BookDetail> {
        let book = self.book(id).await?;

        let mut author_profiles = Vec::with_capacity(book.authors.len());
        for author_id in &book.authors {
            if let Some(author) = self.authors.get(*author_id).await? {
                author_profiles.push(author);
            }
        }

        let mut reviews = Vec::new();
        for review in self.reviews_for_book(id).await? {
            let comments = self.comments_for_review(review.id).await?;
            reviews.push(ReviewThread { review, comments });
        }

        let is_author = match actor.user_id() {
            Some(user_id) => self.book_owners(&book).await?.includes(user_id),
            None => false,
        };

        Ok(BookDetail {
            book,
            author_profiles,
            reviews,
            is_author,
        })
    }

    /// Create a book credited to the actor's author profile
    pub async fn create_book(&self, actor: &AuthContext, form: BookForm) -> BookshelfResult<Book> {
        authorize(actor, Resource::Book, Action::Create, None)?;

        let own_profile = match actor.user_id() {
            Some(user_id) => self.author_for_user(user_id).await?,
            None => None,
        };
        let Some(own_profile) = own_profile else {
            return Err(BookshelfError::forbidden(
                "You must be an author to create books.",
            ));
        };

        self.check_authors_exist(&form.authors).await?;

        let mut book = Book::new(form.title);
        book.isbn13 = form.isbn13;
        book.description = form.description;
        if let Some(rank) = form.popularity_rank {
            book.popularity_rank = rank;
        }
        for author_id in form.authors {
            book.add_author(author_id);
        }
        book.add_author(own_profile.id);

        let book = self.books.create(book).await?;
        tracing::info!(book_id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace a book's fields; owners and staff only
    pub async fn update_book(
        &self,
        actor: &AuthContext,
        id: u64,
        form: BookForm,
    ) -> BookshelfResult<Book> {
        let mut book = self.book(id).await?;
        let owners = self.book_owners(&book).await?;
        authorize(actor, Resource::Book, Action::Update, Some(&owners))?;

        self.check_authors_exist(&form.authors).await?;

        book.title = form.title;
        book.isbn13 = form.isbn13;
        book.description = form.description;
        if let Some(rank) = form.popularity_rank {
            book.popularity_rank = rank;
        }
        if !form.authors.is_empty() {
            book.authors = form.authors;
        }

        let book = self.books.update(book).await?;
        tracing::info!(book_id = book.id, "book updated");
        Ok(book)
    }

    /// Delete a book with its reviews and their comments; owners and staff only
    pub async fn delete_book(&self, actor: &AuthContext, id: u64) -> BookshelfResult<()> {
        let book = self.book(id).await?;
        let owners = self.book_owners(&book).await?;
        authorize(actor, Resource::Book, Action::Delete, Some(&owners))?;

        let review_ids: Vec<u64> = self
            .reviews_for_book(id)
            .await?
            .into_iter()
            .map(|review| review.id)
            .collect();

        let comments = self
            .comments
            .delete_where(&|comment: &ReviewComment| review_ids.contains(&comment.review_id))
            .await?;
        let reviews = self
            .reviews
            .delete_where(&|review: &BookReview| review.book_id == id)
            .await?;
        self.books.delete(id).await?;

        tracing::info!(book_id = id, reviews, comments, "book deleted");
        Ok(())
    }

    /// Reviews of a book, oldest first
    pub async fn reviews_for_book(&self, book_id: u64) -> BookshelfResult<Vec<BookReview>> {
        let mut reviews: Vec<BookReview> = self
            .reviews
            .list()
            .await?
            .into_iter()
            .filter(|review| review.book_id == book_id)
            .collect();
        by_creation(&mut reviews);
        Ok(reviews)
    }

    async fn check_authors_exist(&self, author_ids: &[u64]) -> BookshelfResult<()> {
        let mut errors = Vec::new();
        for author_id in author_ids {
            if self.authors.get(*author_id).await?.is_none() {
                errors.push(FieldValidationError {
                    field: "authors".to_string(),
                    message: format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        author_id
                    ),
                });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors).into())
        }
    }
}
