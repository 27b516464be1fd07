//! Author profile flows and the author role grant

use super::{Catalog, fetch};
use crate::core::auth::{Action, AuthContext, Owned, Resource, Role, authorize};
use crate::core::error::{BookshelfError, BookshelfResult};
use crate::core::query::{PaginatedResponse, contains_ci, search_term};
use crate::entities::{Author, AuthorForm, AuthorUpdateForm, Book};
use crate::identity;
use serde::Serialize;

/// Everything shown on an author page
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: Author,
    /// Books crediting this author, most popular first
    pub books: Vec<Book>,
}

impl Catalog {
    /// All authors, by last name
    pub async fn authors_by_last_name(&self) -> BookshelfResult<Vec<Author>> {
        let mut authors = self.authors.list().await?;
        authors.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        Ok(authors)
    }

    /// One page of authors, optionally filtered by first or last name
    pub async fn list_authors(
        &self,
        search: Option<&str>,
        page: Option<usize>,
    ) -> BookshelfResult<PaginatedResponse<Author>> {
        let mut authors = self.authors_by_last_name().await?;

        if let Some(term) = search_term(search) {
            authors.retain(|author| contains_ci(&[&author.first_name, &author.last_name], &term));
        }

        Ok(PaginatedResponse::paginate(authors, page, self.page_size)
            .with_search_query(search.map(String::from)))
    }

    /// Fetch an author profile
    pub async fn author(&self, id: u64) -> BookshelfResult<Author> {
        fetch(self.authors.as_ref(), id).await
    }

    /// An author with the books crediting them
    pub async fn author_detail(&self, id: u64) -> BookshelfResult<AuthorDetail> {
        let author = self.author(id).await?;
        let books = self
            .books_ranked()
            .await?
            .into_iter()
            .filter(|book| book.authors.contains(&id))
            .collect();
        Ok(AuthorDetail { author, books })
    }

    /// The author profile linked to a user account, if any
    pub async fn author_for_user(&self, user_id: u64) -> BookshelfResult<Option<Author>> {
        Ok(self
            .authors
            .list()
            .await?
            .into_iter()
            .find(|author| author.user_id == Some(user_id)))
    }

    /// Create an author profile and grant its user the author role
    ///
    /// Regular users create their own profile; staff may link any account or
    /// none.
    pub async fn create_author(
        &self,
        actor: &AuthContext,
        form: AuthorForm,
    ) -> BookshelfResult<Author> {
        authorize(actor, Resource::Author, Action::Create, None)?;

        let user_id = match (form.user_id, actor.user_id()) {
            (Some(target), Some(me)) if target != me && !actor.is_staff() => {
                return Err(BookshelfError::forbidden(
                    "You can only create your own author profile.",
                ));
            }
            (Some(target), _) => Some(target),
            (None, _) if actor.is_staff() => None,
            (None, me) => me,
        };

        if let Some(user_id) = user_id {
            if self.users.get(user_id).await?.is_none() {
                return Err(BookshelfError::invalid_field(
                    "user_id",
                    format!("User {} does not exist.", user_id),
                ));
            }
        }

        let mut author = Author::new(form.first_name, form.last_name, form.description);
        author.user_id = user_id;
        let author = self.authors.create(author).await?;

        if let Some(user_id) = user_id {
            identity::grant_role(self.users.as_ref(), user_id, Role::Author).await?;
        }

        tracing::info!(author_id = author.id, user_id = ?user_id, "author profile created");
        Ok(author)
    }

    /// Edit an author profile; its user and staff only
    pub async fn update_author(
        &self,
        actor: &AuthContext,
        id: u64,
        form: AuthorUpdateForm,
    ) -> BookshelfResult<Author> {
        let mut author = self.author(id).await?;
        authorize(actor, Resource::Author, Action::Update, Some(&author.owner()))?;

        if let Some(first_name) = form.first_name {
            author.first_name = first_name;
        }
        if let Some(last_name) = form.last_name {
            author.last_name = last_name;
        }
        if let Some(description) = form.description {
            author.description = Some(description).filter(|d| !d.is_empty());
        }

        self.authors.update(author).await
    }
}
