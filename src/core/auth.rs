//! Authorization for bookshelf
//!
//! Every write goes through one predicate, [`can_write`]: staff may write
//! anything, everyone else only what they own. What "own" means differs per
//! entity and is described by an [`Owner`] value rather than per-type logic:
//! - reviews, comments, users and linked author profiles name a single owner
//! - books are owned by every user behind one of their author profiles
//!
//! [`AuthPolicy::for_action`] is the single table of who may do what.

use crate::core::error::{BookshelfError, BookshelfResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named roles a user can be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Holds an author profile and may create books
    Author,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Author => write!(f, "author"),
        }
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: u64,
        is_staff: bool,
        roles: Vec<Role>,
    },

    /// No credentials presented
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<u64> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if context carries the staff flag
    pub fn is_staff(&self) -> bool {
        matches!(self, AuthContext::User { is_staff: true, .. })
    }

    /// Check if context has a role
    pub fn has_role(&self, role: Role) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.contains(&role),
            AuthContext::Anonymous => false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, AuthContext::Anonymous)
    }
}

/// Who owns a record
#[derive(Debug, Clone, PartialEq)]
pub enum Owner {
    /// A single user field (`review.user`, `comment.user`, ...)
    Field(u64),

    /// Membership in a collection of users (the users behind `book.authors`)
    Members(Vec<u64>),

    /// Nobody; only staff may write
    Unowned,
}

impl Owner {
    /// Check if a user is (one of) the owner(s)
    pub fn includes(&self, user_id: u64) -> bool {
        match self {
            Owner::Field(owner) => *owner == user_id,
            Owner::Members(members) => members.contains(&user_id),
            Owner::Unowned => false,
        }
    }
}

/// Implemented by records whose owner can be read off the record itself
pub trait Owned {
    fn owner(&self) -> Owner;
}

/// The write predicate: staff, or the record's owner
pub fn can_write(actor: &AuthContext, owner: &Owner) -> bool {
    match actor {
        AuthContext::User {
            user_id, is_staff, ..
        } => *is_staff || owner.includes(*user_id),
        AuthContext::Anonymous => false,
    }
}

/// Kinds of records guarded by a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Book,
    Author,
    Review,
    Comment,
    User,
}

/// Operations on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Authorization policy for an operation
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPolicy {
    /// No credentials needed
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must hold this role (staff always passes)
    HasRole(Role),

    /// Staff, or the owner of the record
    OwnerOrStaff,
}

impl AuthPolicy {
    /// The one rule for an action on a resource
    pub fn for_action(resource: Resource, action: Action) -> Self {
        match (resource, action) {
            (_, Action::Read) => AuthPolicy::Public,
            (Resource::Book, Action::Create) => AuthPolicy::HasRole(Role::Author),
            (Resource::User, Action::Create) => AuthPolicy::Public,
            (_, Action::Create) => AuthPolicy::Authenticated,
            (_, Action::Update | Action::Delete) => AuthPolicy::OwnerOrStaff,
        }
    }

    /// Check if auth context satisfies this policy
    ///
    /// `owner` is required by [`AuthPolicy::OwnerOrStaff`]; without it only
    /// staff pass.
    pub fn check(&self, context: &AuthContext, owner: Option<&Owner>) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
            AuthPolicy::HasRole(role) => context.is_staff() || context.has_role(*role),
            AuthPolicy::OwnerOrStaff => can_write(context, owner.unwrap_or(&Owner::Unowned)),
        }
    }
}

/// Enforce the policy for `action` on `resource`
///
/// Anonymous callers get `Unauthorized`, authenticated ones `Forbidden`.
pub fn authorize(
    context: &AuthContext,
    resource: Resource,
    action: Action,
    owner: Option<&Owner>,
) -> BookshelfResult<()> {
    if AuthPolicy::for_action(resource, action).check(context, owner) {
        return Ok(());
    }

    if !context.is_authenticated() {
        return Err(BookshelfError::unauthorized(
            "Authentication credentials were not provided.",
        ));
    }

    tracing::warn!(
        user_id = ?context.user_id(),
        resource = ?resource,
        action = ?action,
        "permission denied"
    );
    Err(BookshelfError::forbidden(format!(
        "You don't have permission to {} this {}.",
        match action {
            Action::Read => "view",
            Action::Create => "create",
            Action::Update => "edit",
            Action::Delete => "delete",
        },
        match resource {
            Resource::Book => "book",
            Resource::Author => "author",
            Resource::Review => "review",
            Resource::Comment => "comment",
            Resource::User => "user",
        }
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> AuthContext {
        AuthContext::User {
            user_id: id,
            is_staff: false,
            roles: vec![],
        }
    }

    fn staff(id: u64) -> AuthContext {
        AuthContext::User {
            user_id: id,
            is_staff: true,
            roles: vec![],
        }
    }

    #[test]
    fn test_owner_field() {
        let owner = Owner::Field(1);
        assert!(can_write(&user(1), &owner));
        assert!(!can_write(&user(2), &owner));
        assert!(can_write(&staff(2), &owner));
        assert!(!can_write(&AuthContext::Anonymous, &owner));
    }

    #[test]
    fn test_owner_members() {
        let owner = Owner::Members(vec![4, 5]);
        assert!(can_write(&user(5), &owner));
        assert!(!can_write(&user(6), &owner));
        assert!(can_write(&staff(6), &owner));
    }

    #[test]
    fn test_unowned_is_staff_only() {
        assert!(!can_write(&user(1), &Owner::Unowned));
        assert!(can_write(&staff(1), &Owner::Unowned));
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(
            AuthPolicy::for_action(Resource::Book, Action::Read),
            AuthPolicy::Public
        );
        assert_eq!(
            AuthPolicy::for_action(Resource::Book, Action::Create),
            AuthPolicy::HasRole(Role::Author)
        );
        assert_eq!(
            AuthPolicy::for_action(Resource::Review, Action::Create),
            AuthPolicy::Authenticated
        );
        assert_eq!(
            AuthPolicy::for_action(Resource::Comment, Action::Delete),
            AuthPolicy::OwnerOrStaff
        );
    }

    #[test]
    fn test_has_role_policy() {
        let author = AuthContext::User {
            user_id: 1,
            is_staff: false,
            roles: vec![Role::Author],
        };
        let policy = AuthPolicy::HasRole(Role::Author);
        assert!(policy.check(&author, None));
        assert!(!policy.check(&user(2), None));
        assert!(policy.check(&staff(3), None));
    }

    #[test]
    fn test_authorize_distinguishes_anonymous() {
        let owner = Owner::Field(1);

        let err = authorize(
            &AuthContext::Anonymous,
            Resource::Review,
            Action::Update,
            Some(&owner),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");

        let err = authorize(&user(2), Resource::Review, Action::Update, Some(&owner)).unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");

        assert!(authorize(&user(1), Resource::Review, Action::Update, Some(&owner)).is_ok());
    }
}
