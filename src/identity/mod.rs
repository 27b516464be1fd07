//! Accounts, credentials and bearer tokens
//!
//! [`IdentityService`] owns the user store. It registers accounts, trades
//! credentials for tokens and turns a presented token back into an
//! [`AuthContext`].

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};

use crate::core::auth::{Action, AuthContext, Owned, Resource, Role, authorize};
use crate::core::error::{BookshelfError, BookshelfResult};
use crate::core::service::DataService;
use crate::entities::{LoginForm, PasswordChangeForm, ProfileForm, SignUpForm, User};
use crate::storage::InMemoryDataService;
use std::sync::Arc;

/// A user together with a freshly issued token
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Account and token operations
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn DataService<User>>,
    tokens: TokenService,
}

impl IdentityService {
    pub fn new(users: Arc<dyn DataService<User>>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// An identity service over a fresh in-memory user store
    pub fn in_memory(tokens: TokenService) -> Self {
        Self::new(Arc::new(InMemoryDataService::<User>::new()), tokens)
    }

    /// The user store, for sharing with the catalog
    pub fn users(&self) -> Arc<dyn DataService<User>> {
        self.users.clone()
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account; username and email must be unused
    pub async fn register(&self, form: SignUpForm) -> BookshelfResult<Session> {
        let password_hash = hash_password(&form.password)?;
        let mut user = User::new(form.username, form.email, password_hash);
        user.first_name = form.first_name.unwrap_or_default();
        user.last_name = form.last_name.unwrap_or_default();

        let user = self.users.create(user).await?;
        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        self.session_for(user)
    }

    /// Exchange credentials for a token
    pub async fn login(&self, form: LoginForm) -> BookshelfResult<Session> {
        let user = self
            .users
            .list()
            .await?
            .into_iter()
            .find(|user| user.username == form.username);

        match user {
            Some(user) if user.is_active && verify_password(&form.password, &user.password_hash) => {
                tracing::info!(user_id = user.id, "user logged in");
                self.session_for(user)
            }
            _ => {
                tracing::warn!(username = %form.username, "login failed");
                Err(BookshelfError::unauthorized(
                    "Unable to log in with provided credentials.",
                ))
            }
        }
    }

    /// Resolve a bearer token to the context of an existing, active user
    pub async fn authenticate(&self, token: &str) -> BookshelfResult<AuthContext> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            BookshelfError::unauthorized(match e {
                TokenError::Expired => "Token has expired.",
                _ => "Invalid token.",
            })
        })?;

        match self.users.get(claims.id).await? {
            Some(user) if user.is_active => Ok(context_for(&user)),
            _ => Err(BookshelfError::unauthorized("User inactive or deleted.")),
        }
    }

    /// A new token for `user`
    pub fn issue_token(&self, user: &User) -> BookshelfResult<String> {
        self.tokens
            .issue(user.id)
            .map_err(|e| BookshelfError::Internal(e.to_string()))
    }

    /// Fetch a user
    pub async fn user(&self, id: u64) -> BookshelfResult<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| BookshelfError::not_found("user", id))
    }

    /// Apply profile changes; the user themselves and staff only
    pub async fn update_profile(
        &self,
        actor: &AuthContext,
        id: u64,
        form: ProfileForm,
    ) -> BookshelfResult<User> {
        let mut user = self.user(id).await?;
        authorize(actor, Resource::User, Action::Update, Some(&user.owner()))?;

        if let Some(username) = form.username {
            user.username = username;
        }
        if let Some(email) = form.email {
            user.email = email;
        }
        if let Some(first_name) = form.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = form.last_name {
            user.last_name = last_name;
        }
        if let Some(avatar) = form.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(password) = form.password {
            user.password_hash = hash_password(&password)?;
        }

        let user = self.users.update(user).await?;
        tracing::info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    /// Change a password
    ///
    /// The user must confirm the current password; staff may reset without it.
    pub async fn change_password(
        &self,
        actor: &AuthContext,
        id: u64,
        form: PasswordChangeForm,
    ) -> BookshelfResult<User> {
        let mut user = self.user(id).await?;
        authorize(actor, Resource::User, Action::Update, Some(&user.owner()))?;

        if actor.user_id() == Some(id) || !actor.is_staff() {
            let confirmed = form
                .old_password
                .as_deref()
                .is_some_and(|old| verify_password(old, &user.password_hash));
            if !confirmed {
                return Err(BookshelfError::invalid_field(
                    "old_password",
                    "Your old password was entered incorrectly.",
                ));
            }
        }

        user.password_hash = hash_password(&form.new_password)?;
        let user = self.users.update(user).await?;
        tracing::info!(user_id = user.id, "password changed");
        Ok(user)
    }

    /// Grant `role` to a user
    pub async fn grant_role(&self, user_id: u64, role: Role) -> BookshelfResult<User> {
        grant_role(self.users.as_ref(), user_id, role).await
    }

    fn session_for(&self, user: User) -> BookshelfResult<Session> {
        let token = self.issue_token(&user)?;
        Ok(Session { user, token })
    }
}

/// The authorization context a user acts under
pub fn context_for(user: &User) -> AuthContext {
    AuthContext::User {
        user_id: user.id,
        is_staff: user.is_staff,
        roles: user.roles.clone(),
    }
}

/// Grant `role` to a user, writing only when it is new
pub async fn grant_role(
    users: &dyn DataService<User>,
    user_id: u64,
    role: Role,
) -> BookshelfResult<User> {
    let mut user = users
        .get(user_id)
        .await?
        .ok_or_else(|| BookshelfError::not_found("user", user_id))?;
    if !user.grant_role(role) {
        return Ok(user);
    }
    tracing::info!(user_id, role = %role, "role granted");
    users.update(user).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> IdentityService {
        IdentityService::in_memory(TokenService::new("test-secret", Duration::days(1)))
    }

    fn signup(username: &str) -> SignUpForm {
        SignUpForm {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "longpass1".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    fn login(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_and_authenticate() {
        let identity = service();
        let registered = identity.register(signup("ann")).await.unwrap();
        assert_eq!(registered.user.id, 1);

        let session = identity.login(login("ann", "longpass1")).await.unwrap();
        let context = identity.authenticate(&session.token).await.unwrap();
        assert_eq!(context.user_id(), Some(1));
        assert!(!context.is_staff());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_field_error() {
        let identity = service();
        identity.register(signup("ann")).await.unwrap();

        let mut again = signup("ann");
        again.email = "other@example.com".to_string();
        let err = identity.register(again).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_bad_credentials_are_unauthorized() {
        let identity = service();
        identity.register(signup("ann")).await.unwrap();

        let err = identity.login(login("ann", "wrong-pass")).await.unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        let err = identity.login(login("bob", "longpass1")).await.unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_inactive_user_token_rejected() {
        let identity = service();
        let session = identity.register(signup("ann")).await.unwrap();

        let mut user = session.user.clone();
        user.is_active = false;
        identity.users.update(user).await.unwrap();

        assert!(identity.authenticate(&session.token).await.is_err());
        assert!(identity.login(login("ann", "longpass1")).await.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let identity = service();
        let err = identity.authenticate("not-a-token").await.unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_change_password_requires_old_password() {
        let identity = service();
        let session = identity.register(signup("ann")).await.unwrap();
        let actor = context_for(&session.user);

        let wrong = PasswordChangeForm {
            old_password: Some("nope".to_string()),
            new_password: "brandnew1".to_string(),
        };
        assert!(identity.change_password(&actor, 1, wrong).await.is_err());

        let right = PasswordChangeForm {
            old_password: Some("longpass1".to_string()),
            new_password: "brandnew1".to_string(),
        };
        identity.change_password(&actor, 1, right).await.unwrap();
        assert!(identity.login(login("ann", "brandnew1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_staff_resets_password_without_old_one() {
        let identity = service();
        identity.register(signup("ann")).await.unwrap();
        let staff = AuthContext::User {
            user_id: 99,
            is_staff: true,
            roles: vec![],
        };

        let reset = PasswordChangeForm {
            old_password: None,
            new_password: "brandnew1".to_string(),
        };
        identity.change_password(&staff, 1, reset).await.unwrap();
        assert!(identity.login(login("ann", "brandnew1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_profile_edit_by_other_user_forbidden() {
        let identity = service();
        identity.register(signup("ann")).await.unwrap();
        let bob = identity.register(signup("bob")).await.unwrap();

        let form = ProfileForm {
            first_name: Some("Hacked".to_string()),
            ..Default::default()
        };
        let err = identity
            .update_profile(&context_for(&bob.user), 1, form)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_grant_role_is_idempotent() {
        let identity = service();
        identity.register(signup("ann")).await.unwrap();

        identity.grant_role(1, Role::Author).await.unwrap();
        let user = identity.grant_role(1, Role::Author).await.unwrap();
        assert_eq!(user.roles, vec![Role::Author]);
    }
}
