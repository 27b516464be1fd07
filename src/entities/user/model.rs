//! User account model and its forms

use crate::core::auth::{Owned, Owner, Role};
use crate::core::validation::extractor::{Normalize, trim, trim_optional};
use crate::core::validation::validators;
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Path of the avatar image, relative to the media root
    pub avatar: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub roles: Vec<Role>,
    pub date_joined: DateTime<Utc>,
}

impl_entity!(User, "user", created_at: date_joined, unique(user) {
    "username" => Some(user.username.clone()),
    "email" => Some(user.email.clone()),
});

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            email,
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            avatar: None,
            is_staff: false,
            is_active: true,
            roles: Vec::new(),
            date_joined: Utc::now(),
        }
    }

    /// Add a role unless already held; returns whether anything changed
    pub fn grant_role(&mut self, role: Role) -> bool {
        if self.roles.contains(&role) {
            return false;
        }
        self.roles.push(role);
        self.roles.sort();
        true
    }
}

impl Owned for User {
    fn owner(&self) -> Owner {
        Owner::Field(self.id)
    }
}

/// Account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters."),
        custom(function = "validators::username")
    )]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be 8 to 128 characters."
    ))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
}

impl Normalize for SignUpForm {
    fn normalize(&mut self) {
        trim(&mut self.username);
        trim(&mut self.email);
        trim_optional(&mut self.first_name);
        trim_optional(&mut self.last_name);
    }
}

/// Credentials for a token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = "validators::not_blank"))]
    pub username: String,

    #[validate(custom(function = "validators::not_blank"))]
    pub password: String,
}

impl Normalize for LoginForm {
    fn normalize(&mut self) {
        trim(&mut self.username);
    }
}

/// Profile changes; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters."),
        custom(function = "validators::username")
    )]
    pub username: Option<String>,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(custom(function = "validators::media_path"))]
    pub avatar: Option<String>,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be 8 to 128 characters."
    ))]
    pub password: Option<String>,
}

impl Normalize for ProfileForm {
    fn normalize(&mut self) {
        trim_optional(&mut self.username);
        trim_optional(&mut self.email);
        trim_optional(&mut self.avatar);
        if let Some(first_name) = self.first_name.as_mut() {
            trim(first_name);
        }
        if let Some(last_name) = self.last_name.as_mut() {
            trim(last_name);
        }
    }
}

/// Password change; the current password is required unless staff resets it
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub old_password: Option<String>,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be 8 to 128 characters."
    ))]
    pub new_password: String,
}

impl Normalize for PasswordChangeForm {
    fn normalize(&mut self) {}
}
