//! User account entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::UserDescriptor;
pub use handlers::UserEnvelope;
pub use model::{LoginForm, PasswordChangeForm, ProfileForm, SignUpForm, User};
