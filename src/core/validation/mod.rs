//! Validation and normalization of submitted forms
//!
//! Forms derive [`validator::Validate`] for field rules and implement
//! [`Normalize`] to clean values before the rules run. The [`Validated`]
//! extractor wires both into axum handlers.

pub mod extractor;
pub mod validators;

pub use extractor::{Normalize, Validated};
