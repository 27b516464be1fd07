//! HTTP exposures
//!
//! Each exposure consumes a `ServerHost` and produces routes. The REST
//! exposure is the entry point and mounts the JSON API beside the web routes.

pub mod api;
pub mod rest;

pub use api::ApiExposure;
pub use rest::RestExposure;
