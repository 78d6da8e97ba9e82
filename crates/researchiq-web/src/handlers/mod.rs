//! HTTP handlers for all routes.

pub mod system;
pub mod papers;
pub mod analytics;
