//! CLI library for testing purposes

pub mod validation;

pub use validation::{ValidationContext, split_source, validate_context};
