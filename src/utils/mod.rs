//! Shared utilities: input validation.

pub mod validation;

pub use validation::{validate_nm_request, validate_range_config};
