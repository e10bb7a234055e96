//! Request sanitizing and schema validation

pub mod sanitize;
pub mod schema;

pub use sanitize::sanitize;
pub use schema::{FieldViolation, ValidationErrors, validate};
