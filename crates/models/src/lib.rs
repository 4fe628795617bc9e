//! Domain records persisted in the collection files, plus the field rules
//! every inbound payload must satisfy before it reaches storage.

pub mod errors;
pub mod tweet;
pub mod user;

pub use tweet::Tweet;
pub use user::{User, UserLogin, UserRegister};

use errors::ModelError;

/// Check that `value` has between `min` and `max` characters (inclusive).
pub fn validate_len(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let n = value.chars().count();
    if n < min {
        return Err(ModelError::invalid(field, format!("must have at least {min} characters")));
    }
    if n > max {
        return Err(ModelError::invalid(field, format!("must have at most {max} characters")));
    }
    Ok(())
}
