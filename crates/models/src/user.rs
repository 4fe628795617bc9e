use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validate_len;

pub const NAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Public view of a user. Never carries the password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl User {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)?;
        validate_name("first_name", &self.first_name)?;
        validate_name("last_name", &self.last_name)?;
        Ok(())
    }
}

/// Registration payload and, as-is, the record stored in the users collection.
///
/// The password is kept in plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegister {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

impl UserRegister {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.user.validate()?;
        validate_password(&self.password)
    }

    pub fn public(&self) -> User {
        self.user.clone()
    }

    pub fn into_public(self) -> User {
        self.user
    }
}

/// Login payload. Extra fields such as `user_id` are accepted and ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

impl UserLogin {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Lightweight structural email check: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let invalid = || ModelError::invalid("email", "not a valid email address");
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_name(field: &'static str, name: &str) -> Result<(), ModelError> {
    validate_len(field, name, 1, NAME_MAX_LEN)
}

pub fn validate_password(password: &str) -> Result<(), ModelError> {
    validate_len("password", password, PASSWORD_MIN_LEN, usize::MAX)
}
