//! Field rules applied to user input before it reaches the store.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::core::models::NewUser;

/// Number of digits in a local phone number.
pub const PHONE_LEN: usize = 10;

pub const FIRST_NAME_REQUIRED: &str = "İsim alanı zorunludur";
pub const LAST_NAME_REQUIRED: &str = "Soyisim alanı zorunludur";
pub const EMAIL_INVALID: &str = "Geçerli bir e-posta adresi giriniz";
pub const PHONE_INVALID: &str = "10 haneli telefon numarası giriniz";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

/// Inline messages keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.key(), message)?;
            first = false;
        }
        Ok(())
    }
}

/// Strips everything but ASCII digits and keeps at most [`PHONE_LEN`] of them.
pub fn coerce_phone(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_LEN)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_LEN && phone.chars().all(|c| c.is_ascii_digit())
}

/// Check run while the operator is still typing: an empty value is not flagged yet.
pub fn live_email_error(email: &str) -> bool {
    !email.is_empty() && !is_valid_email(email)
}

/// Same as [`live_email_error`] for an already coerced phone value.
pub fn live_phone_error(phone: &str) -> bool {
    !phone.is_empty() && phone.len() != PHONE_LEN
}

/// Full check performed on submit. Every failing field gets its message.
pub fn validate_fields(fields: &NewUser) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if fields.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, FIRST_NAME_REQUIRED);
    }
    if fields.last_name.trim().is_empty() {
        errors.insert(Field::LastName, LAST_NAME_REQUIRED);
    }
    if !is_valid_email(&fields.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }
    if !is_valid_phone(&fields.phone) {
        errors.insert(Field::Phone, PHONE_INVALID);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
