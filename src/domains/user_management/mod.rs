//! User management domain: the record store and the field rules guarding it.

pub mod store;
pub mod validation;

pub use store::UserStore;
pub use validation::{Field, FieldErrors, coerce_phone, validate_fields};
