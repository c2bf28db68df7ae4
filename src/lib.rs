//! userdesk - the record store behind a single-operator user management console.
//!
//! The crate keeps an authoritative, ordered collection of user records and
//! mirrors it into a local key-value blob store after every change.
//!
//! # Architecture
//!
//! - `adapters::persistence`: blob store substrates and the adapter that loads
//!   and saves the serialized collection, falling back to seed users
//! - `domains::user_management`: the `UserStore` and the field validation rules
//! - `console`: the session that owns the store and models the form and delete
//!   confirmation flow of the management page
//!
//! # Example
//!
//! ```
//! use userdesk::adapters::persistence::{MemoryBlobStore, PersistenceAdapter};
//! use userdesk::core::models::NewUser;
//! use userdesk::domains::user_management::UserStore;
//!
//! fn main() -> Result<(), userdesk::StoreError> {
//!     let adapter = PersistenceAdapter::with_default_key(MemoryBlobStore::new());
//!     let mut store = UserStore::open(adapter);
//!
//!     let created = store.add(NewUser::new("Ela", "Demir", "ela@x.com", "5551234567"))?;
//!     assert_eq!(store.get_all().last(), Some(&created));
//!
//!     store.delete(&created.id)?;
//!     assert_eq!(store.len(), 8);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod console;
pub mod core;
pub mod domains;
pub mod errors;

pub use errors::StoreError;

/// Configure structured logging with JSON output.
///
/// Call once from the composition root before opening a session. Calling it
/// again is harmless: the second subscriber is not installed.
///
/// # Example
///
/// ```
/// userdesk::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
