use chrono::Utc;
use tracing::{info, warn};

use super::validation::validate_fields;
use crate::adapters::persistence::PersistenceAdapter;
use crate::core::models::{NewUser, UserRecord};
use crate::errors::StoreError;

type Listener = Box<dyn FnMut(&[UserRecord])>;

/// In-memory authoritative user collection.
///
/// Every mutation persists the whole collection through the adapter before
/// returning. A failed save leaves the in-memory change in place, still reaches
/// the listeners and hands the error back to the caller.
pub struct UserStore {
    users: Vec<UserRecord>,
    persistence: PersistenceAdapter,
    listeners: Vec<Listener>,
    validate_on_write: bool,
    last_issued_id: i64,
}

impl UserStore {
    /// Opens the store with whatever the adapter loads (saved users or the seed).
    pub fn open(persistence: PersistenceAdapter) -> Self {
        let users = persistence.load();
        info!(count = users.len(), "User store opened");
        Self {
            users,
            persistence,
            listeners: Vec::new(),
            validate_on_write: false,
            last_issued_id: 0,
        }
    }

    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_on_write = enabled;
        self
    }

    pub fn get_all(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn persistence(&self) -> &PersistenceAdapter {
        &self.persistence
    }

    /// Registers a callback that receives the full collection after every mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&[UserRecord]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Appends a new user with a fresh id and `created_at` set to now.
    ///
    /// # Errors
    ///
    /// Returns an error if entry validation is enabled and rejects the fields,
    /// or if persisting the collection fails.
    pub fn add(&mut self, fields: NewUser) -> Result<UserRecord, StoreError> {
        if self.validate_on_write {
            validate_fields(&fields)?;
        }

        let id = self.next_id();
        let record = fields.into_record(id, Utc::now());
        self.users.push(record.clone());
        info!(id = %record.id, count = self.users.len(), "Added user");

        self.commit()?;
        Ok(record)
    }

    /// Replaces the user with the same id, keeping its position.
    ///
    /// All fields come from `record`, `created_at` included. An unknown id leaves
    /// the collection untouched but still persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if entry validation is enabled and rejects the fields,
    /// or if persisting the collection fails.
    pub fn update(&mut self, record: UserRecord) -> Result<UserRecord, StoreError> {
        if self.validate_on_write {
            validate_fields(&NewUser::from(&record))?;
        }

        match self.users.iter_mut().find(|u| u.id == record.id) {
            Some(existing) => {
                if existing.created_at != record.created_at {
                    warn!(
                        id = %record.id,
                        from = %existing.created_at,
                        to = %record.created_at,
                        "Update overwrites createdAt"
                    );
                }
                *existing = record.clone();
                info!(id = %record.id, "Updated user");
            }
            None => info!(id = %record.id, "Update for unknown user ignored"),
        }

        self.commit()?;
        Ok(record)
    }

    /// Removes the user with `id` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() < before {
            info!(id = %id, count = self.users.len(), "Deleted user");
        } else {
            info!(id = %id, "Delete for unknown user ignored");
        }

        self.commit()
    }

    /// Saves, then notifies listeners with the in-memory collection whether or
    /// not the save went through.
    fn commit(&mut self) -> Result<(), StoreError> {
        let saved = self.persistence.save(&self.users);
        for listener in &mut self.listeners {
            listener(&self.users);
        }
        saved
    }

    /// Millisecond timestamp id, strictly increasing within the store and never
    /// equal to an id already in the collection.
    fn next_id(&mut self) -> String {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_issued_id + 1);
        loop {
            let id = candidate.to_string();
            if !self.users.iter().any(|u| u.id == id) {
                self.last_issued_id = candidate;
                return id;
            }
            candidate += 1;
        }
    }
}
