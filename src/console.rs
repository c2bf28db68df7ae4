//! Console session: owns the user store and drives the create/edit form and
//! the delete confirmation the way the management page does.

use tracing::{error, info};

use crate::adapters::persistence::{FileBlobStore, MemoryBlobStore, PersistenceAdapter};
use crate::core::config::StoreConfig;
use crate::core::models::{NewUser, UserRecord};
use crate::domains::user_management::UserStore;
use crate::domains::user_management::validation::{
    EMAIL_INVALID, Field, FieldErrors, PHONE_INVALID, coerce_phone, live_email_error,
    live_phone_error, validate_fields,
};
use crate::errors::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(UserRecord),
}

/// Field values and inline errors of the open create/edit dialog.
#[derive(Debug, Clone)]
pub struct UserForm {
    mode: FormMode,
    fields: NewUser,
    errors: FieldErrors,
}

impl UserForm {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            fields: NewUser::default(),
            errors: FieldErrors::default(),
        }
    }

    fn edit(record: UserRecord) -> Self {
        Self {
            fields: NewUser::from(&record),
            mode: FormMode::Edit(record),
            errors: FieldErrors::default(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn fields(&self) -> &NewUser {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Submitting is disabled while any inline error is shown.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.fields.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.fields.last_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.fields.email = value.into();
        self.refresh_live_error(Field::Email, live_email_error(&self.fields.email), EMAIL_INVALID);
    }

    /// Keeps digits only, at most ten of them.
    pub fn set_phone(&mut self, value: &str) {
        self.fields.phone = coerce_phone(value);
        self.refresh_live_error(Field::Phone, live_phone_error(&self.fields.phone), PHONE_INVALID);
    }

    fn refresh_live_error(&mut self, field: Field, failing: bool, message: &str) {
        if failing {
            self.errors.insert(field, message);
        } else {
            self.errors.remove(field);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(UserRecord),
    Updated(UserRecord),
    /// Validation failed; the errors are on the still-open form.
    Rejected(FieldErrors),
    NoForm,
}

/// Composition root for one operator session.
pub struct ConsoleSession {
    store: UserStore,
    form: Option<UserForm>,
    pending_delete: Option<String>,
    last_error: Option<String>,
}

impl ConsoleSession {
    pub fn new(store: UserStore) -> Self {
        Self {
            store,
            form: None,
            pending_delete: None,
            last_error: None,
        }
    }

    /// File-backed session when `data_dir` is configured, in-memory otherwise.
    pub fn from_config(config: &StoreConfig) -> Self {
        let adapter = match &config.data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), key = %config.storage_key, "Using file blob store");
                PersistenceAdapter::new(FileBlobStore::new(dir), config.storage_key.clone())
            }
            None => PersistenceAdapter::new(MemoryBlobStore::new(), config.storage_key.clone()),
        };
        Self::new(UserStore::open(adapter).with_validation(config.validate_on_write))
    }

    pub fn rows(&self) -> &[UserRecord] {
        self.store.get_all()
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut UserStore {
        &mut self.store
    }

    /// Message of the last failed save, cleared by the next successful mutation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn form(&self) -> Option<&UserForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut UserForm> {
        self.form.as_mut()
    }

    pub fn open_create(&mut self) {
        self.form = Some(UserForm::create());
    }

    /// Opens the edit form for `id`. Returns `false` if no such user exists.
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.form = Some(UserForm::edit(record.clone()));
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validates the open form and hands it to the store.
    ///
    /// # Errors
    ///
    /// Returns the store error if persisting fails. The form is closed either way
    /// since the in-memory collection already changed.
    pub fn submit(&mut self) -> Result<SubmitOutcome, StoreError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(SubmitOutcome::NoForm);
        };

        if let Err(errors) = validate_fields(&form.fields) {
            form.errors = errors.clone();
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let Some(form) = self.form.take() else {
            return Ok(SubmitOutcome::NoForm);
        };
        let result = match form.mode {
            FormMode::Create => self.store.add(form.fields).map(SubmitOutcome::Created),
            FormMode::Edit(selected) => {
                let record = form.fields.into_record(selected.id, selected.created_at);
                self.store.update(record).map(SubmitOutcome::Updated)
            }
        };
        self.track(result)
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the user awaiting confirmation. Returns `false` if nothing was pending.
    ///
    /// # Errors
    ///
    /// Returns the store error if persisting fails.
    pub fn confirm_delete(&mut self) -> Result<bool, StoreError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(false);
        };
        let result = self.store.delete(&id).map(|()| true);
        self.track(result)
    }

    fn track<T>(&mut self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                error!("User change not saved: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        result
    }
}
