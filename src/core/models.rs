use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user row as held by the store and mirrored to the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque identifier, assigned by `add` and never changed afterwards.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Ten ASCII digits, no country code.
    pub phone: String,
    /// Serialized as an RFC 3339 string under `createdAt`.
    pub created_at: DateTime<Utc>,
}

/// Field set accepted by `UserStore::add`; id and timestamp are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }
}

impl From<&UserRecord> for NewUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}
