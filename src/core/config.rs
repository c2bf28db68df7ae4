use std::env;
use std::path::PathBuf;

use crate::adapters::persistence::is_safe_key;

/// Blob key the collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    /// Directory for the file-backed blob store. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    /// Re-run the form validation rules on `add`/`update`.
    pub validate_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            validate_on_write: false,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_key = match lookup("USERDESK_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err("USERDESK_STORAGE_KEY: must not be empty".to_string());
            }
            Some(key) if !is_safe_key(&key) => {
                return Err(format!(
                    "USERDESK_STORAGE_KEY: '{}' must be a plain name without path separators or '..'",
                    key
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let validate_on_write = match lookup("USERDESK_VALIDATE_ON_WRITE") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| format!("USERDESK_VALIDATE_ON_WRITE: invalid flag '{}'", raw))?,
            None => defaults.validate_on_write,
        };

        Ok(Self {
            storage_key,
            data_dir: lookup("USERDESK_DATA_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            validate_on_write,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
