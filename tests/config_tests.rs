use std::collections::HashMap;
use std::path::PathBuf;

use userdesk::core::config::{DEFAULT_STORAGE_KEY, StoreConfig};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, StoreConfig::default());
    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    assert!(config.data_dir.is_none());
    assert!(!config.validate_on_write);
}

#[test]
fn test_reads_all_variables() {
    let config = StoreConfig::from_lookup(lookup_from(&[
        ("USERDESK_STORAGE_KEY", "people"),
        ("USERDESK_DATA_DIR", "/var/lib/userdesk"),
        ("USERDESK_VALIDATE_ON_WRITE", "Yes"),
    ]))
    .unwrap();
    assert_eq!(config.storage_key, "people");
    assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/userdesk")));
    assert!(config.validate_on_write);
}

#[test]
fn test_blank_data_dir_means_in_memory() {
    let config = StoreConfig::from_lookup(lookup_from(&[("USERDESK_DATA_DIR", "  ")])).unwrap();
    assert!(config.data_dir.is_none());
}

#[test]
fn test_rejects_bad_values() {
    let err = StoreConfig::from_lookup(lookup_from(&[("USERDESK_VALIDATE_ON_WRITE", "maybe")]))
        .unwrap_err();
    assert!(err.contains("USERDESK_VALIDATE_ON_WRITE"));

    let err = StoreConfig::from_lookup(lookup_from(&[("USERDESK_STORAGE_KEY", "")])).unwrap_err();
    assert!(err.contains("USERDESK_STORAGE_KEY"));
}

#[test]
fn test_rejects_storage_keys_that_are_paths() {
    for key in ["../escaped", "nested/users", "/etc/users", "..", "C:\\users", "a\\b"] {
        let err = StoreConfig::from_lookup(lookup_from(&[
            ("USERDESK_STORAGE_KEY", key),
            ("USERDESK_DATA_DIR", "/tmp/userdesk"),
        ]))
        .unwrap_err();
        assert!(err.starts_with("USERDESK_STORAGE_KEY:"), "key {key:?}: {err}");
    }

    let config =
        StoreConfig::from_lookup(lookup_from(&[("USERDESK_STORAGE_KEY", "people.v2")])).unwrap();
    assert_eq!(config.storage_key, "people.v2");
}
