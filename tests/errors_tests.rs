use std::error::Error;

use userdesk::StoreError;
use userdesk::domains::user_management::{Field, FieldErrors};

#[test]
fn test_store_error_implements_error_trait() {
    // Verify StoreError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = StoreError::Storage("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_store_error_display() {
    let error = StoreError::Storage("disk full".to_string());
    assert_eq!(format!("{error}"), "Failed to access user storage: disk full");

    let error = StoreError::Serialization("bad value".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to serialize user records: bad value"
    );

    let mut fields = FieldErrors::default();
    fields.insert(Field::Email, "invalid");
    let error = StoreError::Validation(fields);
    assert_eq!(format!("{error}"), "Invalid user fields: email: invalid");
}

#[test]
fn test_store_error_from_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    match StoreError::from(io) {
        StoreError::Storage(msg) => assert!(msg.contains("read-only")),
        other => panic!("Unexpected error type: {other}"),
    }

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        StoreError::from(json_err),
        StoreError::Serialization(_)
    ));

    let mut fields = FieldErrors::default();
    fields.insert(Field::Phone, "short");
    assert!(matches!(
        StoreError::from(fields),
        StoreError::Validation(_)
    ));
}
