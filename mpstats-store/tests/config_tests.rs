use mpstats_store::{DEFAULT_BUSY_TIMEOUT_MS, StoreConfig};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn default_is_in_memory() {
    let config = StoreConfig::default();
    assert_eq!(config.path, None);
    assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
}

#[test]
fn missing_fields_take_defaults() {
    let config: StoreConfig = serde_json::from_str(r#"{"path": "/tmp/x.db"}"#).unwrap();
    assert_eq!(config.path, Some(PathBuf::from("/tmp/x.db")));
    assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
}

#[test]
fn from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"busy_timeout_ms": 250}}"#).unwrap();
    let config = StoreConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.busy_timeout_ms, 250);
    assert_eq!(config.path, None);
}

#[test]
fn from_json_file_missing_is_io_error() {
    let err = StoreConfig::from_json_file(std::path::Path::new("/definitely/not/here.json"))
        .unwrap_err();
    assert!(matches!(err, mpstats_store::StoreError::Io(_)));
}

#[test]
fn from_json_file_invalid_is_serialization_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = StoreConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, mpstats_store::StoreError::Serialization(_)));
}
