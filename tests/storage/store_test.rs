// Store Tests
// Tests for the file-backed balance store

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use trustline::{BalanceStore, FileBalanceStore, Party, StoreError, TrustlineConfig};

fn open(dir: &TempDir) -> FileBalanceStore {
    FileBalanceStore::open(&TrustlineConfig::new().with_directory(dir.path())).unwrap()
}

fn party(name: &str) -> Party {
    Party::new(name).unwrap()
}

// ============================================================================
// READ / WRITE
// ============================================================================

#[test]
fn test_store_read_missing_is_zero_and_creates_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    assert_eq!(store.read(&alice).unwrap(), 0);
    assert!(temp_dir.path().join("alice.trustline").exists());
}

#[test]
fn test_store_read_empty_is_zero() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    fs::write(temp_dir.path().join("alice.trustline"), "").unwrap();
    assert_eq!(store.read(&alice).unwrap(), 0);
}

#[test]
fn test_store_write_then_read() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    for value in [0, 1, -1, 30, -30, i64::MAX, i64::MIN] {
        store.write(&alice, value).unwrap();
        assert_eq!(store.read(&alice).unwrap(), value);
    }
}

#[test]
fn test_store_write_is_plain_decimal() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    store.write(&alice, 1234).unwrap();
    store.write(&alice, -30).unwrap();

    let content = fs::read_to_string(temp_dir.path().join("alice.trustline")).unwrap();
    assert_eq!(content, "-30");
}

#[test]
fn test_store_write_replaces_record_whole() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    fs::write(temp_dir.path().join("alice.trustline"), "123456789").unwrap();
    store.write(&alice, 5).unwrap();

    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("alice.trustline")]);
    assert_eq!(store.read(&alice).unwrap(), 5);
}

#[test]
fn test_store_ensure_keeps_existing_value() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");

    store.write(&alice, 77).unwrap();
    store.ensure(&alice).unwrap();

    assert_eq!(store.read(&alice).unwrap(), 77);
}

#[test]
fn test_store_accepts_trailing_newline() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);

    fs::write(temp_dir.path().join("alice.trustline"), "15\n").unwrap();
    assert_eq!(store.read(&party("alice")).unwrap(), 15);
}

#[test]
fn test_store_corrupt_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);

    fs::write(temp_dir.path().join("alice.trustline"), "abc").unwrap();

    match store.read(&party("alice")) {
        Err(StoreError::CorruptRecord { content, .. }) => assert_eq!(content, "abc"),
        other => panic!("expected CorruptRecord, got {other:?}"),
    }
}

#[test]
fn test_store_custom_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = TrustlineConfig::new()
        .with_directory(temp_dir.path())
        .with_extension("line");
    let store = FileBalanceStore::open(&config).unwrap();

    store.write(&party("alice"), 5).unwrap();
    assert!(temp_dir.path().join("alice.line").exists());
}

#[test]
fn test_store_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");

    let store = FileBalanceStore::open(&TrustlineConfig::new().with_directory(&nested)).unwrap();
    store.write(&party("alice"), 1).unwrap();

    assert_eq!(store.directory(), nested.as_path());

    assert!(nested.join("alice.trustline").exists());
}

#[test]
fn test_store_io_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);

    // a directory squatting on the record path
    fs::create_dir(temp_dir.path().join("alice.trustline")).unwrap();

    assert!(matches!(store.read(&party("alice")), Err(StoreError::Io { .. })));
    assert!(matches!(store.write(&party("alice"), 1), Err(StoreError::Io { .. })));
}

// ============================================================================
// RECORD IDENTITY
// ============================================================================

#[test]
fn test_store_is_record_of_relative_and_absolute() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");
    store.ensure(&alice).unwrap();

    assert!(store.is_record_of(&alice, Path::new("alice.trustline")));
    assert!(store.is_record_of(&alice, &temp_dir.path().join("alice.trustline")));
}

#[test]
fn test_store_is_record_of_rejects_other_files() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");
    let bob = party("bob");
    store.ensure(&alice).unwrap();
    store.ensure(&bob).unwrap();

    assert!(!store.is_record_of(&alice, Path::new("bob.trustline")));
    assert!(!store.is_record_of(&alice, Path::new("alice.trustline.swp")));
    assert!(!store.is_record_of(&alice, Path::new("notes.txt")));
}

#[test]
fn test_store_is_record_of_rejects_same_name_elsewhere() {
    let temp_dir = TempDir::new().unwrap();
    let other_dir = TempDir::new().unwrap();
    let store = open(&temp_dir);
    let alice = party("alice");
    store.ensure(&alice).unwrap();

    let elsewhere = other_dir.path().join("alice.trustline");
    fs::write(&elsewhere, "10").unwrap();

    assert!(!store.is_record_of(&alice, &elsewhere));
}
