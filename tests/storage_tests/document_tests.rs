//! Tests for the backing Document
//!
//! These tests verify:
//! - Missing and undecodable documents are reported distinctly
//! - Pretty-printed output with the configured indent
//! - Non-ASCII text stored verbatim
//! - Atomic and in-place writes both replace the whole file
//! - Corrupt-document backups

use std::fs;
use std::path::PathBuf;

use shelfkv::config::WriteStrategy;
use shelfkv::record::{Book, Status};
use shelfkv::storage::{encode_books, write_document, Document};
use shelfkv::ShelfError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_document(strategy: WriteStrategy) -> (TempDir, PathBuf, Document) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books.json");
    let document = Document::new(&path, strategy, 4);
    (temp_dir, path, document)
}

fn book(id: u64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Author".to_string(),
        year: 2000,
        status: Status::Available,
    }
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_missing_document() {
    let (_temp, _path, document) = setup_temp_document(WriteStrategy::Atomic);

    assert!(!document.exists());
    match document.load() {
        Err(ShelfError::StoreMissing { path }) => assert_eq!(path, document.path()),
        other => panic!("expected StoreMissing, got {:?}", other),
    }
}

#[test]
fn test_load_directory_is_missing() {
    let temp_dir = TempDir::new().unwrap();
    let document = Document::new(temp_dir.path(), WriteStrategy::Atomic, 4);

    assert!(matches!(document.load(), Err(ShelfError::StoreMissing { .. })));
}

#[test]
fn test_load_garbage_is_decode_error() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);
    fs::write(&path, "not json at all").unwrap();

    assert!(matches!(document.load(), Err(ShelfError::Decode { .. })));
}

#[test]
fn test_load_empty_file_is_decode_error() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);
    fs::write(&path, "").unwrap();

    assert!(matches!(document.load(), Err(ShelfError::Decode { .. })));
}

#[test]
fn test_load_empty_array() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);
    fs::write(&path, "[]").unwrap();

    assert!(document.load().unwrap().is_empty());
}

#[test]
fn test_load_does_not_modify_file() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);
    fs::write(&path, "{ broken").unwrap();

    let _ = document.load();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{ broken");
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_then_load() {
    let (_temp, _path, document) = setup_temp_document(WriteStrategy::Atomic);
    let books = vec![book(1, "One"), book(2, "Two"), book(3, "Three")];

    document.save(&books).unwrap();

    assert_eq!(document.load().unwrap(), books);
}

#[test]
fn test_save_in_place_then_load() {
    let (_temp, _path, document) = setup_temp_document(WriteStrategy::InPlace);
    let books = vec![book(1, "One"), book(2, "Two")];

    document.save(&books).unwrap();
    document.save(&books[..1]).unwrap();

    assert_eq!(document.load().unwrap(), vec![book(1, "One")]);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("books.json");
    let document = Document::new(&path, WriteStrategy::Atomic, 4);

    document.save(&[book(1, "One")]).unwrap();

    assert!(path.is_file());
}

#[test]
fn test_atomic_save_leaves_no_temp_files() {
    let (temp, _path, document) = setup_temp_document(WriteStrategy::Atomic);

    document.save(&[book(1, "One")]).unwrap();
    document.save(&[book(1, "One"), book(2, "Two")]).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["books.json".to_string()]);
}

#[test]
fn test_save_preserves_non_ascii() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);

    document.save(&[book(1, "Мастер и Маргарита")]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Мастер и Маргарита"));
    assert!(!text.contains("\\u"));
}

#[test]
fn test_encode_uses_indent() {
    let bytes = encode_books(&[book(7, "Seven")], 4).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let expected = "[\n    {\n        \"id\": 7,\n        \"title\": \"Seven\",\n        \"author\": \"Author\",\n        \"year\": 2000,\n        \"status\": \"available\"\n    }\n]";
    assert_eq!(text, expected);
}

#[test]
fn test_encode_empty_collection() {
    let bytes = encode_books(&[], 4).unwrap();
    assert_eq!(bytes, b"[]");
}

#[test]
fn test_write_document_replaces_contents() {
    let (_temp, path, _document) = setup_temp_document(WriteStrategy::Atomic);

    write_document(&path, b"first, longer contents", WriteStrategy::InPlace).unwrap();
    write_document(&path, b"second", WriteStrategy::InPlace).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"second");

    write_document(&path, b"third", WriteStrategy::Atomic).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"third");
}

// =============================================================================
// Backup Tests
// =============================================================================

#[test]
fn test_backup_corrupt_copies_contents() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);
    fs::write(&path, "{ broken").unwrap();

    let backup = document.backup_corrupt().unwrap();

    assert_eq!(backup, document.backup_path(0));
    assert!(backup.to_string_lossy().ends_with("books.json.corrupt"));
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ broken");
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ broken");
}

#[test]
fn test_backup_corrupt_keeps_earlier_backups() {
    let (_temp, path, document) = setup_temp_document(WriteStrategy::Atomic);

    fs::write(&path, "first broken").unwrap();
    let first = document.backup_corrupt().unwrap();

    fs::write(&path, "second broken").unwrap();
    let second = document.backup_corrupt().unwrap();

    fs::write(&path, "third broken").unwrap();
    let third = document.backup_corrupt().unwrap();

    assert_eq!(first, document.backup_path(0));
    assert_eq!(second, document.backup_path(1));
    assert_eq!(third, document.backup_path(2));
    assert!(second.to_string_lossy().ends_with("books.json.corrupt.1"));

    assert_eq!(fs::read_to_string(&first).unwrap(), "first broken");
    assert_eq!(fs::read_to_string(&second).unwrap(), "second broken");
    assert_eq!(fs::read_to_string(&third).unwrap(), "third broken");
}
