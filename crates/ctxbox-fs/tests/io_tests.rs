use ctxbox_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("deeper").join("state");

    io::write_atomic(&path, b"dev go").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "dev go");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state");

    io::write_atomic(&path, b"x").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_read_text_nonexistent_file() {
    let result = io::read_text(std::path::Path::new("/nonexistent/file.txt"));
    assert!(result.is_err());
}

#[test]
fn test_read_text_if_exists() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("maybe.txt");

    assert!(io::read_text_if_exists(&path).unwrap().is_none());

    fs::write(&path, "here").unwrap();
    assert_eq!(io::read_text_if_exists(&path).unwrap().as_deref(), Some("here"));
}
