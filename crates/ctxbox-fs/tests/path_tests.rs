use ctxbox_fs::{CtxPath, canonicalize, find_upwards, resolve_relative};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[rstest]
#[case("", "")]
#[case("Dockerfile", "/work/project/Dockerfile")]
#[case("./docker/Dockerfile", "/work/project/docker/Dockerfile")]
#[case("../shared/Dockerfile", "/work/shared/Dockerfile")]
#[case("/abs/Dockerfile", "/abs/Dockerfile")]
#[case("~/cache", "/home/dev/cache")]
fn test_resolve_relative(#[case] raw: &str, #[case] expected: &str) {
    let resolved = resolve_relative(
        Path::new("/work/project"),
        raw,
        Some(Path::new("/home/dev")),
    );
    assert_eq!(resolved, expected);
}

#[test]
fn test_find_upwards_from_nested_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CtxPath::ConfigFile), "version: 0\n").unwrap();
    let nested = temp.path().join("a").join("b").join("c");
    fs::create_dir_all(&nested).unwrap();

    let found = find_upwards(&nested, CtxPath::ConfigFile).unwrap();

    assert_eq!(found, temp.path().join(".ctxbox.yaml"));
}

#[test]
fn test_find_upwards_prefers_nearest() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CtxPath::ConfigFile), "version: 0\n").unwrap();
    let nested = temp.path().join("inner");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join(CtxPath::ConfigFile), "version: 0\n").unwrap();

    let found = find_upwards(&nested, CtxPath::ConfigFile).unwrap();

    assert_eq!(found, nested.join(".ctxbox.yaml"));
}

#[test]
fn test_find_upwards_ignores_directories_with_same_name() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("x").join("ctxbox-marker-dir")).unwrap();

    let found = find_upwards(&temp.path().join("x"), "ctxbox-marker-dir");

    assert!(found.is_none());
}

#[cfg(unix)]
#[test]
fn test_canonicalize_resolves_symlinks() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("real");
    fs::create_dir_all(real.join("nested")).unwrap();
    std::os::unix::fs::symlink(&real, temp.path().join("link")).unwrap();

    assert_eq!(
        canonicalize(&temp.path().join("link/nested")).unwrap(),
        fs::canonicalize(real.join("nested")).unwrap()
    );
}

#[test]
fn test_canonicalize_missing_path_is_an_error() {
    let temp = TempDir::new().unwrap();
    assert!(canonicalize(&temp.path().join("missing")).is_err());
}
