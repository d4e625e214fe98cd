use std::fs;

use crate::Error;
use crate::output::write_class_file;

#[test]
fn writes_named_class_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_class_file(dir.path(), "Hello", &[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();

    assert_eq!(path, dir.path().join("Hello.class"));
    assert_eq!(fs::read(&path).unwrap(), [0xCA, 0xFE, 0xBA, 0xBE]);
}

#[test]
fn replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Hello.class"), b"stale contents").unwrap();

    let path = write_class_file(dir.path(), "Hello", &[1, 2, 3]).unwrap();

    assert_eq!(fs::read(path).unwrap(), [1, 2, 3]);
}

#[test]
fn leaves_no_temporary_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    write_class_file(dir.path(), "Hello", &[0]).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, ["Hello.class"]);
}

#[test]
fn missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = write_class_file(&missing, "Hello", &[0]).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, missing.join("Hello.class")),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(!missing.exists());
}
