use super::*;
use std::io::{Read, Write};
use tempfile::TempDir;

#[test]
fn writer_without_reader_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ok");
    make_fifo(&path).unwrap();

    let err = open_writer(&path).unwrap_err();
    assert!(is_no_reader(&err), "unexpected error: {err}");
}

#[test]
fn writer_reaches_held_reader() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("control");
    make_fifo(&path).unwrap();

    let mut reader = open_reader(&path).unwrap();
    let mut writer = open_writer(&path).unwrap();
    writer.write_all(b"tcu").unwrap();
    drop(writer);

    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"tcu");
}

#[test]
fn missing_path_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = open_writer(&dir.path().join("missing")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!is_no_reader(&err));
}

#[test]
fn make_fifo_refuses_existing_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup");
    make_fifo(&path).unwrap();
    assert!(make_fifo(&path).is_err());
}
