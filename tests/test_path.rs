#![cfg(unix)]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use harbor::fs::path::{PathError, name_to_path, percent_decode, safe_join};

const BASE: &str = "/srv/data";

#[test]
fn test_percent_decode_plain_and_escaped() {
    assert_eq!(percent_decode("file.txt").unwrap(), b"file.txt");
    assert_eq!(percent_decode("my%20file.txt").unwrap(), b"my file.txt");
    assert_eq!(percent_decode("%2e%2E").unwrap(), b"..");
    assert_eq!(percent_decode("a+b").unwrap(), b"a+b");
}

#[test]
fn test_percent_decode_keeps_non_utf8_bytes() {
    assert_eq!(percent_decode("%ff").unwrap(), vec![0xff]);
    assert_eq!(percent_decode("a%C3%28").unwrap(), vec![b'a', 0xc3, 0x28]);
}

#[test]
fn test_name_to_path_takes_raw_bytes() {
    let path = name_to_path(vec![b'x', 0xff]).unwrap();
    assert_eq!(path.as_os_str(), OsStr::from_bytes(b"x\xff"));
}

#[test]
fn test_percent_decode_rejects_bad_escapes() {
    assert_eq!(percent_decode("%zz"), Err(PathError::BadEncoding));
    assert_eq!(percent_decode("abc%4"), Err(PathError::BadEncoding));
    assert_eq!(percent_decode("%"), Err(PathError::BadEncoding));
}

#[test]
fn test_safe_join_inside_base() {
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("test.txt")).unwrap(),
        PathBuf::from("/srv/data/test.txt")
    );
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("sub/./x/../y.bin")).unwrap(),
        PathBuf::from("/srv/data/sub/y.bin")
    );
}

#[test]
fn test_safe_join_rejects_absolute() {
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("/etc/passwd")),
        Err(PathError::Absolute)
    );
}

#[test]
fn test_safe_join_rejects_traversal() {
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("../../etc/passwd")),
        Err(PathError::Escapes)
    );
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("sub/../../other")),
        Err(PathError::Escapes)
    );
}

#[test]
fn test_safe_join_rejects_sibling_with_shared_prefix() {
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("../data2/file")),
        Err(PathError::Escapes)
    );
}

#[test]
fn test_safe_join_accepts_base_itself() {
    assert_eq!(safe_join(Path::new(BASE), Path::new("")).unwrap(), PathBuf::from(BASE));
    assert_eq!(safe_join(Path::new(BASE), Path::new(".")).unwrap(), PathBuf::from(BASE));
    assert_eq!(
        safe_join(Path::new(BASE), Path::new("sub/..")).unwrap(),
        PathBuf::from(BASE)
    );
}

#[test]
fn test_safe_join_normalizes_base() {
    assert_eq!(
        safe_join(Path::new("/srv/./data/"), Path::new("f")).unwrap(),
        PathBuf::from("/srv/data/f")
    );
}
