//! Mapping of client supplied file names onto the served directory.

use std::path::{Component, Path, PathBuf};

#[cfg(unix)]
use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::ffi::OsStringExt;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("invalid percent-encoding")]
    BadEncoding,
    #[error("absolute paths are not allowed")]
    Absolute,
    #[error("path escapes the base directory")]
    Escapes,
}

/// Decodes `%XX` escapes in a path segment into raw bytes.
///
/// Every `%` must be followed by two hex digits. A `+` is left as is.
pub fn percent_decode(segment: &str) -> Result<Vec<u8>, PathError> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
            let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                _ => return Err(PathError::BadEncoding),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(out)
}

/// Turns decoded name bytes into a relative path.
///
/// Unix file names are arbitrary bytes and are taken as they are. Elsewhere
/// the bytes must be UTF-8.
#[cfg(unix)]
pub fn name_to_path(bytes: Vec<u8>) -> Result<PathBuf, PathError> {
    Ok(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
pub fn name_to_path(bytes: Vec<u8>) -> Result<PathBuf, PathError> {
    String::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| PathError::BadEncoding)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Lexically normalizes a path: drops `.` components and lets `..` remove
/// the previous normal component. `..` never climbs above the root.
///
/// The filesystem is not consulted, so symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Joins `name` onto `base`, refusing any result outside of `base`.
///
/// `base` is expected to be absolute. The base directory itself is an
/// accepted result; reading it as a file fails later on.
pub fn safe_join(base: &Path, name: &Path) -> Result<PathBuf, PathError> {
    if name.is_absolute() || name.has_root() {
        return Err(PathError::Absolute);
    }

    let base = normalize(base);
    let target = normalize(&base.join(name));

    // Path::starts_with compares whole components, so `/srv/data2` does
    // not count as being inside `/srv/data`.
    if target.starts_with(&base) {
        Ok(target)
    } else {
        Err(PathError::Escapes)
    }
}
