// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-file reads and writes, with failures mapped onto [`Error`].

use std::fs;
use std::path::Path;

use crate::error::{Action, Error};

/// Rejects paths the file system would misreport.
///
/// An empty path surfaces as "not found" and an interior NUL as a generic
/// invalid input, both of which are really malformed paths.
fn check_path(path: &Path, action: Action) -> Result<(), Error> {
    let raw = path.as_os_str();
    if raw.is_empty() || raw.as_encoded_bytes().contains(&0) {
        return Err(Error::InvalidPath {
            action,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads the document at `path` as UTF-8 text.
pub(crate) fn read_text(path: &Path) -> Result<String, Error> {
    check_path(path, Action::Open)?;
    let bytes = fs::read(path).map_err(|source| Error::io(Action::Open, path, source))?;
    String::from_utf8(bytes).map_err(|source| Error::NotText {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to `path`, replacing what was there.
///
/// Callers produce the complete contents before calling this, so an encoding
/// failure never leaves a truncated file behind.
pub(crate) fn write_bytes(path: &Path, contents: &[u8], action: Action) -> Result<(), Error> {
    check_path(path, action)?;
    fs::write(path, contents).map_err(|source| Error::io(action, path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn empty_path_is_invalid() {
        let error = write_bytes(Path::new(""), b"M 0 0", Action::Save).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidPath);
        assert_eq!(error.action(), Action::Save);
    }

    #[test]
    fn nul_in_path_is_invalid() {
        let error = read_text(Path::new("bad\0name.icdw")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_text(&dir.path().join("missing.icdw")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IoFailure);
        assert_eq!(error.action(), Action::Open);
    }

    #[test]
    fn binary_content_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.icdw");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let error = read_text(&path).unwrap_err();
        assert!(matches!(error, Error::NotText { .. }));
        assert_eq!(error.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.icdw");
        write_bytes(&path, "M 0 0 L 1 1".as_bytes(), Action::Save).unwrap();
        assert_eq!(read_text(&path).unwrap(), "M 0 0 L 1 1");
    }
}
