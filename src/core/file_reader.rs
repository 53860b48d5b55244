//! Text file reading
//!
//! Files are read whole and decoded as strict UTF-8. Anything that cannot be
//! decoded (binary data, other encodings) is treated as unreadable rather than
//! converted lossily, so a match is never reported against mangled text.
//! Line endings are normalized: `\r\n` and lone `\r` both become `\n`.

use std::fs;
use std::path::Path;

use crate::core::model::FileAccessError;
use crate::core::paths::normalize_path;

/// Read an entire file as UTF-8 text with newlines normalized
pub fn read_text(path: &Path) -> Result<String, FileAccessError> {
    let bytes = fs::read(path).map_err(|source| FileAccessError::Read {
        path: normalize_path(path),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|source| FileAccessError::Decode {
        path: normalize_path(path),
        source,
    })?;
    Ok(normalize_newlines(text))
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_utf8() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("hello.txt");
        fs::write(&path, "héllo wörld\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "héllo wörld\n");
    }

    #[test]
    fn test_read_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty");
        fs::write(&path, "").unwrap();

        assert_eq!(read_text(&path).unwrap(), "");
    }

    #[test]
    fn test_line_endings_are_normalized() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("dos.txt");
        fs::write(&path, "one\r\ntwo\rthree\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, FileAccessError::Decode { .. }));
        assert!(err.to_string().contains("blob.bin"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("gone.txt");

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, FileAccessError::Read { .. }));
        assert_eq!(err.path(), normalize_path(&path));
    }
}
