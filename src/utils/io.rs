//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read file contents as text, replacing invalid UTF-8 sequences.
///
/// Every file is treated as text. Binary content decodes lossily; callers
/// must only write it back when they actually changed something.
pub fn read_file_lossy(path: &Path, operation: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })
}

/// Rename a file or directory.
///
/// A missing source maps to `PathNotFound`; anything else is an IO error.
pub fn rename_path(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| {
        if e.kind() == ErrorKind::NotFound && fs::symlink_metadata(from).is_err() {
            Error::path_not_found(from.display().to_string())
        } else {
            Error::internal_io(
                e.to_string(),
                Some(format!("rename {} → {}", from.display(), to.display())),
            )
        }
    })
}

/// Whether anything (file, directory or dangling symlink) occupies `path`.
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn read_file_lossy_reads_text() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file_lossy(temp.path(), "read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_lossy_tolerates_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0x89, b'P', b'N', b'G', 0xff]).unwrap();

        let content = read_file_lossy(temp.path(), "read").unwrap();
        assert!(content.contains("PNG"));
    }

    #[test]
    fn read_file_lossy_returns_error_for_missing_file() {
        let err = read_file_lossy(Path::new("/nonexistent/path.txt"), "read").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
        assert!(err.details["context"]
            .as_str()
            .unwrap()
            .contains("/nonexistent/path.txt"));
    }

    #[test]
    fn write_file_overwrites_content() {
        let temp = NamedTempFile::new().unwrap();
        write_file(temp.path(), "new content", "write").unwrap();

        assert_eq!(fs::read_to_string(temp.path()).unwrap(), "new content");
    }

    #[test]
    fn write_file_returns_error_for_invalid_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/dir/file.txt");

        let err = write_file(&path, "content", "write").unwrap_err();

        assert_eq!(err.code.as_str(), "internal.io_error");
        assert!(err.details["context"]
            .as_str()
            .unwrap()
            .contains("missing/dir/file.txt"));
    }

    #[test]
    fn rename_path_moves_file() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("a.txt");
        let to = dir.path().join("b.txt");
        fs::write(&from, "x").unwrap();

        rename_path(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }

    #[test]
    fn rename_path_reports_missing_source_as_not_found() {
        let dir = tempdir().unwrap();
        let err = rename_path(&dir.path().join("gone.txt"), &dir.path().join("b.txt")).unwrap_err();

        assert_eq!(err.code.as_str(), "path.not_found");
    }

    #[test]
    fn path_occupied_detects_files_and_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("f"), "").unwrap();

        assert!(path_occupied(&dir.path().join("f")));
        assert!(path_occupied(dir.path()));
        assert!(!path_occupied(&dir.path().join("missing")));
    }
}
