//! Content rewrite phase.
//!
//! Every regular file is treated as text; there is no binary detection. A
//! binary file is only written back if a placeholder occurred in it.

use serde::Serialize;
use std::path::Path;

use super::replacements::ReplacementMap;
use crate::error::Result;
use crate::utils::io;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEdit {
    /// Workspace-relative path, after the rename phase.
    pub file: String,
    pub replacements: usize,
}

/// Rewrite one file in place. Returns the replacement count, or `None` when
/// the content did not change and nothing was written.
pub fn rewrite_file(path: &Path, map: &ReplacementMap) -> Result<Option<usize>> {
    let content = io::read_file_lossy(path, "read")?;
    let (new_content, count) = map.apply_counted(&content);

    if new_content == content {
        return Ok(None);
    }

    io::write_file(path, &new_content, "write")?;
    Ok(Some(count))
}

/// Count what [`rewrite_file`] would replace, without writing.
pub fn preview_file(path: &Path, map: &ReplacementMap) -> Result<Option<usize>> {
    let content = io::read_file_lossy(path, "read")?;
    let (new_content, count) = map.apply_counted(&content);

    Ok((new_content != content).then_some(count))
}

/// Rewrite each listed file under `root`, stopping at the first failure.
///
/// `files` are workspace-relative paths as they exist after the rename phase.
pub fn rewrite_all(
    root: &Path,
    files: &[String],
    map: &ReplacementMap,
) -> Result<Vec<FileEdit>> {
    let mut edits = Vec::new();

    for file in files {
        if let Some(replacements) = rewrite_file(&root.join(file), map)? {
            edits.push(FileEdit {
                file: file.clone(),
                replacements,
            });
        }
    }

    Ok(edits)
}
