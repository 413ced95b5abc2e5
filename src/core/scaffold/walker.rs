//! Snapshot walk of the workspace tree.
//!
//! The walk is fully materialized before anything is renamed or rewritten.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Binary name of this tool; the tool never rewrites itself.
pub const TOOL_ENTRY: &str = "acf-rename";

/// Path fragments that are never renamed or rewritten.
const EXCLUDED_FRAGMENTS: &[&str] = &["node_modules", ".git", "package-lock", TOOL_ENTRY];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    fragments: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::from_fragments(EXCLUDED_FRAGMENTS)
    }
}

impl ExclusionSet {
    pub fn from_fragments(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// A path is excluded when its workspace-relative form contains any fragment.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let normalized = relative_string(relative);
        self.fragments
            .iter()
            .any(|fragment| normalized.contains(fragment.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// A path discovered by one walk, relative to the walked root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub relative: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
    entries: Vec<FileEntry>,
}

impl Snapshot {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Regular files only; these are the content rewrite candidates.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::File)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walk `root` recursively and return every non-excluded entry, sorted by path.
pub fn walk(root: &Path, exclusions: &ExclusionSet) -> Result<Snapshot> {
    let mut entries = Vec::new();
    walk_recursive(root, root, exclusions, &mut entries)?;
    entries.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(Snapshot {
        root: root.to_path_buf(),
        entries,
    })
}

fn walk_recursive(
    dir: &Path,
    root: &Path,
    exclusions: &ExclusionSet,
    entries: &mut Vec<FileEntry>,
) -> Result<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
    })?;

    for entry in read_dir {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
        })?;
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();

        if exclusions.is_excluded(&relative) {
            continue;
        }

        // file_type() does not follow symlinks
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("stat {}", path.display())))
        })?;

        if file_type.is_dir() {
            entries.push(FileEntry {
                relative,
                kind: EntryKind::Dir,
            });
            walk_recursive(&path, root, exclusions, entries)?;
        } else if file_type.is_symlink() {
            entries.push(FileEntry {
                relative,
                kind: EntryKind::Symlink,
            });
        } else {
            entries.push(FileEntry {
                relative,
                kind: EntryKind::File,
            });
        }
    }

    Ok(())
}

/// Render a relative path with `/` separators on every platform.
pub fn relative_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
