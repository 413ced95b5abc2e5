//! Rename phase: the boilerplate directory first, then every matching path.
//!
//! Planning checks every destination before anything moves, so a conflict
//! aborts the run with the tree untouched.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::replacements::ReplacementMap;
use super::walker::{relative_string, EntryKind, Snapshot};
use crate::error::{Error, Result};
use crate::utils::io;

/// Directory name of the boilerplate inside the workspace.
pub const BOILERPLATE_DIR: &str = "acf-imagecropper";

/// A single planned rename, as workspace-relative `/`-separated paths.
///
/// `from` already reflects the boilerplate directory rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRename {
    pub from: String,
    pub to: String,
    pub kind: EntryKind,
}

impl PathRename {
    fn depth(&self) -> usize {
        self.from.split('/').count()
    }

    fn old_name(&self) -> &str {
        last_segment(&self.from)
    }

    /// Final segment of the destination.
    fn new_name(&self) -> &str {
        last_segment(&self.to)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    pub root: PathRename,
    pub renames: Vec<PathRename>,
}

impl RenamePlan {
    /// Map a pre-rename relative path to where the rename phase leaves it.
    pub fn destination_of(&self, relative: &str, map: &ReplacementMap) -> String {
        destination(relative, &self.root.from, &self.root.to, map)
    }
}

/// Compute every rename and verify no destination is occupied.
pub fn plan(workspace: &Path, snapshot: &Snapshot, map: &ReplacementMap) -> Result<RenamePlan> {
    let boilerplate = workspace.join(BOILERPLATE_DIR);
    if !boilerplate.is_dir() {
        return Err(Error::path_not_found(boilerplate.display().to_string())
            .with_hint(format!("Could not find the {} folder", BOILERPLATE_DIR))
            .with_hint("You can only rename a fresh copy of the repo"));
    }

    let root_to = map.apply_directory(BOILERPLATE_DIR);
    if root_to != BOILERPLATE_DIR && io::path_occupied(&workspace.join(&root_to)) {
        return Err(Error::rename_conflict(BOILERPLATE_DIR, root_to));
    }

    let mut renames = Vec::new();
    let mut targets: HashSet<String> = HashSet::new();

    for entry in snapshot.entries() {
        let original = relative_string(&entry.relative);
        if original == BOILERPLATE_DIR {
            continue;
        }
        let current = rebase(&original, BOILERPLATE_DIR, &root_to);
        let target = destination(&original, BOILERPLATE_DIR, &root_to, map);
        if target == current {
            continue;
        }

        let rename = PathRename {
            from: current,
            to: target,
            kind: entry.kind,
        };

        // Only moved along with a renamed ancestor
        if rename.old_name() == rename.new_name() {
            continue;
        }

        // Parents are untouched when this entry moves (deepest first), so the
        // destination is the sibling of the entry's on-disk path right now.
        let sibling = sibling_path(&entry.relative, rename.new_name());
        if io::path_occupied(&workspace.join(&sibling)) || !targets.insert(rename.to.clone()) {
            return Err(Error::rename_conflict(rename.from, rename.to));
        }

        renames.push(rename);
    }

    Ok(RenamePlan {
        root: PathRename {
            from: BOILERPLATE_DIR.to_string(),
            to: root_to,
            kind: EntryKind::Dir,
        },
        renames,
    })
}

/// Execute a plan. Returns the number of paths moved, root included.
pub fn apply(workspace: &Path, plan: &RenamePlan) -> Result<usize> {
    let mut moved = 0;

    if plan.root.from != plan.root.to {
        let from = workspace.join(&plan.root.from);
        let to = workspace.join(&plan.root.to);
        if io::path_occupied(&to) {
            return Err(Error::rename_conflict(&plan.root.from, &plan.root.to));
        }
        io::rename_path(&from, &to)?;
        log_status!("rename", "{} → {}", plan.root.from, plan.root.to);
        moved += 1;
    }

    // Children before parents, so every source path is still valid when reached
    let mut ordered: Vec<&PathRename> = plan.renames.iter().collect();
    ordered.sort_by(|a, b| b.depth().cmp(&a.depth()));

    for rename in ordered {
        let from = workspace.join(&rename.from);
        let to = from
            .parent()
            .map(|parent| parent.join(rename.new_name()))
            .unwrap_or_else(|| workspace.join(rename.new_name()));

        if !io::path_occupied(&from) {
            return Err(Error::path_not_found(from.display().to_string()));
        }
        if io::path_occupied(&to) {
            return Err(Error::rename_conflict(&rename.from, &rename.to));
        }

        io::rename_path(&from, &to)?;
        log_status!("rename", "{} → {}", rename.from, rename.to);
        moved += 1;
    }

    Ok(moved)
}

/// Swap a leading directory segment for its renamed form.
fn rebase(relative: &str, from: &str, to: &str) -> String {
    if relative == from {
        return to.to_string();
    }
    match relative.strip_prefix(from).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) => format!("{}/{}", to, rest),
        None => relative.to_string(),
    }
}

/// Where `relative` ends up once the root is renamed and the map applied.
///
/// The renamed root segment is never fed through the map again.
fn destination(
    relative: &str,
    root_from: &str,
    root_to: &str,
    map: &ReplacementMap,
) -> String {
    if relative == root_from {
        return root_to.to_string();
    }
    match relative
        .strip_prefix(root_from)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(rest) => format!("{}/{}", root_to, map.apply(rest)),
        None => map.apply(relative),
    }
}

fn last_segment(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

fn sibling_path(relative: &Path, name: &str) -> PathBuf {
    match relative.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}
