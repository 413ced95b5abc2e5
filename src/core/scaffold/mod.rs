//! Boilerplate rename: turn the placeholder field into a project's own.
//!
//! Runs strictly in sequence:
//! 1. Build the ordered replacement map from the collected inputs
//! 2. Snapshot the workspace and plan every rename (conflicts abort here)
//! 3. Rename the boilerplate directory, then every matching path
//! 4. Rewrite the contents of every snapshot file at its renamed location

mod renamer;
mod replacements;
mod rewriter;
mod walker;

pub use renamer::{PathRename, RenamePlan, BOILERPLATE_DIR};
pub use replacements::{kebab_case, snake_case, Replacement, ReplacementMap};
pub use rewriter::FileEdit;
pub use walker::{walk, EntryKind, ExclusionSet, FileEntry, Snapshot, TOOL_ENTRY};

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::inputs::FieldInputs;

#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    pub dry_run: bool,
}

/// Everything a run did (or would do, for a dry run).
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub workspace: String,
    pub root: PathRename,
    pub replacements: Vec<Replacement>,
    pub renames: Vec<PathRename>,
    pub edits: Vec<FileEdit>,
    pub total_renames: usize,
    pub total_edits: usize,
    pub applied: bool,
}

/// Rename and rewrite the boilerplate under `workspace`.
pub fn run(
    inputs: &FieldInputs,
    workspace: &Path,
    options: &ScaffoldOptions,
) -> Result<ScaffoldReport> {
    let map = ReplacementMap::build(inputs)?;
    let workspace = resolve_workspace(workspace)?;
    let exclusions = ExclusionSet::default();

    let snapshot = walk(&workspace, &exclusions)?;
    let plan = renamer::plan(&workspace, &snapshot, &map)?;

    if options.dry_run {
        let edits = preview_edits(&snapshot, &plan, &map)?;
        return Ok(report(&workspace, &map, plan, edits, false));
    }

    // Exclusions are decided on the pre-rename paths only
    let files = renamed_files(&snapshot, &plan, &map);

    log_status!("rename", "Replacing in file names…");
    renamer::apply(&workspace, &plan)?;

    log_status!("rename", "Replacing in file contents…");
    let edits = rewriter::rewrite_all(&workspace, &files, &map)?;

    log_status!("rename", "Done.");
    Ok(report(&workspace, &map, plan, edits, true))
}

/// Snapshot files at their post-rename paths, sorted.
fn renamed_files(snapshot: &Snapshot, plan: &RenamePlan, map: &ReplacementMap) -> Vec<String> {
    let mut files: Vec<String> = snapshot
        .files()
        .map(|entry| plan.destination_of(&walker::relative_string(&entry.relative), map))
        .collect();
    files.sort();
    files
}

/// Content changes a real run would make, keyed by post-rename path.
fn preview_edits(
    snapshot: &Snapshot,
    plan: &RenamePlan,
    map: &ReplacementMap,
) -> Result<Vec<FileEdit>> {
    let mut edits = Vec::new();

    for entry in snapshot.files() {
        let path = snapshot.root().join(&entry.relative);
        if let Some(replacements) = rewriter::preview_file(&path, map)? {
            let relative = walker::relative_string(&entry.relative);
            edits.push(FileEdit {
                file: plan.destination_of(&relative, map),
                replacements,
            });
        }
    }

    edits.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(edits)
}

fn resolve_workspace(workspace: &Path) -> Result<PathBuf> {
    if !workspace.is_dir() {
        return Err(Error::path_not_found(workspace.display().to_string()));
    }
    workspace.canonicalize().map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("resolve {}", workspace.display())),
        )
    })
}

fn report(
    workspace: &Path,
    map: &ReplacementMap,
    plan: RenamePlan,
    edits: Vec<FileEdit>,
    applied: bool,
) -> ScaffoldReport {
    ScaffoldReport {
        workspace: workspace.display().to_string(),
        total_renames: plan.renames.len() + usize::from(plan.root.from != plan.root.to),
        total_edits: edits.len(),
        root: plan.root,
        replacements: map.pairs().to_vec(),
        renames: plan.renames,
        edits,
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    const INIT_PHP: &str = "<?php\nadd_action( 'init', 'usm_include_acf_field_imagecropper' );\nfunction usm_include_acf_field_imagecropper() {\n\trequire_once __DIR__ . '/class-usm-acf-field-imagecropper.php';\n\tacf_register_field_type( 'usm_acf_field_imagecropper' );\n}\n";

    const CLASS_PHP: &str = "<?php\nclass usm_acf_field_imagecropper extends \\acf_field {\n\tpublic function __construct() {\n\t\t$this->name = 'imagecropper';\n\t\t$this->label = __( 'image_cropper', 'TEXTDOMAIN' );\n\t}\n}\n";

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture(root: &Path) {
        touch(root, "acf-imagecropper/init.php", INIT_PHP);
        touch(root, "acf-imagecropper/class-usm-acf-field-imagecropper.php", CLASS_PHP);
        touch(root, "README.md", "Rename usm before use.\n");
        touch(root, "node_modules/usm-imagecropper/index.js", "module.exports = 'usm';\n");
        touch(root, ".git/refs/usm-imagecropper", "TEXTDOMAIN\n");
    }

    fn scenario_inputs() -> FieldInputs {
        FieldInputs::new("Amazing Field", "acme", "acme-plugin")
    }

    /// Every path under `root` with its bytes, for byte-for-byte comparisons.
    fn tree_state(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        fn collect(dir: &Path, root: &Path, out: &mut BTreeMap<PathBuf, Option<Vec<u8>>>) {
            for entry in fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                if path.is_dir() {
                    out.insert(relative, None);
                    collect(&path, root, out);
                } else {
                    out.insert(relative, Some(fs::read(&path).unwrap()));
                }
            }
        }
        let mut out = BTreeMap::new();
        collect(root, root, &mut out);
        out
    }

    fn all_paths(root: &Path) -> Vec<String> {
        tree_state(root)
            .keys()
            .map(|p| p.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn renames_and_rewrites_the_boilerplate() {
        let dir = tempdir().unwrap();
        fixture(dir.path());

        let report = run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap();

        let root = dir.path().join("acf-amazing-field");
        let class_file = root.join("class-acme-acf-field-amazing_field.php");
        assert!(class_file.is_file());

        let class_content = fs::read_to_string(&class_file).unwrap();
        assert!(class_content.contains("acme_acf_field_amazing_field"));
        assert!(class_content.contains("'acme-plugin'"));
        assert!(class_content.contains("__( 'Amazing Field', 'acme-plugin' )"));

        let init = fs::read_to_string(root.join("init.php")).unwrap();
        assert!(init.contains("'/class-acme-acf-field-amazing_field.php'"));
        assert!(init.contains("function acme_include_acf_field_amazing_field()"));

        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "Rename acme before use.\n"
        );

        assert!(report.applied);
        assert_eq!(report.root.to, "acf-amazing-field");
        assert_eq!(report.replacements.len(), 6);
        assert_eq!(report.total_edits, 3);
        assert_eq!(report.total_renames, 2);
    }

    #[test]
    fn excluded_paths_are_never_touched() {
        let dir = tempdir().unwrap();
        fixture(dir.path());

        run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("node_modules/usm-imagecropper/index.js")).unwrap(),
            "module.exports = 'usm';\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(".git/refs/usm-imagecropper")).unwrap(),
            "TEXTDOMAIN\n"
        );
    }

    #[test]
    fn no_path_keeps_the_old_root_name() {
        let dir = tempdir().unwrap();
        fixture(dir.path());
        touch(dir.path(), "acf-imagecropper/assets/js/imagecropper.js", "usm");

        run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap();

        let paths = all_paths(dir.path());
        assert!(paths.iter().all(|p| !p.contains("acf-imagecropper")), "{:?}", paths);
        assert!(dir
            .path()
            .join("acf-amazing-field/assets/js/amazing_field.js")
            .is_file());
    }

    #[test]
    fn empty_prefix_aborts_before_touching_the_tree() {
        let dir = tempdir().unwrap();
        fixture(dir.path());
        let before = tree_state(dir.path());

        let inputs = FieldInputs::new("Amazing Field", "", "acme-plugin");
        let err = run(&inputs, dir.path(), &ScaffoldOptions::default()).unwrap_err();

        assert_eq!(err.code.as_str(), "validation.missing_argument");
        assert_eq!(err.details["args"], serde_json::json!(["prefix"]));
        assert_eq!(tree_state(dir.path()), before);
    }

    #[test]
    fn rename_conflict_leaves_everything_in_place() {
        let dir = tempdir().unwrap();
        fixture(dir.path());
        touch(dir.path(), "acf-imagecropper/imagecropper.php", "<?php // usm\n");
        touch(dir.path(), "acf-imagecropper/amazing_field.php", "<?php // existing\n");
        let before = tree_state(dir.path());

        let err = run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap_err();

        assert_eq!(err.code.as_str(), "rename.conflict");
        assert_eq!(tree_state(dir.path()), before);
        assert!(dir.path().join("acf-imagecropper/imagecropper.php").is_file());
        assert!(!dir.path().join("acf-amazing-field").exists());
    }

    #[test]
    fn missing_boilerplate_is_not_found() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "README.md", "usm");

        let err = run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap_err();

        assert_eq!(err.code.as_str(), "path.not_found");
        assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "usm");
    }

    #[test]
    fn missing_workspace_is_not_found() {
        let dir = tempdir().unwrap();
        let err = run(
            &scenario_inputs(),
            &dir.path().join("nope"),
            &ScaffoldOptions::default(),
        )
        .unwrap_err();

        assert_eq!(err.code.as_str(), "path.not_found");
    }

    #[test]
    fn dry_run_reports_without_mutating() {
        let dir = tempdir().unwrap();
        fixture(dir.path());
        let before = tree_state(dir.path());

        let options = ScaffoldOptions { dry_run: true };
        let report = run(&scenario_inputs(), dir.path(), &options).unwrap();

        assert_eq!(tree_state(dir.path()), before);
        assert!(!report.applied);
        let files: Vec<&str> = report.edits.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(
            files,
            vec![
                "README.md",
                "acf-amazing-field/class-acme-acf-field-amazing_field.php",
                "acf-amazing-field/init.php",
            ]
        );
        assert_eq!(
            report.renames[0].to,
            "acf-amazing-field/class-acme-acf-field-amazing_field.php"
        );
    }

    #[test]
    fn dry_run_matches_real_run() {
        let dry_dir = tempdir().unwrap();
        let real_dir = tempdir().unwrap();
        fixture(dry_dir.path());
        fixture(real_dir.path());

        let preview = run(
            &scenario_inputs(),
            dry_dir.path(),
            &ScaffoldOptions { dry_run: true },
        )
        .unwrap();
        let applied =
            run(&scenario_inputs(), real_dir.path(), &ScaffoldOptions::default()).unwrap();

        assert_eq!(preview.renames, applied.renames);
        assert_eq!(preview.edits, applied.edits);
    }

    #[test]
    fn label_resembling_tool_name_is_still_rewritten() {
        let dry_dir = tempdir().unwrap();
        let real_dir = tempdir().unwrap();
        for dir in [&dry_dir, &real_dir] {
            touch(
                dir.path(),
                "acf-imagecropper/class-usm-acf-field-imagecropper.php",
                "usm_acf_field_imagecropper TEXTDOMAIN",
            );
        }
        let inputs = FieldInputs::new("Rename Field", "acme", "acme-plugin");

        let preview = run(&inputs, dry_dir.path(), &ScaffoldOptions { dry_run: true }).unwrap();
        let applied = run(&inputs, real_dir.path(), &ScaffoldOptions::default()).unwrap();

        assert_eq!(applied.root.to, "acf-rename-field");
        let class_file = real_dir
            .path()
            .join("acf-rename-field/class-acme-acf-field-rename_field.php");
        assert_eq!(
            fs::read_to_string(class_file).unwrap(),
            "acme_acf_field_rename_field acme-plugin"
        );
        assert_eq!(applied.total_edits, 1);
        assert_eq!(preview.edits, applied.edits);
    }

    #[test]
    fn second_run_needs_a_fresh_copy() {
        let dir = tempdir().unwrap();
        fixture(dir.path());

        run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap();
        let after_first = tree_state(dir.path());
        let err = run(&scenario_inputs(), dir.path(), &ScaffoldOptions::default()).unwrap_err();

        assert_eq!(err.code.as_str(), "path.not_found");
        assert_eq!(tree_state(dir.path()), after_first);
    }
}
