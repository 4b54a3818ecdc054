use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const OPENSPEC_DIR: &str = "openspec";
pub const CHANGES_DIR: &str = "openspec/changes";
pub const SPECS_DIR: &str = "openspec/specs";

/// Reserved entry under the changes root; never an active change.
pub const ARCHIVE_DIR_NAME: &str = "archive";

pub const TASKS_FILE: &str = "tasks.md";
pub const SPEC_FILE: &str = "spec.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn changes_dir(root: &Path) -> PathBuf {
    root.join(CHANGES_DIR)
}

pub fn archive_dir(root: &Path) -> PathBuf {
    changes_dir(root).join(ARCHIVE_DIR_NAME)
}

pub fn specs_dir(root: &Path) -> PathBuf {
    root.join(SPECS_DIR)
}

/// Checklist for a change living directly under `parent`
/// (either the changes root or the archive root).
pub fn tasks_path(parent: &Path, change_id: &str) -> PathBuf {
    parent.join(change_id).join(TASKS_FILE)
}

pub fn spec_path(root: &Path, id: &str) -> PathBuf {
    specs_dir(root).join(id).join(SPEC_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
