//! Checklist progress for a single change.
//!
//! A change's `tasks.md` is a markdown checklist. Every `- [ ]` / `- [x]`
//! line is one task; everything else in the file is ignored.

use crate::error::Result;
use crate::paths;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Completed vs. total checklist items. `completed <= total` always holds
/// for values produced by [`count_tasks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    pub fn is_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            f.write_str("No tasks")
        } else if self.is_complete() {
            f.write_str("✓ Complete")
        } else {
            write!(f, "{}/{} tasks", self.completed, self.total)
        }
    }
}

/// Human-readable status: "No tasks", "✓ Complete", or "2/5 tasks".
pub fn format_status(progress: Progress) -> String {
    progress.to_string()
}

// ---------------------------------------------------------------------------
// Checklist scanning
// ---------------------------------------------------------------------------

static TASK_RE: OnceLock<Regex> = OnceLock::new();

fn task_re() -> &'static Regex {
    TASK_RE.get_or_init(|| Regex::new(r"^[-*]\s+\[([\sxX])\]").unwrap())
}

/// Count checklist items in `content`. Indented (nested) items and
/// anything that is not a list item with a checkbox are skipped.
pub fn count_tasks(content: &str) -> Progress {
    let mut progress = Progress::default();
    for line in content.lines() {
        let Some(caps) = task_re().captures(line) else {
            continue;
        };
        progress.total += 1;
        if caps[1].eq_ignore_ascii_case("x") {
            progress.completed += 1;
        }
    }
    progress
}

/// Progress for `<parent>/<change_id>/tasks.md`.
///
/// A missing checklist is zero tasks. Any other I/O failure (permissions,
/// a directory where the file should be) is returned to the caller.
pub fn progress_for_change(parent: &Path, change_id: &str) -> Result<Progress> {
    let path = paths::tasks_path(parent, change_id);
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(count_tasks(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(change = %change_id, "no tasks.md, treating as zero tasks");
            Ok(Progress::default())
        }
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
