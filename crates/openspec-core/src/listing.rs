//! Listing reports for the three views of an OpenSpec workspace:
//! active changes, specs, and archived changes.
//!
//! Every view is collected completely before anything is rendered, so a
//! failing scan never leaves a half-printed table behind.

use crate::archive::parse_archive_name;
use crate::error::{OpenSpecError, Result};
use crate::paths;
use crate::progress::{format_status, progress_for_change, Progress};
use crate::spec::requirement_count;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::Path;

const INDENT: &str = "  ";
const GAP: &str = "   ";
const DATE_WIDTH: usize = 10;

pub const NO_ACTIVE_CHANGES: &str = "No active changes found.";
pub const NO_SPECS: &str = "No specs found.";
pub const NO_ARCHIVED_CHANGES: &str = "No archived changes found.";

// ---------------------------------------------------------------------------
// ListMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMode {
    #[default]
    Changes,
    Specs,
    Archive,
}

impl ListMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ListMode::Changes => "changes",
            ListMode::Specs => "specs",
            ListMode::Archive => "archive",
        }
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListMode {
    type Err = OpenSpecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "changes" => Ok(ListMode::Changes),
            "specs" => Ok(ListMode::Specs),
            "archive" => Ok(ListMode::Archive),
            _ => Err(OpenSpecError::InvalidListMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub name: String,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

impl ChangeRecord {
    pub fn progress(&self) -> Progress {
        Progress::new(self.completed_tasks, self.total_tasks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivedChangeRecord {
    pub archive_date: String,
    pub change_name: String,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

impl ArchivedChangeRecord {
    pub fn progress(&self) -> Progress {
        Progress::new(self.completed_tasks, self.total_tasks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecRecord {
    pub id: String,
    pub requirement_count: usize,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Root-locale collator at tertiary strength: accents and case only break
/// ties between otherwise equal names.
fn name_collator() -> Result<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(&Default::default(), options)
        .map_err(|e| OpenSpecError::Collation(format!("{e:?}")))
}

/// Sort `items` ascending by the locale-aware order of `name`.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) -> Result<()> {
    let collator = name_collator()?;
    items.sort_by(|a, b| collator.compare(name(a), name(b)));
    Ok(())
}

/// Newest archive date first. Equal dates keep their input order.
pub fn sort_archived(archived: &mut [ArchivedChangeRecord]) {
    archived.sort_by(|a, b| b.archive_date.cmp(&a.archive_date));
}

// ---------------------------------------------------------------------------
// Directory enumeration
// ---------------------------------------------------------------------------

/// Names of the immediate subdirectories of `dir`, in enumeration order.
fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

// ---------------------------------------------------------------------------
// Collectors
// ---------------------------------------------------------------------------

/// Active changes under `openspec/changes/`, sorted by name.
///
/// Unlike the other views, a missing changes root is an error: an
/// initialized workspace always has one.
pub fn collect_changes(root: &Path) -> Result<Vec<ChangeRecord>> {
    let changes_dir = paths::changes_dir(root);
    if !changes_dir.exists() {
        return Err(OpenSpecError::NoChangesDirectory);
    }

    let mut changes = Vec::new();
    for name in subdirectories(&changes_dir)? {
        if name == paths::ARCHIVE_DIR_NAME {
            continue;
        }
        let progress = progress_for_change(&changes_dir, &name)?;
        changes.push(ChangeRecord {
            name,
            completed_tasks: progress.completed,
            total_tasks: progress.total,
        });
    }

    sort_by_name(&mut changes, |c| c.name.as_str())?;
    tracing::debug!(count = changes.len(), "collected active changes");
    Ok(changes)
}

/// Specs under `openspec/specs/`, sorted by id. A missing specs root is
/// simply an empty list.
pub fn collect_specs(root: &Path) -> Result<Vec<SpecRecord>> {
    let specs_dir = paths::specs_dir(root);
    if !specs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut specs: Vec<SpecRecord> = subdirectories(&specs_dir)?
        .into_iter()
        .map(|id| SpecRecord {
            requirement_count: requirement_count(root, &id),
            id,
        })
        .collect();

    sort_by_name(&mut specs, |s| s.id.as_str())?;
    tracing::debug!(count = specs.len(), "collected specs");
    Ok(specs)
}

/// Archived changes under `openspec/changes/archive/`, newest first.
///
/// Directories not named `YYYY-MM-DD-<name>` are skipped. Entries with the
/// same date keep their enumeration order.
pub fn collect_archived(root: &Path) -> Result<Vec<ArchivedChangeRecord>> {
    let archive_dir = paths::archive_dir(root);
    if !archive_dir.exists() {
        return Ok(Vec::new());
    }

    let mut archived = Vec::new();
    for dir_name in subdirectories(&archive_dir)? {
        let Some(parsed) = parse_archive_name(&dir_name) else {
            tracing::debug!(dir = %dir_name, "skipping archive entry without a date prefix");
            continue;
        };
        let progress = progress_for_change(&archive_dir, &dir_name)?;
        archived.push(ArchivedChangeRecord {
            archive_date: parsed.date,
            change_name: parsed.name,
            completed_tasks: progress.completed,
            total_tasks: progress.total,
        });
    }

    sort_archived(&mut archived);
    tracing::debug!(count = archived.len(), "collected archived changes");
    Ok(archived)
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A fully collected view, ready to render as text or serialize as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Listing {
    Changes(Vec<ChangeRecord>),
    Specs(Vec<SpecRecord>),
    Archive(Vec<ArchivedChangeRecord>),
}

impl Listing {
    pub fn collect(root: &Path, mode: ListMode) -> Result<Self> {
        match mode {
            ListMode::Changes => collect_changes(root).map(Listing::Changes),
            ListMode::Specs => collect_specs(root).map(Listing::Specs),
            ListMode::Archive => collect_archived(root).map(Listing::Archive),
        }
    }

    /// Rendered report lines. An empty view is a single informational line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Listing::Changes(changes) => render_changes(changes),
            Listing::Specs(specs) => render_specs(specs),
            Listing::Archive(archived) => render_archived(archived),
        }
    }
}

fn width_of<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn render_changes(changes: &[ChangeRecord]) -> Vec<String> {
    if changes.is_empty() {
        return vec![NO_ACTIVE_CHANGES.to_string()];
    }
    let width = width_of(changes.iter().map(|c| c.name.as_str()));
    let mut lines = vec!["Changes:".to_string()];
    lines.extend(changes.iter().map(|c| {
        format!("{INDENT}{:<width$}{GAP}{}", c.name, format_status(c.progress()))
    }));
    lines
}

fn render_specs(specs: &[SpecRecord]) -> Vec<String> {
    if specs.is_empty() {
        return vec![NO_SPECS.to_string()];
    }
    let width = width_of(specs.iter().map(|s| s.id.as_str()));
    let mut lines = vec!["Specs:".to_string()];
    lines.extend(specs.iter().map(|s| {
        format!("{INDENT}{:<width$}{GAP}requirements {}", s.id, s.requirement_count)
    }));
    lines
}

fn render_archived(archived: &[ArchivedChangeRecord]) -> Vec<String> {
    if archived.is_empty() {
        return vec![NO_ARCHIVED_CHANGES.to_string()];
    }
    let width = width_of(archived.iter().map(|c| c.change_name.as_str()));
    let mut lines = vec!["Archived Changes:".to_string()];
    lines.extend(archived.iter().map(|c| {
        format!(
            "{INDENT}{:<DATE_WIDTH$}  {:<width$}{GAP}{}",
            c.archive_date,
            c.change_name,
            format_status(c.progress())
        )
    }));
    lines
}

/// Collect the `mode` view of the workspace at `root` and write the report
/// to `out`. Nothing is written if collection fails.
pub fn list(root: &Path, mode: ListMode, out: &mut impl Write) -> Result<()> {
    let listing = Listing::collect(root, mode)?;
    for line in listing.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
