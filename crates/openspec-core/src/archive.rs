//! Archive directory naming: `YYYY-MM-DD-<change-name>`.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveName {
    /// Zero-padded `YYYY-MM-DD` prefix. Not validated as a calendar date.
    pub date: String,
    pub name: String,
}

static ARCHIVE_RE: OnceLock<Regex> = OnceLock::new();

fn archive_re() -> &'static Regex {
    ARCHIVE_RE.get_or_init(|| Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})-(.+)$").unwrap())
}

/// Split an archive directory name into date and change name.
/// Returns `None` for anything not shaped like `YYYY-MM-DD-<name>`.
pub fn parse_archive_name(dir_name: &str) -> Option<ArchiveName> {
    let caps = archive_re().captures(dir_name)?;
    Some(ArchiveName {
        date: caps[1].to_string(),
        name: caps[2].to_string(),
    })
}
