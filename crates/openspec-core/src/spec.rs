//! Minimal parser for `openspec/specs/<id>/spec.md`.
//!
//! A spec is a markdown document with a `## Purpose` section and a
//! `## Requirements` section. Each `###` header under Requirements is one
//! requirement; each `####` header under a requirement is one scenario.

use crate::error::{OpenSpecError, Result};
use crate::paths;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub text: String,
    pub scenarios: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spec {
    pub id: String,
    pub title: String,
    pub purpose: String,
    pub requirements: Vec<Requirement>,
}

// ---------------------------------------------------------------------------
// Section scanning
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Section<'a> {
    level: usize,
    title: &'a str,
    body: Vec<&'a str>,
}

static HEADER_RE: OnceLock<Regex> = OnceLock::new();

fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+#+)?\s*$").unwrap())
}

/// Flatten the document into header-delimited sections, in order.
/// Lines before the first header are dropped.
fn sections(content: &str) -> Vec<Section<'_>> {
    let mut out: Vec<Section<'_>> = Vec::new();
    let mut in_fence = false;
    for line in content.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        if !in_fence {
            if let Some(caps) = header_re().captures(line) {
                let (Some(hashes), Some(title)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                out.push(Section {
                    level: hashes.as_str().len(),
                    title: title.as_str(),
                    body: Vec::new(),
                });
                continue;
            }
        }
        if let Some(current) = out.last_mut() {
            current.body.push(line);
        }
    }
    out
}

fn strip_label<'a>(title: &'a str, label: &str) -> &'a str {
    match title.get(..label.len()) {
        Some(head) if head.eq_ignore_ascii_case(label) => title[label.len()..].trim(),
        _ => title.trim(),
    }
}

fn invalid(id: &str, reason: &str) -> OpenSpecError {
    OpenSpecError::InvalidSpec {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

pub fn parse_spec(content: &str, id: &str) -> Result<Spec> {
    let sections = sections(content);

    let find_top = |name: &str| {
        sections
            .iter()
            .position(|s| s.level == 2 && s.title.eq_ignore_ascii_case(name))
    };

    let purpose_idx = find_top("Purpose").ok_or_else(|| invalid(id, "missing Purpose section"))?;
    let req_idx =
        find_top("Requirements").ok_or_else(|| invalid(id, "missing Requirements section"))?;

    let title = sections
        .iter()
        .find(|s| s.level == 1)
        .map(|s| s.title.trim().to_string())
        .unwrap_or_else(|| id.to_string());

    let purpose = sections[purpose_idx].body.join("\n").trim().to_string();

    let mut requirements: Vec<Requirement> = Vec::new();
    for section in sections[req_idx + 1..].iter().take_while(|s| s.level > 2) {
        match section.level {
            3 => requirements.push(Requirement {
                text: strip_label(section.title, "Requirement:").to_string(),
                scenarios: Vec::new(),
            }),
            4 => {
                if let Some(req) = requirements.last_mut() {
                    req.scenarios
                        .push(strip_label(section.title, "Scenario:").to_string());
                }
            }
            _ => {}
        }
    }

    Ok(Spec {
        id: id.to_string(),
        title,
        purpose,
        requirements,
    })
}

/// Number of requirements in `openspec/specs/<id>/spec.md`.
///
/// Unreadable or malformed specs count as zero requirements.
pub fn requirement_count(root: &Path, id: &str) -> usize {
    let path = paths::spec_path(root, id);
    let parsed = std::fs::read_to_string(&path)
        .map_err(OpenSpecError::from)
        .and_then(|content| parse_spec(&content, id));
    match parsed {
        Ok(spec) => spec.requirements.len(),
        Err(e) => {
            tracing::debug!(spec = %id, error = %e, "spec unreadable, reporting 0 requirements");
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
