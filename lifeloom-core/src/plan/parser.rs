//! Weekly plan markdown parser
//!
//! Model output only loosely follows the requested format, so parsing is
//! best-effort and never fails. Headings are matched in tiers (strict, then
//! lenient) and when no week yields any task the whole document is salvaged
//! into a single fallback week.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Title given to the synthetic week produced by the whole-document fallback
pub const FALLBACK_TITLE: &str = "General Plan Outline";

/// A single week of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecord {
    /// Week title, e.g. "Week 3: Build momentum"
    pub title: String,
    /// Tasks in order of appearance; never empty
    pub tasks: Vec<String>,
}

impl WeekRecord {
    /// Create a week record
    pub fn new(title: impl Into<String>, tasks: Vec<String>) -> Self {
        Self {
            title: title.into(),
            tasks,
        }
    }

    /// Whether this is the synthetic record produced by the fallback pass
    pub fn is_fallback(&self) -> bool {
        self.title == FALLBACK_TITLE
    }
}

/// Parsed plan: weeks in order of appearance
pub type ParsedPlan = Vec<WeekRecord>;

/// Start of a week section: `## Week <n>` at the beginning of a line
fn section_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^## Week \d+").expect("valid regex"))
}

/// `## Week <n>` optionally followed by a colon or whitespace and a title
fn strict_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^## (Week \d+(?:[:\s].*)?)$").expect("valid regex"))
}

/// Bare `## Week <n>`, ignoring whatever follows
fn lenient_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^## (Week \d+)").expect("valid regex"))
}

/// Parse model-generated markdown into weeks
///
/// Never fails. Returns an empty plan only when the input has no usable
/// lines at all.
pub fn parse_plan(markdown: &str) -> ParsedPlan {
    let mut plan: ParsedPlan = split_sections(markdown)
        .into_iter()
        .filter_map(|section| parse_section(&section))
        .collect();

    if plan.is_empty() && !markdown.is_empty() {
        if let Some(week) = fallback_week(markdown) {
            debug!(
                tasks = week.tasks.len(),
                "No week headings parsed, using fallback"
            );
            plan.push(week);
        }
    }

    debug!(weeks = plan.len(), "Parsed plan");
    plan
}

/// Split the text into sections that each start at a week heading line
///
/// Anything before the first heading is dropped.
fn split_sections(markdown: &str) -> Vec<Vec<&str>> {
    let mut sections: Vec<Vec<&str>> = Vec::new();

    for line in markdown.lines() {
        if section_start().is_match(line) {
            sections.push(vec![line]);
        } else if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }

    sections
}

/// Turn one section into a week, or `None` if it has no title or no tasks
fn parse_section(lines: &[&str]) -> Option<WeekRecord> {
    let (heading, body) = lines.split_first()?;

    let Some(title) = parse_title(heading.trim_end()) else {
        debug!(heading = %heading, "Skipping unrecognized week heading");
        return None;
    };

    let tasks: Vec<String> = body.iter().filter_map(|line| parse_task(line)).collect();

    if tasks.is_empty() {
        debug!(title = %title, "Dropping week without tasks");
        return None;
    }

    Some(WeekRecord::new(title, tasks))
}

/// Extract the week title, trying the strict pattern before the lenient one
fn parse_title(heading: &str) -> Option<String> {
    strict_heading()
        .captures(heading)
        .or_else(|| lenient_heading().captures(heading))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Classify a single body line
///
/// Bullets (`* `, `- `, `+ `) and numbered items (`1.`) lose their two-char
/// marker. Any other non-empty line that is not a heading is kept as-is.
fn parse_task(line: &str) -> Option<String> {
    let line = line.trim();

    if line.is_empty() {
        return None;
    }

    let task = if is_bullet(line) || is_numbered(line) {
        // markers are ASCII, so byte 2 is a char boundary
        line[2..].trim()
    } else if line.starts_with('#') {
        return None;
    } else {
        line
    };

    if task.is_empty() {
        None
    } else {
        Some(task.to_string())
    }
}

fn is_bullet(line: &str) -> bool {
    ["* ", "- ", "+ "]
        .iter()
        .any(|marker| line.starts_with(marker))
}

fn is_numbered(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_digit() && bytes[1] == b'.'
}

/// Salvage every non-heading line of the whole document into one week
///
/// Only lines with `#` in the first column count as headings here; an
/// indented `#` line is kept, trimmed.
fn fallback_week(markdown: &str) -> Option<WeekRecord> {
    let tasks: Vec<String> = markdown
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if tasks.is_empty() {
        None
    } else {
        Some(WeekRecord::new(FALLBACK_TITLE, tasks))
    }
}
