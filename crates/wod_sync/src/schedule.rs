//! Line-oriented parser for the published schedule text.
//!
//! The page repeats blocks of the form: a `####` date header, a blank
//! separator, a `####` location header, a `####` program header, then
//! free-form body lines until the next date header. The separator line is
//! not reliable; see [`parse_block`] for the recovery rule.

use crate::noise;
use regex::Regex;
use std::sync::LazyLock;

static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^####\s*(\d{2}/\d{2}/\d{4})\s*$").expect("date header pattern"));

/// Placeholder program label when the source omits one.
pub const DEFAULT_PROGRAM: &str = "WOD";

/// Whether the block matched the expected header layout or needed the
/// adjacent-line fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderConfidence {
    Exact,
    Recovered,
}

/// One workout record for one date/location/program, as recovered from the
/// source text. `body` is already cleaned: boilerplate removed, no run of
/// three or more blank lines, no leading/trailing whitespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WodEntry {
    /// Date as printed in the source, `DD/MM/YYYY`.
    pub date: String,
    pub location: String,
    pub program: String,
    pub body: String,
    pub confidence: HeaderConfidence,
}

/// Extract entries for every date present in `text`, in source order.
///
/// Input without any date header yields an empty vec; absence is a valid
/// parse result. It is the caller's job to filter by target date and decide
/// whether an empty match is an error.
pub fn parse_schedule(text: &str) -> Vec<WodEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(date) = header_date(lines[i]) else {
            i += 1;
            continue;
        };
        let mut end = i + 1;
        while end < lines.len() && header_date(lines[end]).is_none() {
            end += 1;
        }
        entries.push(parse_block(date, &lines[i..end]));
        i = end;
    }
    entries
}

/// Keep only the entries whose printed date equals `source_date`.
pub fn entries_for_date(entries: &[WodEntry], source_date: &str) -> Vec<WodEntry> {
    entries
        .iter()
        .filter(|e| e.date == source_date)
        .cloned()
        .collect()
}

fn header_date(line: &str) -> Option<&str> {
    DATE_HEADER
        .captures(line.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Parse one block (`block[0]` is the date header line).
///
/// Expected layout puts the location header at offset 2 and the program
/// header at offset 3, with a blank separator at offset 1. When the program
/// slot is missing or not a header line the layout has shifted by one (or the
/// block is short): fall back to the adjacent lines, offsets 1 and 2, and
/// mark the entry as recovered. The fallback covers a one-line shift only;
/// deeper misalignment still yields an entry, with whatever those lines hold.
fn parse_block(date: &str, block: &[&str]) -> WodEntry {
    let exact = block.get(3).is_some_and(|line| is_header_line(line));
    let (location_at, program_at, body_from, confidence) = if exact {
        (2, 3, 4, HeaderConfidence::Exact)
    } else {
        (1, 2, 3, HeaderConfidence::Recovered)
    };

    let location = block
        .get(location_at)
        .map(|l| strip_header_markers(l))
        .unwrap_or_default();
    let program = block
        .get(program_at)
        .map(|l| strip_header_markers(l))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
    let raw_body = if body_from < block.len() {
        block[body_from..].join("\n")
    } else {
        String::new()
    };

    WodEntry {
        date: date.to_string(),
        location,
        program,
        body: noise::clean(&raw_body),
        confidence,
    }
}

fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn strip_header_markers(line: &str) -> String {
    line.trim().trim_start_matches('#').trim().to_string()
}
