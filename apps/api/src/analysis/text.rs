//! Text scanning helpers shared by the keyword, structure and skill passes.
//!
//! Trigger phrases are ASCII, so lookups run on `to_ascii_lowercase()` copies whose byte
//! offsets line up exactly with the original text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Characters scanned after a section trigger phrase.
pub const SECTION_WINDOW_CHARS: usize = 500;

/// Maximum items kept per extracted list.
pub const MAX_LIST_ITEMS: usize = 10;

// NOTE: expect() is acceptable here: the pattern is a constant.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*•]|\d+[.)])[ \t]+(.+?)[ \t]*\r?$")
        .expect("Invalid regex: list item pattern")
});

/// Splits on sentence terminators, dropping empty fragments.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The first `n` characters of `text`.
pub fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Bulleted, dashed, starred or numbered lines, marker stripped, capped at 10.
pub fn list_items(text: &str) -> Vec<String> {
    LIST_ITEM
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_LIST_ITEMS)
        .collect()
}

/// Locates a sub-section of a posting as a byte range of `text`.
///
/// The range starts at the earliest occurrence of any `triggers` phrase and spans the
/// next 500 characters. It is cut short where one of the `stops` phrases (the triggers of
/// the opposing section) appears after the trigger itself.
pub fn section_range(text: &str, triggers: &[&str], stops: &[&str]) -> Option<Range<usize>> {
    let lower = text.to_ascii_lowercase();

    let (start, trigger_len) = triggers
        .iter()
        .filter_map(|t| lower.find(t).map(|pos| (pos, t.len())))
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))?;

    let end = start + prefix_chars(&text[start..], SECTION_WINDOW_CHARS).len();

    let after_trigger = &lower[start + trigger_len..end];
    let stop = stops
        .iter()
        .filter_map(|s| after_trigger.find(s))
        .min()
        .map(|pos| start + trigger_len + pos);

    Some(start..stop.unwrap_or(end))
}

/// The text of [`section_range`].
pub fn section_window<'a>(text: &'a str, triggers: &[&str], stops: &[&str]) -> Option<&'a str> {
    section_range(text, triggers, stops).map(|range| &text[range])
}
