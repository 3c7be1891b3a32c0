use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{Entry, Glyph, Priority, Recurrence, RecurrenceUnit, RunStatistics};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates and priority tokens that may follow the glyph.
const DATED_PREFIX: &str = r"(?P<first>\d{4}-\d{2}-\d{2}\s)?(?P<priority>\([ABC]\)\s)?(?P<second>\d{4}-\d{2}-\d{2}\s)?(?P<late_priority>\([ABC]\)\s)?";

/// Glyph, then up to two dates with a priority token before, between or after them.
/// The glyph class comes from `Glyph::ALL`.
static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let glyphs: String = Glyph::ALL
        .iter()
        .map(|glyph| regex::escape(&glyph.as_char().to_string()))
        .collect();
    Regex::new(&format!(r"^\s*(?P<glyph>[{glyphs}]) {DATED_PREFIX}")).expect("valid regex")
});

pub(crate) static DUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" due:(\d{4}-\d{2}-\d{2})").expect("valid regex"));
pub(crate) static EFFORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ph:(\d+\.\d{1,3})").expect("valid regex"));
pub(crate) static RECURRENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" rec:(\+)?(\d+)([dbwmy])").expect("valid regex"));

/// Parse every line of `text`, recording scan counts into `stats`.
///
/// Lines that are not entries are skipped; the function never fails.
pub fn parse_ledger(text: &str, stats: &mut RunStatistics) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut scanned = 0usize;

    for (index, line) in text.lines().enumerate() {
        scanned = index + 1;
        if let Some(entry) = parse_entry(line, scanned) {
            entries.push(entry);
        }
    }

    stats.total_file_lines = scanned;
    stats.total_file_entries = entries.len();
    tracing::debug!(
        lines = stats.total_file_lines,
        entries = stats.total_file_entries,
        "parsed ledger"
    );
    entries
}

/// Recognise a single line. `sequence_id` is the 1-based line number.
pub fn parse_entry(line: &str, sequence_id: usize) -> Option<Entry> {
    let caps = PREFIX_RE.captures(line)?;
    let glyph = caps
        .name("glyph")
        .and_then(|m| m.as_str().chars().next())
        .and_then(Glyph::from_char)?;

    let priority_tokens: Vec<&str> = ["priority", "late_priority"]
        .into_iter()
        .filter_map(|name| caps.name(name).map(|m| m.as_str()))
        .collect();
    // First token wins.
    let priority = priority_tokens
        .first()
        .and_then(|token| token.chars().nth(1))
        .map(Priority::from_letter)
        .unwrap_or_default();

    let (created_at, completed_at) = leading_dates(&caps);

    let prefix_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    let mut description = String::with_capacity(line.len());
    for token in &priority_tokens {
        description.push_str(token);
    }
    description.push_str(&line[prefix_end..]);
    let description = DUE_RE.replace_all(&description, "").into_owned();

    Some(Entry {
        raw_text: line.to_string(),
        sequence_id,
        description,
        priority,
        status: glyph.status(),
        layout: glyph.layout(),
        created_at,
        completed_at,
        due_at: parse_due(line),
        recurrence: parse_recurrence(line),
        effort: parse_effort(line),
    })
}

/// Returns `(created_at, completed_at)`.
///
/// One date is the creation date; with two, the completion date comes first.
fn leading_dates(caps: &Captures<'_>) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let first = caps.name("first").map(|m| m.as_str());
    let second = caps.name("second").map(|m| m.as_str());
    match (first, second) {
        (Some(completed), Some(created)) => (parse_date(created), parse_date(completed)),
        (Some(only), None) | (None, Some(only)) => (parse_date(only), None),
        (None, None) => (None, None),
    }
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token.trim(), DATE_FORMAT).ok()
}

pub fn parse_due(line: &str) -> Option<NaiveDate> {
    DUE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_date(m.as_str()))
}

pub fn parse_effort(line: &str) -> Option<f64> {
    EFFORT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn parse_recurrence(line: &str) -> Option<Recurrence> {
    let caps = RECURRENCE_RE.captures(line)?;
    let count = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let unit = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(RecurrenceUnit::from_code)?;

    Some(Recurrence {
        expression: caps.get(0)?.as_str().trim().to_string(),
        count,
        unit,
        strict: caps.get(1).is_some(),
    })
}
