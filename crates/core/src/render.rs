use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{Entry, EntryStatus, Layout, Priority, RunStatistics};
use crate::parser::{DUE_RE, EFFORT_RE, RECURRENCE_RE};
use crate::style::{Palette, Tone};

const DATE_FORMAT: &str = "%Y-%m-%d";
const RECURRING_MARK: &str = "∞";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}\s").expect("valid regex"));
static PRIORITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([ABC]\)").expect("valid regex"));
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[\w-]+").expect("valid regex"));
static PROJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+[\w-]+").expect("valid regex"));
static COUNTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\s)(#[\w-]+)").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub show_meta: bool,
    pub today: NaiveDate,
    pub palette: Palette,
}

/// Write entry lines followed by the summary block.
///
/// Tag frequency tables in `stats` are filled while the entries are rendered.
pub fn write_report<W: Write>(
    mut writer: W,
    entries: &[Entry],
    stats: &mut RunStatistics,
    options: &RenderOptions,
) -> Result<()> {
    for block in render_entries(entries, stats, options) {
        writeln!(writer, "{block}")?;
    }
    write!(writer, "{}", render_summary(stats, options.palette))?;
    Ok(())
}

/// One block per entry: the colored line and, when requested, its meta line.
pub fn render_entries(
    entries: &[Entry],
    stats: &mut RunStatistics,
    options: &RenderOptions,
) -> Vec<String> {
    let width = id_width(entries);
    entries
        .iter()
        .map(|entry| render_entry(entry, width, stats, options))
        .collect()
}

fn render_entry(
    entry: &Entry,
    width: usize,
    stats: &mut RunStatistics,
    options: &RenderOptions,
) -> String {
    let palette = options.palette;
    let tone = status_tone(entry);
    let text = display_text(&entry.raw_text);

    let indent_len = text.len() - text.trim_start().len();
    let (indent, rest) = text.split_at(indent_len);
    let mut chars = rest.chars();
    let glyph = chars.next().map(String::from).unwrap_or_default();
    let body = chars.as_str();

    let body = match priority_tone(entry.priority) {
        Some(priority) => PRIORITY_RE
            .replace_all(body, |caps: &Captures<'_>| palette.paint(priority, &caps[0]))
            .into_owned(),
        None => body.to_string(),
    };
    let body = CONTEXT_RE.replace_all(&body, |caps: &Captures<'_>| {
        *stats.context_tags.entry(caps[0].to_string()).or_default() += 1;
        palette.paint(Tone::Context, &caps[0])
    });
    let body = PROJECT_RE.replace_all(&body, |caps: &Captures<'_>| {
        *stats.project_tags.entry(caps[0].to_string()).or_default() += 1;
        palette.paint(Tone::Project, &caps[0])
    });
    let body = COUNTER_RE.replace_all(&body, |caps: &Captures<'_>| {
        format!("{}{}", &caps[1], palette.paint(Tone::Counter, &caps[2]))
    });

    let mut line = format!("{indent}{}{body}", palette.paint(tone, &glyph));

    if entry.is_recurring() {
        line.push(' ');
        line.push_str(&palette.paint(Tone::Recurring, RECURRING_MARK));
    }

    if options.show_meta {
        let meta = meta_line(entry, palette);
        if !meta.is_empty() {
            line.push_str("\n  ");
            line.push_str(&" ".repeat(width));
            line.push_str(&meta);
        }
    }

    let today = options.today.format(DATE_FORMAT).to_string();
    let line = line.replace(&today, &palette.paint(Tone::Today, &today));

    let number = format!("{:0width$}", entry.sequence_id, width = width);
    format!("{} {}", palette.paint(tone, &number), line)
}

fn meta_line(entry: &Entry, palette: Palette) -> String {
    let mut segments: Vec<(Tone, String)> = Vec::new();
    if let Some(effort) = entry.effort.filter(|effort| *effort != 0.0) {
        segments.push((Tone::Effort, format!("ph:{effort:.2}")));
    }
    if let Some(due) = entry.due_at {
        segments.push((Tone::Due, format!("due:{}", due.format(DATE_FORMAT))));
    }
    if let Some(created) = entry.created_at {
        segments.push((Tone::Muted, format!("created:{}", created.format(DATE_FORMAT))));
    }
    if let Some(completed) = entry.completed_at {
        segments.push((
            Tone::Muted,
            format!("completed:{}", completed.format(DATE_FORMAT)),
        ));
    }
    if let Some(recurrence) = &entry.recurrence {
        segments.push((Tone::Muted, recurrence.expression.clone()));
    }

    segments
        .iter()
        .map(|(tone, text)| format!(" {}", palette.paint(*tone, text)))
        .collect()
}

/// Raw text without dates and due/recurrence/effort annotations.
pub fn display_text(raw: &str) -> String {
    let line = DUE_RE.replace_all(raw, "");
    let line = DATE_RE.replace_all(&line, "");
    let line = RECURRENCE_RE.replace_all(&line, "");
    EFFORT_RE.replace_all(&line, "").into_owned()
}

/// Count tags the same way rendering does, without producing output.
pub fn tally_tags(entries: &[Entry], stats: &mut RunStatistics) {
    for entry in entries {
        let text = display_text(&entry.raw_text);
        for tag in CONTEXT_RE.find_iter(&text) {
            *stats.context_tags.entry(tag.as_str().to_string()).or_default() += 1;
        }
        for tag in PROJECT_RE.find_iter(&text) {
            *stats.project_tags.entry(tag.as_str().to_string()).or_default() += 1;
        }
    }
}

pub fn render_summary(stats: &RunStatistics, palette: Palette) -> String {
    let mut out = format!(
        "\n{} log | {}/{} parsed line(s)\n",
        stats.category, stats.total_file_entries, stats.total_file_lines
    );

    if !stats.filters.is_empty() {
        let quoted: String = stats
            .filters
            .iter()
            .map(|filter| format!("\"{filter}\" "))
            .collect();
        let label = format!("{} filter(s): {quoted}", stats.filters.len());
        out.push_str(&palette.paint(Tone::Filter, &label));
        out.push_str("| ");
    }

    out.push_str(&format!(
        "{} task(s) | {} | {} | {} | {}\n",
        stats.total_tasks(),
        palette.paint(Tone::Completed, &format!("{} completed", stats.total_completed)),
        palette.paint(Tone::Open, &format!("{} open", stats.total_open())),
        palette.paint(Tone::Cancelled, &format!("{} cancelled", stats.total_cancelled)),
        palette.paint(Tone::Note, &format!("{} note(s)", stats.total_notes)),
    ));
    out.push_str(&format!(
        "{} project(s) {}\n",
        stats.project_tags.len(),
        palette.paint(Tone::Project, &format_tag_counts(&stats.project_tags))
    ));
    out.push_str(&format!(
        "{} context(s) {}\n",
        stats.context_tags.len(),
        palette.paint(Tone::Context, &format_tag_counts(&stats.context_tags))
    ));
    out.push_str(&format!(
        "ph {}\n",
        palette.paint(Tone::Effort, &format!("{:.2}", stats.total_effort))
    ));
    out
}

/// `tag (count) ` for every tag, in ascending key order.
pub fn format_tag_counts(tags: &BTreeMap<String, usize>) -> String {
    tags.iter()
        .map(|(tag, count)| format!("{tag} ({count}) "))
        .collect()
}

fn id_width(entries: &[Entry]) -> usize {
    entries
        .iter()
        .map(|entry| entry.sequence_id)
        .max()
        .map(|max| max.to_string().len())
        .unwrap_or(1)
}

fn status_tone(entry: &Entry) -> Tone {
    match (entry.status, entry.layout) {
        (EntryStatus::Completed, _) => Tone::Completed,
        (EntryStatus::Cancelled, _) => Tone::Cancelled,
        (_, Layout::Note) => Tone::Note,
        _ => Tone::Open,
    }
}

fn priority_tone(priority: Priority) -> Option<Tone> {
    match priority.letter()? {
        'A' => Some(Tone::PriorityA),
        'B' => Some(Tone::PriorityB),
        _ => Some(Tone::PriorityC),
    }
}
