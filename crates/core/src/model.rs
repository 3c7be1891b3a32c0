use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Open,
    Completed,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Open => "open",
            EntryStatus::Completed => "completed",
            EntryStatus::Cancelled => "cancelled",
        }
    }

    /// Position of the status in listing order.
    pub fn rank(&self) -> u8 {
        match self {
            EntryStatus::Open => 0,
            EntryStatus::Completed => 1,
            EntryStatus::Cancelled => 2,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Task,
    /// Reserved: no glyph produces events yet.
    Event,
    Note,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Task => "task",
            Layout::Event => "event",
            Layout::Note => "note",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Layout::Task => 0,
            Layout::Event => 1,
            Layout::Note => 2,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leading character of a ledger line. Every place that needs to know what a
/// glyph means goes through this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Dot,
    MiddleDot,
    Cross,
    Slash,
    Dash,
}

impl Glyph {
    pub const ALL: [Glyph; 5] = [
        Glyph::Dot,
        Glyph::MiddleDot,
        Glyph::Cross,
        Glyph::Slash,
        Glyph::Dash,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        Glyph::ALL.into_iter().find(|glyph| glyph.as_char() == c)
    }

    pub fn as_char(&self) -> char {
        match self {
            Glyph::Dot => '.',
            Glyph::MiddleDot => '·',
            Glyph::Cross => 'x',
            Glyph::Slash => '/',
            Glyph::Dash => '-',
        }
    }

    pub fn status(&self) -> EntryStatus {
        match self {
            Glyph::Cross => EntryStatus::Completed,
            Glyph::Slash => EntryStatus::Cancelled,
            Glyph::Dot | Glyph::MiddleDot | Glyph::Dash => EntryStatus::Open,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Glyph::Dash => Layout::Note,
            Glyph::Dot | Glyph::MiddleDot | Glyph::Cross | Glyph::Slash => Layout::Task,
        }
    }
}

/// `(A)` = 1 .. `(C)` = 3, anything else 9. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    pub const A: Priority = Priority(1);
    pub const B: Priority = Priority(2);
    pub const C: Priority = Priority(3);
    pub const NONE: Priority = Priority(9);

    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' => Priority::A,
            'B' => Priority::B,
            'C' => Priority::C,
            _ => Priority::NONE,
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self.0 {
            1 => Some('A'),
            2 => Some('B'),
            3 => Some('C'),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NONE
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Day,
    Workday,
    Week,
    Month,
    Year,
}

impl RecurrenceUnit {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'd' => Some(RecurrenceUnit::Day),
            'b' => Some(RecurrenceUnit::Workday),
            'w' => Some(RecurrenceUnit::Week),
            'm' => Some(RecurrenceUnit::Month),
            'y' => Some(RecurrenceUnit::Year),
            _ => None,
        }
    }
}

/// `rec:[+]N[dbwmy]`. Informational only, next occurrences are never computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recurrence {
    /// The annotation as written, e.g. `rec:+2w`.
    pub expression: String,
    pub count: u32,
    pub unit: RecurrenceUnit,
    /// Recur from the due date instead of the completion date.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub raw_text: String,
    /// 1-based line number in the scanned text.
    pub sequence_id: usize,
    pub description: String,
    pub priority: Priority,
    pub status: EntryStatus,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    /// Person-hours from `ph:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort: Option<f64>,
}

impl Entry {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    #[default]
    Daily,
    Monthly,
    Future,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Daily => "daily",
            LogCategory::Monthly => "monthly",
            LogCategory::Future => "future",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.as_str())
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(LogCategory::Daily),
            "monthly" => Ok(LogCategory::Monthly),
            "future" => Ok(LogCategory::Future),
            _ => Err(ConfigError::UnknownCategory(s.to_string())),
        }
    }
}

/// Parameters handed to the list pipeline by the command layer.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub category: LogCategory,
    pub keywords: Vec<String>,
    pub include_completed: bool,
}

impl ListRequest {
    pub fn new(category: LogCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn include_completed(mut self, include: bool) -> Self {
        self.include_completed = include;
        self
    }
}

/// Aggregates for a single listing run. Always built fresh per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    pub category: LogCategory,
    /// Lines scanned, recognised or not.
    pub total_file_lines: usize,
    /// Lines recognised as entries.
    pub total_file_entries: usize,
    /// Entries left after filtering.
    pub total_entries: usize,
    pub total_completed: usize,
    pub total_cancelled: usize,
    pub total_notes: usize,
    pub total_effort: f64,
    pub project_tags: BTreeMap<String, usize>,
    pub context_tags: BTreeMap<String, usize>,
    pub filters: Vec<String>,
}

impl RunStatistics {
    pub fn new(category: LogCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn total_tasks(&self) -> usize {
        self.total_entries.saturating_sub(self.total_notes)
    }

    pub fn total_open(&self) -> usize {
        self.total_entries
            .saturating_sub(self.total_completed)
            .saturating_sub(self.total_cancelled)
            .saturating_sub(self.total_notes)
    }
}
