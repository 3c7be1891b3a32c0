use crate::model::{Entry, EntryStatus, Layout, RunStatistics};

/// Accumulate status counts and effort for the final entry set.
pub fn summarize_entries(entries: &[Entry], stats: &mut RunStatistics) {
    for entry in entries {
        if let Some(effort) = entry.effort.filter(|effort| *effort > 0.0) {
            stats.total_effort += effort;
        }
        match (entry.status, entry.layout) {
            (EntryStatus::Completed, _) => stats.total_completed += 1,
            (EntryStatus::Cancelled, _) => stats.total_cancelled += 1,
            (EntryStatus::Open, Layout::Note) => stats.total_notes += 1,
            (EntryStatus::Open, _) => {}
        }
    }
    tracing::debug!(
        completed = stats.total_completed,
        cancelled = stats.total_cancelled,
        notes = stats.total_notes,
        effort = stats.total_effort,
        "summarized entries"
    );
}
