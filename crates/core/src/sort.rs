use std::cmp::Ordering;

use crate::model::Entry;

/// Listing order: priority, layout, status, due date (latest first, undated
/// last), then line number.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.layout.rank().cmp(&b.layout.rank()))
        .then_with(|| a.status.rank().cmp(&b.status.rank()))
        .then_with(|| match (a.due_at, b.due_at) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.sequence_id.cmp(&b.sequence_id))
}

pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_unstable_by(compare_entries);
}
