use crate::model::{Entry, EntryStatus, RunStatistics};

/// Keep entries whose raw text contains every keyword (case-insensitive).
///
/// Completed entries are dropped unless `include_completed` is set. Input
/// order is preserved.
pub fn filter_entries(
    entries: Vec<Entry>,
    keywords: &[String],
    include_completed: bool,
    stats: &mut RunStatistics,
) -> Vec<Entry> {
    let needles = normalize_keywords(keywords);

    let filtered: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| include_completed || entry.status != EntryStatus::Completed)
        .filter(|entry| matches_keywords(entry, &needles))
        .collect();

    stats.filters = dedup_keywords(keywords);
    stats.total_entries = filtered.len();
    tracing::debug!(
        kept = stats.total_entries,
        filters = stats.filters.len(),
        include_completed,
        "filtered entries"
    );
    filtered
}

fn matches_keywords(entry: &Entry, needles: &[String]) -> bool {
    if needles.is_empty() {
        return true;
    }
    let haystack = entry.raw_text.to_lowercase();
    needles.iter().all(|needle| haystack.contains(needle.as_str()))
}

fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

fn dedup_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !seen.contains(keyword) {
            seen.push(keyword.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_entry;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Entry> {
        [
            ". Call Bob +Home",
            "x Pay rent +home @bank",
            "/ Cancelled trip +Travel",
            "- Note about HOME office",
        ]
        .iter()
        .enumerate()
        .filter_map(|(i, line)| parse_entry(line, i + 1))
        .collect()
    }

    fn ids(entries: &[Entry]) -> Vec<usize> {
        entries.iter().map(|e| e.sequence_id).collect()
    }

    #[test]
    fn empty_keywords_only_drop_completed() {
        let mut stats = RunStatistics::default();
        let kept = filter_entries(sample(), &[], false, &mut stats);
        assert_eq!(ids(&kept), vec![1, 3, 4]);
        assert_eq!(stats.total_entries, 3);
        assert!(stats.filters.is_empty());
    }

    #[test]
    fn keywords_match_case_insensitively_and_all_must_hit() {
        let mut stats = RunStatistics::default();
        let keywords = vec!["home".to_string()];
        let kept = filter_entries(sample(), &keywords, true, &mut stats);
        assert_eq!(ids(&kept), vec![1, 2, 4]);

        let keywords = vec!["HOME".to_string(), "@bank".to_string()];
        let kept = filter_entries(sample(), &keywords, true, &mut stats);
        assert_eq!(ids(&kept), vec![2]);
        assert_eq!(stats.filters, keywords);
    }

    #[test]
    fn completed_entries_excluded_without_flag() {
        let mut stats = RunStatistics::default();
        let keywords = vec!["rent".to_string()];
        let kept = filter_entries(sample(), &keywords, false, &mut stats);
        assert!(kept.is_empty());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn repeated_keywords_are_recorded_once() {
        let mut stats = RunStatistics::default();
        let keywords = vec!["home".to_string(), "home".to_string()];
        filter_entries(sample(), &keywords, true, &mut stats);
        assert_eq!(stats.filters, vec!["home".to_string()]);
    }
}
