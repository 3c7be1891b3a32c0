use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::filter::filter_entries;
use crate::model::{Entry, ListRequest, RunStatistics};
use crate::parser::parse_ledger;
use crate::render::{self, RenderOptions};
use crate::sort::sort_entries;
use crate::summary::summarize_entries;

/// Filtered, sorted entries of one run together with its statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSnapshot {
    pub entries: Vec<Entry>,
    pub stats: RunStatistics,
}

impl ListingSnapshot {
    /// Render the report. Tag tables are counted on a copy of the statistics,
    /// so rendering twice gives the same output.
    pub fn write_report<W: Write>(&self, writer: W, options: &RenderOptions) -> Result<()> {
        let mut stats = self.stats.clone();
        render::write_report(writer, &self.entries, &mut stats, options)
    }

    /// Snapshot with the tag tables filled, for structured output.
    pub fn with_tag_counts(mut self) -> Self {
        render::tally_tags(&self.entries, &mut self.stats);
        self
    }
}

/// Parse, filter, sort and summarize `text`. Never fails.
pub fn run_listing(text: &str, request: &ListRequest) -> ListingSnapshot {
    let mut stats = RunStatistics::new(request.category);
    let entries = parse_ledger(text, &mut stats);
    let mut entries = filter_entries(
        entries,
        &request.keywords,
        request.include_completed,
        &mut stats,
    );
    sort_entries(&mut entries);
    summarize_entries(&entries, &mut stats);
    ListingSnapshot { entries, stats }
}

#[derive(Debug, Clone)]
pub struct LedgerService {
    config: AppConfig,
}

impl LedgerService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn list(&self, request: &ListRequest) -> Result<ListingSnapshot> {
        let text = self.read_log(request)?;
        Ok(run_listing(&text, request))
    }

    /// Bytes that are not valid UTF-8 are replaced, so one badly encoded
    /// line never hides the rest of the log.
    fn read_log(&self, request: &ListRequest) -> Result<String> {
        let path = self.config.log_path(request.category);
        if !path.exists() {
            return Err(ConfigError::MissingLog(path).into());
        }
        tracing::debug!(path = %path.display(), "reading log");
        let bytes = fs::read(&path).with_context(|| {
            format!(
                "Failed to read {} log at {}",
                request.category,
                path.display()
            )
        })?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    "log is not valid UTF-8, replacing invalid bytes"
                );
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryStatus, LogCategory};
    use crate::style::Palette;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const LEDGER: &str = "\
# Week 42
. (B) Call dentist due:2030-01-01 rec:+2w
x 2024-01-02 2024-01-01 (A) Buy milk +Home ph:0.5
just a comment
/ Cancel gym @town
- Remember +Home wifi password
. (A) Fix roof +Home @house ph:2.25
";

    fn ids(snapshot: &ListingSnapshot) -> Vec<usize> {
        snapshot.entries.iter().map(|e| e.sequence_id).collect()
    }

    #[test]
    fn pipeline_filters_sorts_and_counts() {
        let request = ListRequest::new(LogCategory::Daily);
        let snapshot = run_listing(LEDGER, &request);

        assert_eq!(ids(&snapshot), vec![7, 2, 5, 6]);
        let stats = &snapshot.stats;
        assert_eq!(stats.total_file_lines, 7);
        assert_eq!(stats.total_file_entries, 5);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.total_cancelled, 1);
        assert_eq!(stats.total_notes, 1);
        assert_eq!(stats.total_open(), 2);
        assert!((stats.total_effort - 2.25).abs() < f64::EPSILON);
        assert!(stats.total_file_lines >= stats.total_file_entries);
        assert!(stats.total_file_entries >= stats.total_entries);
    }

    #[test]
    fn completed_entries_join_with_flag_and_keywords() {
        let request = ListRequest::new(LogCategory::Daily)
            .with_keywords(["+home"])
            .include_completed(true);
        let snapshot = run_listing(LEDGER, &request);

        assert_eq!(ids(&snapshot), vec![7, 3, 6]);
        assert!(snapshot
            .entries
            .iter()
            .any(|e| e.status == EntryStatus::Completed));
        assert!((snapshot.stats.total_effort - 2.75).abs() < 1e-9);
        assert_eq!(snapshot.stats.filters, vec!["+home".to_string()]);
    }

    #[test]
    fn runs_do_not_share_statistics() {
        let roof = ListRequest::new(LogCategory::Daily).with_keywords(["roof"]);
        let first = run_listing(LEDGER, &roof);
        let second = run_listing(LEDGER, &ListRequest::new(LogCategory::Daily));
        assert_eq!(first.stats.total_entries, 1);
        assert!(second.stats.filters.is_empty());
        assert_eq!(second.stats.total_entries, 4);
    }

    #[test]
    fn rendering_twice_is_stable() {
        let snapshot = run_listing(LEDGER, &ListRequest::new(LogCategory::Daily));
        let options = RenderOptions {
            show_meta: false,
            today: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            palette: Palette::Plain,
        };
        let mut first = Vec::new();
        let mut second = Vec::new();
        snapshot.write_report(&mut first, &options).unwrap();
        snapshot.write_report(&mut second, &options).unwrap();
        assert_eq!(first, second);

        let text = String::from_utf8(first).unwrap();
        assert!(text.contains("1 project(s) +Home (2) \n"));
        assert!(text.contains("2 context(s) @house (1) @town (1) \n"));
        assert!(text.contains("daily log | 5/7 parsed line(s)"));
    }

    #[test]
    fn tag_counts_for_structured_output() {
        let snapshot =
            run_listing(LEDGER, &ListRequest::new(LogCategory::Daily)).with_tag_counts();
        assert_eq!(snapshot.stats.project_tags.get("+Home"), Some(&2));
        assert_eq!(snapshot.stats.context_tags.len(), 2);
    }

    #[test]
    fn service_reads_category_file() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("monthly.txt"), LEDGER).expect("write log");
        let service = LedgerService::new(AppConfig::from_data_dir(dir.path().to_path_buf()));

        let snapshot = service
            .list(&ListRequest::new(LogCategory::Monthly))
            .expect("list monthly");
        assert_eq!(snapshot.stats.category, LogCategory::Monthly);
        assert_eq!(snapshot.entries.len(), 4);

        let err = service
            .list(&ListRequest::new(LogCategory::Future))
            .unwrap_err();
        assert!(err.to_string().contains("future.txt"));
    }

    #[test]
    fn service_lists_logs_with_latin1_bytes() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(
            dir.path().join("daily.txt"),
            b". clean line\n. Anruf B\xfcro +Work\n".as_slice(),
        )
        .expect("write log");
        let service = LedgerService::new(AppConfig::from_data_dir(dir.path().to_path_buf()));

        let snapshot = service
            .list(&ListRequest::new(LogCategory::Daily))
            .expect("list daily");
        assert_eq!(ids(&snapshot), vec![1, 2]);
        assert_eq!(snapshot.entries[0].description, "clean line");
        assert_eq!(snapshot.entries[1].description, "Anruf B\u{FFFD}ro +Work");
        assert_eq!(snapshot.stats.total_file_lines, 2);

        let tagged = snapshot.with_tag_counts();
        assert_eq!(tagged.stats.project_tags.get("+Work"), Some(&1));
    }
}
