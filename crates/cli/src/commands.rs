use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::cli::{CliCommand, ListArgs};
use crate::config::AppConfig;
use crate::core::render::RenderOptions;
use crate::core::services::LedgerService;
use crate::core::style::Palette;

/// Presentation settings resolved once per invocation.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub palette: Palette,
    pub today: NaiveDate,
}

pub fn execute<W: Write>(
    config: &AppConfig,
    command: CliCommand,
    output: &OutputOptions,
    mut writer: W,
) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(config, &args, output, &mut writer),
    }
}

fn handle_list<W: Write>(
    config: &AppConfig,
    args: &ListArgs,
    output: &OutputOptions,
    mut writer: W,
) -> Result<()> {
    let request = args.to_request()?;
    let service = LedgerService::new(config.clone());
    let snapshot = service.list(&request)?;
    tracing::debug!(
        category = %request.category,
        entries = snapshot.entries.len(),
        "listing ready"
    );

    if args.json {
        let payload = serde_json::to_string_pretty(&snapshot.with_tag_counts())
            .context("Failed to serialize listing")?;
        writeln!(writer, "{payload}")?;
        return Ok(());
    }

    let options = RenderOptions {
        show_meta: args.meta,
        today: output.today,
        palette: output.palette,
    };
    snapshot.write_report(&mut writer, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DAILY: &str = "\
. (A) Plan sprint +Work @office
x 2026-10-18 2026-10-17 Send invoice +Work ph:0.75
- Kids love pancakes
notes without glyph
. Water plants due:2026-10-19 rec:3d
";

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("daily.txt"), DAILY).expect("write daily log");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf());
        (config, dir)
    }

    fn plain_output() -> OutputOptions {
        OutputOptions {
            palette: Palette::Plain,
            today: NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"),
        }
    }

    fn run(config: &AppConfig, args: ListArgs) -> Result<String> {
        let mut output = Vec::new();
        execute(config, CliCommand::List(args), &plain_output(), &mut output)?;
        Ok(String::from_utf8(output).expect("utf8"))
    }

    #[test]
    fn list_command_prints_sorted_report() {
        let (config, _dir) = temp_config();
        let output = run(&config, ListArgs::default()).expect("execute ls");

        assert_eq!(
            output,
            "1 . (A) Plan sprint +Work @office\n\
             5 . Water plants ∞\n\
             3 - Kids love pancakes\n\
             \n\
             daily log | 4/5 parsed line(s)\n\
             2 task(s) | 0 completed | 2 open | 0 cancelled | 1 note(s)\n\
             1 project(s) +Work (1) \n\
             1 context(s) @office (1) \n\
             ph 0.00\n"
        );
    }

    #[test]
    fn list_command_with_all_meta_and_keyword() {
        let (config, _dir) = temp_config();
        let args = ListArgs {
            all: true,
            meta: true,
            keywords: vec!["work".into()],
            ..ListArgs::default()
        };
        let output = run(&config, args).expect("execute ls");

        assert!(output.starts_with("1 . (A) Plan sprint +Work @office\n2 x Send invoice +Work\n"));
        assert!(output.contains("    ph:0.75 created:2026-10-17 completed:2026-10-18\n"));
        assert!(output.contains("1 filter(s): \"work\" | 2 task(s) | 1 completed | 1 open"));
        assert!(output.contains("ph 0.75\n"));
    }

    #[test]
    fn list_command_emits_json() {
        let (config, _dir) = temp_config();
        let args = ListArgs {
            json: true,
            ..ListArgs::default()
        };
        let output = run(&config, args).expect("execute ls");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");

        assert_eq!(value["entries"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["entries"][1]["due_at"], "2026-10-19");
        assert_eq!(value["entries"][1]["recurrence"]["unit"], "day");
        assert_eq!(value["stats"]["project_tags"]["+Work"], 1);
        assert_eq!(value["stats"]["category"], "daily");
    }

    #[test]
    fn list_command_reports_missing_log() {
        let (config, _dir) = temp_config();
        let args = ListArgs {
            log: "future".into(),
            ..ListArgs::default()
        };
        let err = run(&config, args).unwrap_err();
        assert!(err.to_string().contains("future.txt"));
    }

    #[test]
    fn list_command_rejects_unknown_log_type() {
        let (config, _dir) = temp_config();
        let args = ListArgs {
            log: "yearly".into(),
            ..ListArgs::default()
        };
        let err = run(&config, args).unwrap_err();
        assert!(err.to_string().contains("Unknown log type"));
    }
}
