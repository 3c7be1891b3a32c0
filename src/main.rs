use anyhow::Result;
use chrono::Local;
use clap::Parser;

fn main() -> Result<()> {
    let cli = boojo::cli::Cli::parse();
    boojo::logging::init_tracing(cli.log_filter.clone())?;

    let config = boojo::config::from_cli(&cli)?;
    let output = boojo::commands::OutputOptions {
        palette: cli.color.palette(),
        today: Local::now().date_naive(),
    };
    let command = cli.command.clone().unwrap_or_default();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    boojo::commands::execute(&config, command, &output, &mut handle)?;

    Ok(())
}
