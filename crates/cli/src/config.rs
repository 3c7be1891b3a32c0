pub use boojo_core::config::*;
pub use boojo_core::AppConfig;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> anyhow::Result<AppConfig> {
    AppConfig::discover(cli.data_dir.clone())
}
