use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown log type '{0}'. Use --log <daily|monthly|future> (accepted: daily, monthly, future)")]
    UnknownCategory(String),
    #[error("Log file {} does not exist", .0.display())]
    MissingLog(PathBuf),
}
