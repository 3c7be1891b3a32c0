use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use once_cell::sync::Lazy;

use crate::model::LogCategory;

static DEFAULT_DATA_DIR: &str = "data";
pub static ENV_DATA_DIR: &str = "BOOJO_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "boojo", "boojo"));

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the directory holding the log files from the override, the
    /// environment, a local `data/` directory, or the platform data dir.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override)?;
        if !data_dir.is_dir() {
            tracing::warn!(path = %data_dir.display(), "data directory does not exist");
        }
        Ok(Self::from_data_dir(data_dir))
    }

    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_path(&self, category: LogCategory) -> PathBuf {
        self.data_dir.join(category.file_name())
    }
}

fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_dir_override {
        return Ok(dir);
    }

    if let Ok(env_dir) = env::var(ENV_DATA_DIR) {
        if !env_dir.trim().is_empty() {
            return Ok(PathBuf::from(env_dir));
        }
    }

    let local = env::current_dir()?.join(DEFAULT_DATA_DIR);
    if local.is_dir() {
        return Ok(local);
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok(project.data_dir().to_path_buf());
    }

    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_and_paths_follow_category() {
        let config = AppConfig::discover(Some(PathBuf::from("/tmp/ledger"))).unwrap();
        assert_eq!(config.data_dir(), Path::new("/tmp/ledger"));
        assert_eq!(
            config.log_path(LogCategory::Monthly),
            PathBuf::from("/tmp/ledger/monthly.txt")
        );
    }
}
