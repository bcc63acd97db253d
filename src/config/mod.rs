use crate::core::schedule::ScheduleTable;
use crate::core::scheduler::DEFAULT_POLL_INTERVAL;
use crate::errors::{AppError, AppResult};
use crate::models::time_of_day::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LOG_FILE: &str = "timetracking_entries.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<TimeOfDay>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_catch_up")]
    pub catch_up_missed: bool,
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}
fn default_checkpoints() -> Vec<TimeOfDay> {
    ScheduleTable::business_hours().checkpoints().to_vec()
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}
fn default_catch_up() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            projects: Vec::new(),
            checkpoints: default_checkpoints(),
            poll_interval_ms: default_poll_interval_ms(),
            catch_up_missed: default_catch_up(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtimeprompt")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeprompt.yaml")
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Write the configuration as YAML, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Problems that make the configuration unusable for prompting.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.projects.iter().all(|p| p.trim().is_empty()) {
            problems.push("no projects configured (at least one is required)".to_string());
        }
        if self.log_file.trim().is_empty() {
            problems.push("log_file is empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            problems.push("poll_interval_ms must be greater than zero".to_string());
        }
        problems
    }

    /// Non-empty, trimmed project names in configured order.
    pub fn project_names(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn require_projects(&self) -> AppResult<Vec<String>> {
        let projects = self.project_names();
        if projects.is_empty() {
            return Err(AppError::Config(
                "You must have at least one project. Run `rtimeprompt init --project <NAME>`."
                    .to_string(),
            ));
        }
        Ok(projects)
    }

    pub fn schedule(&self) -> ScheduleTable {
        ScheduleTable::new(self.checkpoints.clone())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Log path; relative paths resolve against the working directory.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.log_file)
    }
}
