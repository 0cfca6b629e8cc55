//! Runtime configuration for hosts embedding the record store.
//!
//! # Responsibility
//! - Collect the few knobs a host needs: storage key, native db path, logging.
//! - Resolve overrides from `ROLLCALL_*` environment variables.
//!
//! # Invariants
//! - `storage_key` is never empty after `validate()`.
//! - Blank environment values are ignored, not treated as overrides.

use crate::logging::default_log_level;
use crate::repo::student_repo::STUDENTS_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "rollcall.sqlite3";

pub const ENV_STORAGE_KEY: &str = "ROLLCALL_STORAGE_KEY";
pub const ENV_DB_PATH: &str = "ROLLCALL_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ROLLCALL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROLLCALL_LOG_DIR";

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollcallConfig {
    /// Key under which the student collection blob is stored.
    pub storage_key: String,
    /// Native key-value database file. Ignored by browser hosts.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for RollcallConfig {
    fn default() -> Self {
        Self {
            storage_key: STUDENTS_STORAGE_KEY.to_string(),
            db_path: default_db_path(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DB_FILE_NAME)
}

#[cfg(target_arch = "wasm32")]
fn default_db_path() -> PathBuf {
    PathBuf::from(DB_FILE_NAME)
}

impl RollcallConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(key) = non_blank(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the store cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.storage_key.trim().is_empty() {
            return Err("storage_key cannot be empty".to_string());
        }
        if self.db_path.as_os_str().is_empty() {
            return Err("db_path cannot be empty".to_string());
        }
        Ok(())
    }
}
