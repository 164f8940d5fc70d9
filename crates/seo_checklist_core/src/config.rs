//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve database path and logging settings for one process.
//!
//! # Invariants
//! - Precedence is explicit override, then environment, then default.
//! - Blank values are treated as unset at every layer.
//! - A resolved `log_dir` is absolute and `log_level` is normalized.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "SEO_CHECKLIST_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SEO_CHECKLIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SEO_CHECKLIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "seo_checklist.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "seo_checklist_logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "log directory must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Caller-supplied values that win over environment and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration with an injectable environment lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let db_path = non_blank_path(overrides.db_path)
            .or_else(|| non_blank(env(DB_PATH_ENV)).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let raw_level = non_blank(overrides.log_level).or_else(|| non_blank(env(LOG_LEVEL_ENV)));
        let log_level = match raw_level {
            Some(raw) => normalize_level(&raw)?,
            None => default_log_level(),
        };

        let log_dir = non_blank_path(overrides.log_dir)
            .or_else(|| non_blank(env(LOG_DIR_ENV)).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        if !log_dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(log_dir));
        }

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

/// `debug` for debug builds, `info` otherwise.
fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn non_blank_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !is_blank(path))
}

fn is_blank(path: &Path) -> bool {
    path.to_str().is_some_and(|raw| raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, normalize_level, AppConfig, ConfigError, ConfigOverrides, DB_PATH_ENV,
        LOG_LEVEL_ENV,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.log_level, default_log_level());
        assert!(config.db_path.ends_with("seo_checklist.sqlite3"));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn overrides_beat_environment_and_blank_values_fall_through() {
        let env = env_of(&[(DB_PATH_ENV, "/env/projects.db"), (LOG_LEVEL_ENV, "WARNING")]);
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/flag/projects.db")),
            log_level: Some("   ".to_string()),
            log_dir: None,
        };

        let config = AppConfig::resolve_with(overrides, env).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/flag/projects.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn invalid_level_and_relative_log_dir_are_rejected() {
        let env = env_of(&[(LOG_LEVEL_ENV, "loud")]);
        let err = AppConfig::resolve_with(ConfigOverrides::default(), env).unwrap_err();
        assert_eq!(err, ConfigError::InvalidLogLevel("loud".to_string()));

        let overrides = ConfigOverrides {
            log_dir: Some(PathBuf::from("logs")),
            ..ConfigOverrides::default()
        };
        let err = AppConfig::resolve_with(overrides, env_of(&[])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }

    #[test]
    fn level_names_are_case_insensitive_with_warning_alias() {
        assert_eq!(normalize_level("INFO"), Ok("info"));
        assert_eq!(normalize_level(" warning "), Ok("warn"));
        assert!(normalize_level("verbose").is_err());
    }
}
