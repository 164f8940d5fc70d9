//! Rolling file logs for the checklist tracker.
//!
//! # Responsibility
//! - Start one file logger per process from a resolved [`AppConfig`].
//! - Record panics as one metadata line before the previous hook runs.
//!
//! # Invariants
//! - Log lines carry ids, counts and statuses, never project names or
//!   checklist text. Panic payloads are not logged for the same reason.
//! - A repeated init with the same level and directory is a no-op; a
//!   repeated init with anything else is rejected.

use crate::config::AppConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "seo_checklist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging is already running with a different level or directory.
    AlreadyStarted {
        level: &'static str,
        log_dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { dir, source } => {
                write!(f, "failed to create log directory `{}`: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyStarted { level, log_dir } => write!(
                f,
                "logging already started at level `{level}` in `{}`",
                log_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::AlreadyStarted { .. } => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts `seo_checklist*.log` files under `config.log_dir`.
///
/// # Errors
/// - [`LoggingError::CreateDir`] when the directory cannot be created.
/// - [`LoggingError::Backend`] when flexi_logger refuses the setup.
/// - [`LoggingError::AlreadyStarted`] when an earlier call used another
///   level or directory.
pub fn init_logging(config: &AppConfig) -> Result<(), LoggingError> {
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(config))?;
    if active.level == config.log_level && active.log_dir == config.log_dir {
        return Ok(());
    }
    Err(LoggingError::AlreadyStarted {
        level: active.level,
        log_dir: active.log_dir.clone(),
    })
}

fn start_logger(config: &AppConfig) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&config.log_dir).map_err(|source| LoggingError::CreateDir {
        dir: config.log_dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} log_dir={} db_path={}",
        config.log_level,
        config.log_dir.display(),
        config.db_path.display()
    );

    Ok(ActiveLogger {
        level: config.log_level,
        log_dir: config.log_dir.clone(),
        _handle: handle,
    })
}

// Runs at most once: only a successful `start_logger` reaches it.
fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!("event=panic module=core status=error location={location}");
        log::logger().flush();
        previous_hook(panic_info);
    }));
}
