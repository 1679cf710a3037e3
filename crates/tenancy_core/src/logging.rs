//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit stable, metadata-only diagnostic events from core.
//!
//! # Invariants
//! - Logging init is idempotent for the same directory and level.
//! - Re-initialization with a different directory or level is rejected.
//! - Initialization never panics.
//! - Core log lines never include email addresses or phone numbers.

use crate::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "tenancy";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidLogDir(String),
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(flexi_logger::FlexiLoggerError),
    /// Logging is already running with a different setting.
    Conflict {
        setting: &'static str,
        active: String,
        requested: String,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(message) => write!(f, "{message}"),
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::Conflict {
                setting,
                active,
                requested,
            } => write!(
                f,
                "logging already initialized with {setting} `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

/// Starts logging when the config names a directory.
///
/// Returns `Ok(false)` when `log_dir` is unset and nothing was started.
pub fn init_from_config(config: &LoggingConfig) -> Result<bool, LoggingError> {
    match &config.log_dir {
        Some(dir) => init_logging(config.level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Initializes core logging with level and directory.
///
/// # Errors
/// - `UnsupportedLevel` / `InvalidLogDir` on bad input.
/// - `CreateDir` / `Backend` when the logger cannot start.
/// - `Conflict` when already initialized with different settings.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(&log_dir.to_string_lossy())?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, &log_dir))?;
    ensure_same_settings(state, level, &log_dir)
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

pub(crate) fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::InvalidLogDir(
            "log_dir cannot be empty".to_string(),
        ));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::InvalidLogDir(format!(
            "log_dir must be an absolute path, got `{trimmed}`"
        )));
    }
    Ok(path.to_path_buf())
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::CreateDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(LoggingError::Backend)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
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
        .start()
        .map_err(LoggingError::Backend)?;

    install_panic_hook_once();

    info!(
        "event=core_init module=core status=ok level={level} log_dir={} version={}",
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

fn ensure_same_settings(
    state: &LoggingState,
    level: &'static str,
    log_dir: &Path,
) -> Result<(), LoggingError> {
    if state.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            setting: "directory",
            active: state.log_dir.display().to_string(),
            requested: log_dir.display().to_string(),
        });
    }
    if state.level != level {
        return Err(LoggingError::Conflict {
            setting: "level",
            active: state.level.to_string(),
            requested: level.to_string(),
        });
    }
    Ok(())
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payload may echo user input; strip newlines and cap length.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!("event=panic_captured module=core status=error location={location} payload={payload}");
        previous_hook(panic_info);
    }));
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
