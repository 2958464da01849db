//! Logging bootstrap for hosts that do not install their own logger.
//!
//! # Responsibility
//! - Start one `flexi_logger` backend per process, writing rolling files
//!   when a directory is configured and stderr otherwise.
//! - Keep statement text out of diagnostics; events carry names only.
//!
//! # Invariants
//! - Initialization is idempotent for an identical `LogConfig`.
//! - A second, different configuration is rejected, never applied.
//! - Initialization must not panic.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "queryrepo";
const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Logger settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`, case-insensitive.
    pub level: String,
    /// Absolute directory for rolling files; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    /// Returns a copy with the level lowercased and `warning` mapped to `warn`.
    ///
    /// # Errors
    /// - Unsupported level names.
    /// - Relative log directories.
    fn normalized(&self) -> Result<Self, String> {
        let level = normalize_level(&self.level)?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                ));
            }
        }
        if self.max_files == 0 {
            return Err("max_files must be at least 1".to_string());
        }

        Ok(Self {
            level: level.to_string(),
            ..self.clone()
        })
    }
}

/// Starts the process logger.
///
/// Returns a human-readable message when the configuration is invalid,
/// conflicts with the active one, or the backend fails to start.
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let requested = config.normalized()?;

    let active = ACTIVE.get_or_try_init(|| start_logger(&requested))?;
    if active.config != requested {
        return Err(format!(
            "logging already initialized with level `{}` at {}; refusing to switch to level `{}` at {}",
            active.config.level,
            describe_target(&active.config),
            requested.level,
            describe_target(&requested)
        ));
    }
    Ok(())
}

/// Returns the active configuration, or `None` before `init_logging`.
pub fn logging_status() -> Option<LogConfig> {
    ACTIVE.get().map(|active| active.config.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LogConfig) -> Result<ActiveLogger, String> {
    let logger = Logger::try_with_str(&config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?;

    let logger = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(config.max_file_bytes),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(config.max_files),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    };

    let handle = logger
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;
    install_panic_hook();

    info!(
        "event=logging_init module=logging status=ok version={} level={} target={}",
        env!("CARGO_PKG_VERSION"),
        config.level,
        describe_target(config)
    );
    Ok(ActiveLogger {
        config: config.clone(),
        _handle: handle,
    })
}

fn describe_target(config: &LogConfig) -> String {
    match &config.log_dir {
        Some(dir) => format!("`{}`", dir.display()),
        None => "stderr".to_string(),
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Payloads may embed statement text; keep them on one line and short.
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous(info);
    }));
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    let mut truncated = single_line.chars().take(max_chars).collect::<String>();
    if single_line.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
