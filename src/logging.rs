use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use thiserror::Error;

/// Settings for the diagnostic log
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to append log events to.  If unset, nothing is logged.
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level of event to record
    pub(crate) level: LogLevel,
}

/// Log level names are matched case-insensitively, both on the command line
/// and in the configuration file.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(try_from = "String")]
pub(crate) enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<LogLevel, ParseLogLevelError> {
        LogLevel::ALL
            .into_iter()
            .find(|lv| lv.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLogLevelError(s.to_owned()))
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ParseLogLevelError;

    fn try_from(value: String) -> Result<LogLevel, ParseLogLevelError> {
        value.parse()
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> tracing::Level {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid log level {0:?}; expected one of error, warn, info, debug, trace")]
pub(crate) struct ParseLogLevelError(String);

/// Install a global subscriber that appends events to `config.file`.
///
/// The terminal belongs to the game, so if no file is configured, no
/// subscriber is installed and all events are discarded.  Returns `true` if
/// a subscriber was installed.
///
/// # Errors
///
/// Returns `Err` if the log file or its parent directory could not be
/// created, or if a global subscriber has already been set.
pub(crate) fn init(config: &LogConfig) -> Result<bool, LogError> {
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::Mkdir)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::Open)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::from(config.level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(true)
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to create log directory")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install log subscriber")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}
