use crate::game::{Pace, PaceError};
use crate::logging::LogConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Speed settings for each game
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings for the diagnostic log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("applesnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    pub(crate) pace: Pace,
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawGameConfig {
    #[serde(rename = "initial-speed-ms")]
    initial_speed: Option<u64>,
    #[serde(rename = "speed-increment-ms")]
    speed_increment: Option<u64>,
    #[serde(rename = "minimum-speed-ms")]
    minimum_speed: Option<u64>,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = PaceError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, PaceError> {
        let defaults = Pace::default();
        let ms = |v: Option<u64>, default: Duration| v.map_or(default, Duration::from_millis);
        let pace = Pace::new(
            ms(value.initial_speed, defaults.initial()),
            ms(value.speed_increment, defaults.increment()),
            ms(value.minimum_speed, defaults.floor()),
        )?;
        Ok(GameConfig { pace })
    }
}

/// Error returned by [`Config::load()`].  An invalid `[game]` table is
/// reported as a parse error wrapping a [`PaceError`].
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
