//! Runtime configuration: defaults, then environment, then command-line flags.

use crate::core::constants::{DEFAULT_WEATHER_INTERVAL_SECONDS, GUEST_OWNER};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const OWNER_ENV: &str = "LAKESIDE_OWNER";
pub const DATA_DIR_ENV: &str = "LAKESIDE_DATA_DIR";
pub const WEATHER_SECS_ENV: &str = "LAKESIDE_WEATHER_SECS";

/// Settings for one game run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Owner id all records are stored under
    pub owner: String,
    /// Directory holding the JSON blobs and the log file
    pub data_dir: PathBuf,
    /// How long each weather lasts
    pub weather_interval: Duration,
    /// Skip identity and persistence entirely
    pub offline: bool,
    /// Delete saved progress before starting
    pub reset: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            owner: GUEST_OWNER.to_string(),
            data_dir: default_data_dir(),
            weather_interval: Duration::from_secs(DEFAULT_WEATHER_INTERVAL_SECONDS),
            offline: false,
            reset: false,
        }
    }
}

/// Platform data directory, or `./.lakeside` when none can be determined.
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "lakeside")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".lakeside"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("{flag} expects a whole number of seconds, got '{value}'")]
    InvalidSeconds { flag: &'static str, value: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(GameConfig),
    Version,
    Help,
}

fn parse_seconds(flag: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSeconds {
            flag,
            value: value.to_string(),
        })
}

impl GameConfig {
    /// Applies `LAKESIDE_*` overrides read through `env`.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(owner) = env(OWNER_ENV) {
            self.owner = owner;
        }
        if let Some(dir) = env(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = env(WEATHER_SECS_ENV) {
            self.weather_interval = parse_seconds(WEATHER_SECS_ENV, &secs)?;
        }
        Ok(())
    }
}

/// Parses CLI arguments (without the program name) on top of env overrides.
pub fn parse_args(
    args: &[String],
    env: impl Fn(&str) -> Option<String>,
) -> Result<Command, ConfigError> {
    let mut config = GameConfig::default();
    config.apply_env(env)?;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--offline" => config.offline = true,
            "--reset" => config.reset = true,
            "--owner" => {
                i += 1;
                let value = args.get(i).ok_or(ConfigError::MissingValue("--owner"))?;
                config.owner = value.clone();
            }
            "--data-dir" => {
                i += 1;
                let value = args.get(i).ok_or(ConfigError::MissingValue("--data-dir"))?;
                config.data_dir = PathBuf::from(value);
            }
            "--weather-secs" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or(ConfigError::MissingValue("--weather-secs"))?;
                config.weather_interval = parse_seconds("--weather-secs", value)?;
            }
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
        i += 1;
    }

    Ok(Command::Play(config))
}

pub fn usage() -> &'static str {
    "Lakeside - Idle Fishing on the Dock\n\
     \n\
     Usage: lakeside [OPTIONS]\n\
     \n\
     Options:\n\
     \x20 --owner EMAIL       Owner id for saved progress (env: LAKESIDE_OWNER)\n\
     \x20 --data-dir PATH     Where progress and logs live (env: LAKESIDE_DATA_DIR)\n\
     \x20 --weather-secs N    Seconds per weather (default: 150, env: LAKESIDE_WEATHER_SECS)\n\
     \x20 --offline           Play without loading or saving anything\n\
     \x20 --reset             Delete saved progress before starting\n\
     \x20 --version           Show version information\n\
     \x20 --help              Show this help message\n\
     \n\
     Controls:\n\
     \x20 Left/Right (h/l)    Walk along the dock\n\
     \x20 Down                Sit down / stand up\n\
     \x20 Space               Cast line / reel in\n\
     \x20 c / a               Fish collection / achievements\n\
     \x20 Esc / Enter         Close overlay or catch notice\n\
     \x20 q                   Quit"
}
