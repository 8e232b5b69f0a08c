use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_learner.yml";
const DEFAULT_CONFIG_FILE_NAME: &str = ".blackjack_learner.yml";

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Cannot read config file {path}: {source}")]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },
    #[error("Cannot parse config file: {0}")]
    ParseConfig(#[from] serde_yaml::Error),
    #[error("Cannot write report: {0}")]
    WriteReport(serde_yaml::Error),
    #[error("This should be a path rather than a directory: {0}")]
    ConfigIsDirectory(String),
    #[error("Cannot find home directory")]
    NoHomeDirectory,
    #[error("Cannot initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Game(#[from] blackjack_learner::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub explorer: ConfigExplorer,
    pub console: ConfigConsole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigExplorer {
    /// Number of hands to explore. Negative means no limit.
    pub hands: i64,
    pub seed: Option<u64>,
}

impl Default for ConfigExplorer {
    fn default() -> Self {
        ConfigExplorer {
            hands: 10_000,
            seed: None,
        }
    }
}

impl ConfigExplorer {
    pub fn hand_limit(&self) -> blackjack_learner::HandLimit {
        self.hands.into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigConsole {
    pub seed: Option<u64>,
}

/// Builds a game, seeded when a seed is configured.
pub fn new_game(seed: Option<u64>) -> blackjack_learner::Game {
    match seed {
        Some(seed) => blackjack_learner::Game::with_seed(seed),
        None => blackjack_learner::Game::new(),
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &Path) -> Result<Config, DriverError> {
    if filename.is_dir() {
        return Err(DriverError::ConfigIsDirectory(
            filename.display().to_string(),
        ));
    }
    let file_content = fs::read_to_string(filename).map_err(|source| DriverError::ReadConfig {
        path: filename.display().to_string(),
        source,
    })?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, DriverError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Loads the config named on the command line. The default path may be missing, in which case
/// built-in defaults are used; an explicit path must exist.
pub fn load_config(config_arg: &str) -> Result<Config, DriverError> {
    if config_arg != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(Path::new(config_arg));
    }
    let config_file_path = default_config_path()?;
    if !config_file_path.exists() {
        log::info!(
            "{} not found, using default settings",
            config_file_path.display()
        );
        return Ok(Config::default());
    }
    parse_config_from_file(&config_file_path)
}

fn default_config_path() -> Result<PathBuf, DriverError> {
    let home_dir = home::home_dir().ok_or(DriverError::NoHomeDirectory)?;
    Ok(home_dir.join(DEFAULT_CONFIG_FILE_NAME))
}

/// The learned policy as a YAML list of `PolicyEntry` rows.
pub fn yaml_report(learner: &blackjack_learner::Learner) -> Result<String, DriverError> {
    serde_yaml::to_string(&learner.report()).map_err(DriverError::WriteReport)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Logs to stderr at the given level, leaving stdout to the program's output.
pub fn init_logger(level: LogLevel) -> Result<(), DriverError> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level.into(),
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
