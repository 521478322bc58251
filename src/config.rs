//! Application configuration loaded from TOML and overridden by CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tictactoe_core::{CarryOver, GameRng, PlayerNames};
use tracing::{debug, info, instrument};

/// Settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Start with the CPU playing O.
    cpu_enabled: bool,

    /// Name entered for X (blank means "Player X").
    player_x: String,

    /// Name entered for O (blank means "Player O").
    player_o: String,

    /// CPU thinking delay in milliseconds.
    cpu_delay_ms: u64,

    /// Fixed seed for the CPU's random choices.
    seed: Option<u64>,

    /// Where tracing output goes.
    log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cpu_enabled: false,
            player_x: String::new(),
            player_o: String::new(),
            cpu_delay_ms: 250,
            seed: None,
            log_file: PathBuf::from("tictactoe.log"),
        }
    }
}

/// Values supplied on the command line; `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Force the CPU on.
    pub cpu_enabled: Option<bool>,
    /// Name for X.
    pub player_x: Option<String>,
    /// Name for O.
    pub player_o: Option<String>,
    /// CPU delay in milliseconds.
    pub cpu_delay_ms: Option<u64>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(cpu_enabled = config.cpu_enabled, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(cpu_enabled) = overrides.cpu_enabled {
            self.cpu_enabled = cpu_enabled;
        }
        if let Some(name) = overrides.player_x {
            self.player_x = name;
        }
        if let Some(name) = overrides.player_o {
            self.player_o = name;
        }
        if let Some(ms) = overrides.cpu_delay_ms {
            self.cpu_delay_ms = ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(path) = overrides.log_file {
            self.log_file = path;
        }
        self
    }

    /// Configuration for the first game.
    pub fn carry_over(&self) -> CarryOver {
        CarryOver {
            cpu_enabled: self.cpu_enabled,
            names: PlayerNames::new(self.player_x.clone(), self.player_o.clone()),
        }
    }

    /// CPU thinking delay.
    pub fn cpu_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_delay_ms)
    }

    /// Random source for the CPU, seeded if a seed is configured.
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
