//! Command-line interface for tictactoe.

use clap::Parser;
use std::path::PathBuf;
use tictactoe::ConfigOverrides;

/// Tic-tac-toe in the terminal, with an optional CPU opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with an optional CPU opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start with the CPU playing O
    #[arg(long)]
    pub cpu: bool,

    /// Name for player X
    #[arg(long)]
    pub player_x: Option<String>,

    /// Name for player O
    #[arg(long)]
    pub player_o: Option<String>,

    /// CPU thinking delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the CPU's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write logs
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags that override the config file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cpu_enabled: self.cpu.then_some(true),
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            cpu_delay_ms: self.delay_ms,
            seed: self.seed,
            log_file: self.log_file.clone(),
        }
    }
}
