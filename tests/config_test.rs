//! Tests for loading and overriding configuration.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tictactoe::{AppConfig, ConfigOverrides, Mark, Session};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let config = AppConfig::load(None).unwrap();
    assert!(!*config.cpu_enabled());
    assert_eq!(config.cpu_delay(), Duration::from_millis(250));
    assert_eq!(config.log_file(), Path::new("tictactoe.log"));
    assert_eq!(config.seed(), &None);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("cpu_enabled = true\nplayer_x = \"Ada\"\n");
    let config = AppConfig::load(Some(file.path())).unwrap();

    assert!(*config.cpu_enabled());
    assert_eq!(config.player_x(), "Ada");
    assert_eq!(config.player_o(), "");
    assert_eq!(*config.cpu_delay_ms(), 250);
}

#[test]
fn test_unknown_key_rejected() {
    let err = AppConfig::from_toml("cpu = true").unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_reports_read_error() {
    let err = AppConfig::from_file("/nonexistent/tictactoe.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_overrides_win_over_file() {
    let file = write_config("cpu_delay_ms = 900\nplayer_o = \"Grace\"\nseed = 1\n");
    let config = AppConfig::load(Some(file.path()))
        .unwrap()
        .with_overrides(ConfigOverrides {
            cpu_enabled: Some(true),
            cpu_delay_ms: Some(0),
            log_file: Some(PathBuf::from("other.log")),
            ..Default::default()
        });

    assert!(*config.cpu_enabled());
    assert_eq!(config.cpu_delay(), Duration::ZERO);
    assert_eq!(config.player_o(), "Grace");
    assert_eq!(config.seed(), &Some(1));
    assert_eq!(config.log_file(), Path::new("other.log"));
}

#[test]
fn test_carry_over_seeds_first_game() {
    let config = AppConfig::from_toml("cpu_enabled = true\nplayer_x = \"Ada\"\nplayer_o = \"Grace\"")
        .unwrap();
    let session = Session::new(config.carry_over(), config.rng());

    assert_eq!(session.state().label(Mark::X), "Ada");
    assert_eq!(session.state().label(Mark::O), "CPU");
    assert_eq!(session.state().names().get(Mark::O), "Grace");
}

#[test]
fn test_same_seed_same_cpu_game() {
    let config = AppConfig::from_toml("cpu_enabled = true\nseed = 42").unwrap();
    let play = |config: &AppConfig| {
        let mut session = Session::new(config.carry_over(), config.rng());
        let mut moves = Vec::new();
        for index in [1, 3, 5, 7] {
            if let Ok(Some(ticket)) = session.human_move(index) {
                moves.push(format!("{:?}", session.resolve_cpu_move(ticket)));
            }
        }
        moves
    };
    assert_eq!(play(&config), play(&config));
}
