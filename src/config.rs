//! Runtime configuration read from the environment.

use crate::logic::{InvalidPlayWindow, PlayWindow};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Hours fixtures may be scheduled in.
    pub play_window: PlayWindow,
    /// Venue pool CSV (`country,ground`) loaded at startup, if set.
    pub venues_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            play_window: PlayWindow::default(),
            venues_csv: None,
        }
    }
}

impl Config {
    /// Env: HOST, PORT, PLAY_WINDOW_START, PLAY_WINDOW_END, PLAY_WINDOW_RESET, VENUES_CSV.
    pub fn from_env() -> Result<Self, InvalidPlayWindow> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InvalidPlayWindow> {
        let defaults = Self::default();
        let window = defaults.play_window;
        let play_window = PlayWindow::new(
            parse_or(&lookup, "PLAY_WINDOW_START", window.start_hour()),
            parse_or(&lookup, "PLAY_WINDOW_END", window.end_hour()),
            parse_or(&lookup, "PLAY_WINDOW_RESET", window.reset_hour()),
        )?;
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            play_window,
            venues_csv: lookup("VENUES_CSV")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparseable {key}={raw:?}");
            default
        }),
        None => default,
    }
}
