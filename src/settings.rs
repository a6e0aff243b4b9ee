//! Game settings
//!
//! Layered: built-in defaults, then a JSON object in the
//! `BRICK_BREAKER_SETTINGS` environment variable, then command line flags.
//! Bad values are logged and skipped, never fatal.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_INTERVAL_MS;
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Difficulty to start with; the menu asks when unset
    pub difficulty: Option<Difficulty>,
    /// RNG seed for board generation; derived from the clock when unset
    pub seed: Option<u64>,
    /// Fixed simulation tick interval
    pub tick_interval_ms: u64,
    /// Show the key help line under the play field
    pub show_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: None,
            seed: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            show_controls: true,
        }
    }
}

impl Settings {
    /// Environment variable holding a JSON settings object
    pub const ENV_KEY: &'static str = "BRICK_BREAKER_SETTINGS";

    /// Load settings from the environment and process arguments
    pub fn load() -> Self {
        let mut settings = match std::env::var(Self::ENV_KEY) {
            Ok(json) => Self::from_json(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        settings.apply_args(std::env::args().skip(1));
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Parse a JSON settings object; missing keys take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring {}: {}", Self::ENV_KEY, e);
                None
            }
        }
    }

    /// Overlay command line flags
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let (name, inline_value) = match flag.split_once('=') {
                Some((name, value)) => (name.to_string(), Some(value.to_string())),
                None => (flag.clone(), None),
            };

            match name.as_str() {
                "--difficulty" | "-d" | "--seed" | "-s" | "--tick-ms" => {
                    let Some(value) = inline_value.or_else(|| args.next()) else {
                        log::warn!("Missing value for {}", name);
                        continue;
                    };
                    self.apply_flag(&name, &value);
                }
                "--no-controls" => self.show_controls = false,
                _ => log::warn!("Unknown argument: {}", flag),
            }
        }
    }

    fn apply_flag(&mut self, name: &str, value: &str) {
        match name {
            "--difficulty" | "-d" => match Difficulty::from_str(value) {
                Some(difficulty) => self.difficulty = Some(difficulty),
                None => log::warn!("Unknown difficulty '{}', expected easy/medium/hard", value),
            },
            "--seed" | "-s" => match value.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(e) => log::warn!("Invalid seed '{}': {}", value, e),
            },
            "--tick-ms" => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => self.tick_interval_ms = ms,
                _ => log::warn!("Invalid tick interval '{}', keeping {} ms", value, self.tick_interval_ms),
            },
            _ => {}
        }
    }

    /// Tick interval as a duration (at least 1 ms)
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Configured seed, or one derived from the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
