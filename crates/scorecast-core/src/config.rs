//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the feed URL, roster override, polling and rotation
//! intervals, and the last used username.
//!
//! Configuration is stored at `~/.config/scorecast/config.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::roster::Roster;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "scorecast";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default results feed for a board running next to its own feed service
pub const DEFAULT_FEED_URL: &str = "http://localhost:8080/api/v1";

/// Seconds between feed polls.
/// 10s keeps the board lively without hammering a small feed service.
const DEFAULT_POLL_SECS: u64 = 10;

/// Seconds each event stays on the presentation carousel.
const DEFAULT_ROTATION_SECS: u64 = 4;

/// Seconds each event stays in the overview spotlight.
const DEFAULT_SPOTLIGHT_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed_url: String,
    /// Optional roster file replacing the built-in school table
    pub roster_file: Option<PathBuf>,
    pub poll_secs: u64,
    pub rotation_secs: u64,
    pub spotlight_secs: u64,
    pub last_username: Option<String>,
    pub offline_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            roster_file: None,
            poll_secs: DEFAULT_POLL_SECS,
            rotation_secs: DEFAULT_ROTATION_SECS,
            spotlight_secs: DEFAULT_SPOTLIGHT_SECS,
            last_username: None,
            offline_mode: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve the roster: the configured file when one is set and
    /// readable, the built-in table otherwise.
    pub fn roster(&self) -> Roster {
        if let Some(ref path) = self.roster_file {
            match Roster::from_file(path) {
                Ok(roster) => return roster,
                Err(e) => {
                    warn!(error = %e, "Falling back to built-in roster");
                }
            }
        }
        Roster::builtin()
    }

    /// Poll interval, clamped to at least a second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }

    /// Presentation carousel interval, clamped to at least a second.
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_secs.max(1))
    }

    /// Overview spotlight interval, clamped to at least a second.
    pub fn spotlight_interval(&self) -> Duration {
        Duration::from_secs(self.spotlight_secs.max(1))
    }
}
