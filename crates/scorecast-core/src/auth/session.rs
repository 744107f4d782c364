use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// The feed issues admin tokens valid for an hour.
const TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Re-authenticate this many minutes before the token lapses, so admin
/// actions never hit a 401 mid-session.
const REFRESH_BUFFER_MINUTES: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    /// Wrap a freshly issued token with its expiry stamp.
    pub fn new(token: String, username: String) -> Self {
        Self {
            token,
            username,
            expires_at: Utc::now() + Duration::minutes(TOKEN_LIFETIME_MINUTES),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// True once the token is inside the refresh window.
    pub fn needs_refresh(&self) -> bool {
        Utc::now() > self.expires_at - Duration::minutes(REFRESH_BUFFER_MINUTES)
    }

    /// Minutes remaining until expiry, floored at zero for display.
    pub fn minutes_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_minutes().max(0)
    }
}

/// Admin session persisted under the cache directory, so a restarted
/// board keeps its token until the feed expires it.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load the session from disk. Returns true when a live session
    /// was restored; an expired file is left in place and ignored.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(false);
        }

        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        let data: SessionData =
            serde_json::from_str(&contents).context("Failed to parse session file")?;

        if data.is_expired() {
            return Ok(false);
        }

        self.data = Some(data);
        Ok(true)
    }

    pub fn save(&self) -> Result<()> {
        let Some(ref data) = self.data else {
            return Ok(());
        };

        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(data)?)?;
        Ok(())
    }

    /// Drop the in-memory session and its file.
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Replace the session after a fresh login.
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// A session exists and its token has not lapsed.
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_expired()).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiring_in(minutes: i64) -> SessionData {
        SessionData {
            token: "tok".to_string(),
            username: "admin".to_string(),
            expires_at: Utc::now() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_fresh_session_is_valid() {
        let data = SessionData::new("tok".to_string(), "admin".to_string());
        assert!(!data.is_expired());
        assert!(!data.needs_refresh());
        assert!(data.minutes_until_expiry() > 50);
    }

    #[test]
    fn test_session_needs_refresh_near_expiry() {
        let data = expiring_in(3);
        assert!(!data.is_expired());
        assert!(data.needs_refresh());
    }

    #[test]
    fn test_session_expired() {
        let data = expiring_in(-1);
        assert!(data.is_expired());
        assert!(data.needs_refresh());
        assert_eq!(data.minutes_until_expiry(), 0);
    }
}
