//! Application state management for scorecast.
//!
//! This module contains the core `App` struct that manages all application state,
//! including UI state, the live event list and its derived standings, session
//! management, and background feed coordination.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use scorecast_core::auth::{CredentialStore, Session, SessionData};
use scorecast_core::cache::CacheManager;
use scorecast_core::feed::FeedClient;
use scorecast_core::live::{FeedUpdate, LiveEvents};
use scorecast_core::models::{
    EventCategory, EventRecord, EventSortColumn, GradeLevel, WinnerEntry,
};
use scorecast_core::{Carousel, Config, Roster, StandingRow, Standings, StatsSummary};

use crate::utils::{cmp_ignore_case, contains_ignore_case};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background feed message channel.
/// The poll loop sends at most one snapshot per interval, 32 leaves headroom
/// for manual refreshes landing in the same window.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
/// Feed admin usernames are short handles, 50 chars covers email-style logins too.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down.
/// 10 rows provides a good balance of speed without losing context.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Minimum seconds between automatic session refresh attempts.
/// The refresh window opens 5 minutes before expiry, 60s spacing allows
/// a few tries without hammering the feed when it is down.
const SESSION_REFRESH_RETRY_SECS: u64 = 60;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Standings,
    Events,
    Overview,
    Presentation,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Standings => "Standings",
            Tab::Events => "Events",
            Tab::Overview => "Overview",
            Tab::Presentation => "Presentation",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Standings => Tab::Events,
            Tab::Events => Tab::Overview,
            Tab::Overview => Tab::Presentation,
            Tab::Presentation => Tab::Standings,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Standings => Tab::Presentation,
            Tab::Events => Tab::Standings,
            Tab::Overview => Tab::Events,
            Tab::Presentation => Tab::Overview,
        }
    }
}

/// Focus within the Events tab (list pane vs winner detail pane)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    Quitting,
}

/// Which field has focus in the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state
pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub client: FeedClient,
    pub cache: CacheManager,
    pub live: LiveEvents,
    pub roster: Roster,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,
    pub search_query: String,
    pub event_sort_column: EventSortColumn,
    pub event_sort_ascending: bool,
    pub category_filter: Option<EventCategory>,
    pub grade_filter: Option<GradeLevel>,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Selection indices
    pub standings_selection: usize,
    pub event_selection: usize,
    pub winner_selection: usize,

    // Live data and the views derived from it
    pub events: Vec<EventRecord>,
    pub standings: Standings,
    pub stats: StatsSummary,
    pub last_snapshot_at: Option<DateTime<Utc>>,

    // Rotation state for the Presentation and Overview tabs
    pub slide_carousel: Carousel,
    pub spotlight_carousel: Carousel,

    // Background feed channel
    feed_rx: mpsc::Receiver<FeedUpdate>,
    feed_tx: mpsc::Sender<FeedUpdate>,

    // Channel for refreshed sessions coming back from background logins
    session_rx: mpsc::Receiver<SessionData>,
    session_tx: mpsc::Sender<SessionData>,

    // Throttle for automatic session refresh attempts
    last_session_refresh: Option<Instant>,

    // Status message
    pub status_message: Option<String>,

    // Offline mode - when true, only use cached data
    pub offline_mode: bool,
}

impl App {
    /// Create a new application instance
    pub async fn new() -> Result<Self> {
        debug!("App::new() starting");
        let mut config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        // Environment override for the feed URL (useful at venues with
        // a scoreboard server on the local network)
        if let Ok(url) = std::env::var("SCORECAST_FEED_URL") {
            if !url.is_empty() {
                config.feed_url = url;
            }
        }
        debug!(feed_url = %config.feed_url, "Config loaded");

        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        debug!(?cache_dir, "Cache directory configured");

        // Load session from disk if it exists
        let mut session = Session::new(cache_dir.clone());
        let load_result = session.load();
        debug!(?load_result, has_data = session.data.is_some(), "Session loaded");

        let mut client = FeedClient::new(config.feed_url.clone())?;

        // If we have a valid session, set the token on the feed client
        if let Some(ref data) = session.data {
            debug!(expired = data.is_expired(), "Session found");
            if !data.is_expired() {
                client.set_token(data.token.clone());
                debug!("Token set on feed client");
            }
        } else {
            debug!("No session data found");
        }

        let cache = CacheManager::new(cache_dir)?;
        let roster = config.roster();
        let live = LiveEvents::new(client.clone(), config.poll_interval());

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let (session_tx, session_rx) = mpsc::channel(1);

        // Get credentials from env vars or config
        let login_username = std::env::var("SCORECAST_USERNAME")
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();

        let login_password = std::env::var("SCORECAST_PASSWORD").unwrap_or_default();

        let offline_mode = config.offline_mode;
        let slide_carousel = Carousel::new(config.rotation_interval());
        let spotlight_carousel = Carousel::new(config.spotlight_interval());

        Ok(Self {
            config,
            session,
            client,
            cache,
            live,
            roster,

            state: AppState::Normal,
            current_tab: Tab::Standings,
            focus: Focus::List,
            search_query: String::new(),
            event_sort_column: EventSortColumn::Date,
            event_sort_ascending: true,
            category_filter: None,
            grade_filter: None,

            login_username,
            login_password,
            login_focus: LoginFocus::Username,
            login_error: None,

            standings_selection: 0,
            event_selection: 0,
            winner_selection: 0,

            events: Vec::new(),
            standings: Standings::default(),
            stats: StatsSummary::default(),
            last_snapshot_at: None,

            slide_carousel,
            spotlight_carousel,

            feed_rx: rx,
            feed_tx: tx,

            session_rx,
            session_tx,

            last_session_refresh: None,

            status_message: None,
            offline_mode,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check if the user is authenticated with a valid session.
    /// Viewing is public; this only gates the admin actions.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_valid()
    }

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) -> Result<()> {
        let username = self.login_username.clone();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return Err(anyhow::anyhow!("Username and password required"));
        }

        self.login_error = None;

        match self.client.authenticate(&username, &password).await {
            Ok(session_data) => {
                if let Err(e) = CredentialStore::store(&username, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_username = Some(username);

                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.session.update(session_data);

                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                if let Some(ref data) = self.session.data {
                    self.client.set_token(data.token.clone());
                }

                self.login_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                // Provide user-friendly error messages based on error type
                let text = e.to_string().to_lowercase();
                let user_message = if text.contains("unauthorized") || text.contains("access denied") {
                    "Invalid username or password".to_string()
                } else if text.contains("rate limited") {
                    "Too many attempts. Wait a moment and try again.".to_string()
                } else if text.contains("network") || text.contains("connect") {
                    "Unable to connect to the feed. Check the URL and your connection.".to_string()
                } else if text.contains("timed out") || text.contains("timeout") {
                    "Connection timed out. Please try again.".to_string()
                } else {
                    format!("Login failed: {}", e)
                };
                self.login_error = Some(user_message);
                Err(e)
            }
        }
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Try to authenticate without showing the login form, using the password
    /// from the environment or the OS keychain. Returns true on success.
    pub async fn try_auto_login(&mut self) -> bool {
        if self.session.is_valid() {
            return true;
        }
        if self.login_username.is_empty() {
            return false;
        }

        if self.login_password.is_empty() {
            if !CredentialStore::has_credentials(&self.login_username) {
                return false;
            }
            match CredentialStore::get_password(&self.login_username) {
                Ok(p) => self.login_password = p,
                Err(e) => {
                    debug!(error = %e, "Stored password unavailable");
                    return false;
                }
            }
        }

        self.attempt_login().await.is_ok()
    }

    /// Re-authenticate before the token lapses so admin actions keep working.
    /// Silent no-op without stored credentials. The login runs on a spawned
    /// task so a slow feed never stalls rendering; the refreshed session
    /// comes back through `check_background_tasks`.
    pub fn maybe_refresh_session(&mut self) {
        let minutes_left = match self.session.data {
            Some(ref data) if data.needs_refresh() => data.minutes_until_expiry(),
            _ => return,
        };

        if let Some(at) = self.last_session_refresh {
            if at.elapsed() < Duration::from_secs(SESSION_REFRESH_RETRY_SECS) {
                return;
            }
        }
        self.last_session_refresh = Some(Instant::now());

        let username = match self.config.last_username.clone() {
            Some(u) => u,
            None => return,
        };

        if !CredentialStore::has_credentials(&username) {
            return;
        }

        let password = match CredentialStore::get_password(&username) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "Cannot refresh session without a stored password");
                return;
            }
        };

        spawn_session_refresh(
            self.client.clone(),
            username,
            password,
            minutes_left,
            self.session_tx.clone(),
        );
    }

    /// Fold a background-refreshed session into the app state
    fn apply_refreshed_session(&mut self, data: SessionData) {
        self.session.update(data);
        if let Err(e) = self.session.save() {
            warn!(error = %e, "Failed to save refreshed session");
        }
        if let Some(ref data) = self.session.data {
            self.client.set_token(data.token.clone());
        }
    }

    /// Log out: clear the session and remove the stored password.
    pub fn logout(&mut self) {
        if let Some(username) = self.config.last_username.clone() {
            if let Err(e) = CredentialStore::delete(&username) {
                debug!(error = %e, "No stored credentials to remove");
            }
        }

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }

        // Rebuild the client so the old token is gone
        match FeedClient::new(self.config.feed_url.clone()) {
            Ok(client) => self.client = client,
            Err(e) => warn!(error = %e, "Failed to rebuild feed client"),
        }

        self.login_password.clear();
        self.status_message = Some("Logged out".to_string());
        info!("Logged out");
    }

    /// Session summary for the status bar, when logged in.
    pub fn session_status(&self) -> Option<String> {
        let data = self.session.data.as_ref()?;
        if data.is_expired() {
            return None;
        }
        Some(format!("{} ({}m left)", data.username, data.minutes_until_expiry()))
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Load the last event snapshot from cache so the board renders instantly
    pub fn load_from_cache(&mut self) {
        match self.cache.load_events() {
            Ok(Some(cached)) => {
                info!(count = cached.data.len(), age = %cached.age_display(), "Loaded events from cache");
                self.events = cached.data;
                self.recompute();
            }
            Ok(None) => debug!("No cached events"),
            Err(e) => warn!(error = %e, "Failed to load cached events"),
        }
    }

    /// Check if the cached snapshot is stale
    pub fn is_cache_stale(&self) -> bool {
        self.cache.events_stale()
    }

    /// Clear the cached event snapshot (admin action)
    pub fn clear_cache(&mut self) {
        if !self.is_authenticated() {
            self.status_message = Some("Log in to clear the cache".to_string());
            return;
        }

        match self.cache.clear_events() {
            Ok(()) => {
                info!("Event cache cleared");
                self.status_message = Some("Cache cleared".to_string());
            }
            Err(e) => {
                warn!(error = %e, "Failed to clear cache");
                self.status_message = Some(format!("Cache clear failed: {}", e));
            }
        }
    }

    // =========================================================================
    // Live Feed
    // =========================================================================

    /// Subscribe to the live feed
    pub fn start_live(&mut self) {
        if self.offline_mode {
            debug!("Offline mode, not subscribing to feed");
            return;
        }
        self.live.subscribe(self.feed_tx.clone());
        self.status_message = Some("Live updates on".to_string());
    }

    /// Enter offline mode - stop polling and work from cache only
    pub fn go_offline(&mut self) {
        info!("Entering offline mode");
        self.live.unsubscribe();
        self.offline_mode = true;
        self.config.offline_mode = true;
        let _ = self.config.save();
        self.status_message = Some("Offline - showing cached standings".to_string());
    }

    /// Exit offline mode and resume polling
    pub fn go_online(&mut self) {
        info!("Leaving offline mode");
        self.offline_mode = false;
        self.config.offline_mode = false;
        let _ = self.config.save();
        self.start_live();
    }

    /// Fetch the feed once, outside the polling schedule
    pub fn request_refresh(&mut self) {
        if self.offline_mode {
            self.status_message = Some("Offline - refresh disabled".to_string());
            return;
        }

        let client = self.client.clone();
        let tx = self.feed_tx.clone();

        tokio::spawn(async move {
            match client.fetch_events().await {
                Ok(events) => {
                    if tx.send(FeedUpdate::Snapshot(events)).await.is_err() {
                        debug!("Feed receiver dropped before refresh completed");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Manual refresh failed");
                    let _ = tx.send(FeedUpdate::Unavailable(e.to_string())).await;
                }
            }
        });

        self.status_message = Some("Refreshing...".to_string());
    }

    /// Check for feed updates and refreshed sessions from background tasks.
    /// Called on every iteration of the main event loop.
    pub fn check_background_tasks(&mut self) {
        // Collect all pending updates first to avoid borrow conflicts
        let mut updates = Vec::new();
        while let Ok(update) = self.feed_rx.try_recv() {
            updates.push(update);
        }

        for update in updates {
            self.process_feed_update(update);
        }

        while let Ok(data) = self.session_rx.try_recv() {
            self.apply_refreshed_session(data);
        }
    }

    /// Fold a single feed update into the application state
    fn process_feed_update(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::Snapshot(events) => {
                debug!(count = events.len(), "Feed snapshot received");
                if let Err(e) = self.cache.save_events(&events) {
                    warn!(error = %e, "Failed to cache events");
                }
                self.events = events;
                self.last_snapshot_at = Some(Utc::now());
                self.recompute();
                self.status_message = None;
            }
            FeedUpdate::Unavailable(reason) => {
                debug!(reason = %reason, "Feed unavailable");
                self.status_message = Some(format!("Feed unavailable: {}", reason));
            }
        }
    }

    /// Rebuild every derived view from the current event list.
    /// Standings, stats and carousel lengths all come from the same snapshot
    /// so no two tabs can disagree about the scores.
    fn recompute(&mut self) {
        self.standings = Standings::compute(&self.roster, &self.events);
        self.stats = StatsSummary::collect(&self.events, &self.standings);
        self.slide_carousel.set_len(self.events.len());
        self.spotlight_carousel.set_len(self.standings.scoring_rows().len());
        self.clamp_selections();
    }

    /// Keep selections in range after the lists change under them
    fn clamp_selections(&mut self) {
        let visible_events = self.get_sorted_events().len();
        if self.event_selection >= visible_events {
            self.event_selection = visible_events.saturating_sub(1);
        }

        let winners = self.selected_event_winners().len();
        if self.winner_selection >= winners {
            self.winner_selection = winners.saturating_sub(1);
        }

        let rows = self.standings.len();
        if self.standings_selection >= rows {
            self.standings_selection = rows.saturating_sub(1);
        }
    }

    // =========================================================================
    // Tabs and Rotation
    // =========================================================================

    /// Switch to a tab, starting or stopping the rotations it owns
    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        self.current_tab = tab;
        self.focus = Focus::List;

        let now = Instant::now();
        match tab {
            Tab::Presentation => {
                self.slide_carousel.start(now);
                self.spotlight_carousel.stop();
            }
            Tab::Overview => {
                self.spotlight_carousel.start(now);
                self.slide_carousel.stop();
            }
            _ => {
                self.slide_carousel.stop();
                self.spotlight_carousel.stop();
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.current_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.switch_tab(self.current_tab.prev());
    }

    /// Advance whichever rotation is running. Called from the event loop.
    pub fn tick_carousels(&mut self) {
        let now = Instant::now();
        self.slide_carousel.tick(now);
        self.spotlight_carousel.tick(now);
    }

    /// Pause or resume the presentation rotation
    pub fn toggle_rotation(&mut self) {
        if self.slide_carousel.is_running() {
            self.slide_carousel.stop();
            self.status_message = Some("Rotation paused".to_string());
        } else {
            self.slide_carousel.start(Instant::now());
            self.status_message = Some("Rotation resumed".to_string());
        }
    }

    /// Step the presentation forward by hand
    pub fn next_slide(&mut self) {
        self.slide_carousel.advance(Instant::now());
    }

    /// Step the presentation back by hand
    pub fn prev_slide(&mut self) {
        self.slide_carousel.rewind(Instant::now());
    }

    /// Event currently on the presentation slide
    pub fn current_slide_event(&self) -> Option<&EventRecord> {
        self.slide_carousel.index().and_then(|i| self.events.get(i))
    }

    /// School currently in the Overview spotlight (scoring schools only)
    pub fn current_spotlight(&self) -> Option<&StandingRow> {
        let rows = self.standings.scoring_rows();
        self.spotlight_carousel.index().and_then(|i| rows.get(i).copied())
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// Filter predicate shared by the Events tab list and its counts.
    /// `query` must already be lowercased.
    fn event_matches(
        event: &EventRecord,
        query: &str,
        category: Option<EventCategory>,
        grade: Option<GradeLevel>,
    ) -> bool {
        if !query.is_empty() {
            let name_hit = contains_ignore_case(&event.name, query);
            let school_hit = event
                .winners
                .iter()
                .any(|w| contains_ignore_case(&w.school, query));
            if !name_hit && !school_hit {
                return false;
            }
        }

        if let Some(want) = category {
            if event.category_parsed() != Some(want) {
                return false;
            }
        }

        if let Some(want) = grade {
            if event.grade_parsed() != Some(want) {
                return false;
            }
        }

        true
    }

    /// Get events filtered by search/category/grade and sorted by the current column
    pub fn get_sorted_events(&self) -> Vec<&EventRecord> {
        let query = self.search_query.to_lowercase();

        let mut sorted: Vec<&EventRecord> = self
            .events
            .iter()
            .filter(|e| Self::event_matches(e, &query, self.category_filter, self.grade_filter))
            .collect();

        sorted.sort_by(|a, b| {
            let name_cmp = |x: &EventRecord, y: &EventRecord| cmp_ignore_case(&x.name, &y.name);

            let cmp = match self.event_sort_column {
                EventSortColumn::Name => name_cmp(a, b),
                EventSortColumn::Date => {
                    let date_a = a.date.as_deref().unwrap_or("");
                    let date_b = b.date.as_deref().unwrap_or("");
                    date_a.cmp(date_b).then_with(|| name_cmp(a, b))
                }
                EventSortColumn::Category => {
                    let cat_a = a.category.as_deref().unwrap_or("");
                    let cat_b = b.category.as_deref().unwrap_or("");
                    cmp_ignore_case(cat_a, cat_b).then_with(|| name_cmp(a, b))
                }
                EventSortColumn::Grade => {
                    let grade_a = a.grade_level.as_deref().unwrap_or("");
                    let grade_b = b.grade_level.as_deref().unwrap_or("");
                    cmp_ignore_case(grade_a, grade_b).then_with(|| name_cmp(a, b))
                }
            };

            if self.event_sort_ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        sorted
    }

    /// Event selected in the Events tab list
    pub fn selected_event(&self) -> Option<&EventRecord> {
        self.get_sorted_events().get(self.event_selection).copied()
    }

    /// Winners of the selected event, podium order
    pub fn selected_event_winners(&self) -> Vec<&WinnerEntry> {
        self.selected_event()
            .map(|e| e.winners_by_position())
            .unwrap_or_default()
    }

    /// The most recently dated event, falling back to feed order for undated ones
    fn latest_of(events: &[EventRecord]) -> Option<&EventRecord> {
        events
            .iter()
            .filter(|e| e.date.is_some())
            .max_by(|a, b| a.date.cmp(&b.date))
            .or_else(|| events.last())
    }

    /// Latest event for the Overview results panel
    pub fn latest_event(&self) -> Option<&EventRecord> {
        Self::latest_of(&self.events)
    }

    /// Toggle sort column for the events list.
    /// Clicking the same column flips direction, a new column starts ascending.
    pub fn toggle_event_sort(&mut self, column: EventSortColumn) {
        if self.event_sort_column == column {
            self.event_sort_ascending = !self.event_sort_ascending;
        } else {
            self.event_sort_column = column;
            self.event_sort_ascending = true;
        }
        self.event_selection = 0;
        self.winner_selection = 0;
    }

    /// Cycle the category filter: all -> Individual -> Group -> all
    pub fn cycle_category_filter(&mut self) {
        self.category_filter = match self.category_filter {
            None => Some(EventCategory::Individual),
            Some(EventCategory::Individual) => Some(EventCategory::Group),
            Some(EventCategory::Group) => None,
        };
        self.event_selection = 0;
        self.winner_selection = 0;
    }

    /// Cycle the grade filter: all -> Junior -> Middle -> Senior -> all
    pub fn cycle_grade_filter(&mut self) {
        self.grade_filter = match self.grade_filter {
            None => Some(GradeLevel::Junior),
            Some(GradeLevel::Junior) => Some(GradeLevel::Middle),
            Some(GradeLevel::Middle) => Some(GradeLevel::Senior),
            Some(GradeLevel::Senior) => None,
        };
        self.event_selection = 0;
        self.winner_selection = 0;
    }

    /// Short description of the active filters for the Events tab title
    pub fn filter_label(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(c) = self.category_filter {
            parts.push(c.to_string());
        }
        if let Some(g) = self.grade_filter {
            parts.push(g.to_string());
        }
        if !self.search_query.is_empty() {
            parts.push(format!("\"{}\"", self.search_query));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    // =========================================================================
    // Status Line
    // =========================================================================

    /// One-line feed state for the footer
    pub fn feed_line(&self) -> String {
        if self.offline_mode {
            let stale = if self.is_cache_stale() { ", stale" } else { "" };
            format!("OFFLINE (cache {}{})", self.cache.events_age(), stale)
        } else if let Some(at) = self.last_snapshot_at {
            format!("LIVE (updated {})", at.format("%H:%M:%S"))
        } else if self.live.is_subscribed() {
            format!("LIVE (waiting, cache {})", self.cache.events_age())
        } else {
            "Feed idle".to_string()
        }
    }

    /// Stop background work before the terminal is restored
    pub fn shutdown(&mut self) {
        self.live.unsubscribe();
        self.slide_carousel.stop();
        self.spotlight_carousel.stop();
        debug!("App shut down");
    }
}

// ============================================================================
// Background tasks
// ============================================================================

/// Re-authenticate on a spawned task and hand the fresh session back over
/// `tx`. Returns immediately; a failed refresh sends nothing and the next
/// retry window picks it up.
fn spawn_session_refresh(
    client: FeedClient,
    username: String,
    password: String,
    minutes_left: i64,
    tx: mpsc::Sender<SessionData>,
) {
    tokio::spawn(async move {
        match client.authenticate(&username, &password).await {
            Ok(data) => {
                info!(minutes_left, "Session refreshed");
                if tx.send(data).await.is_err() {
                    debug!("Session receiver dropped before refresh completed");
                }
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed");
            }
        }
    });
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    // Allow printable ASCII and common extended chars, reject control chars
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Standings.next(), Tab::Events);
        assert_eq!(Tab::Events.next(), Tab::Overview);
        assert_eq!(Tab::Overview.next(), Tab::Presentation);
        assert_eq!(Tab::Presentation.next(), Tab::Standings); // Wraps around
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Standings.prev(), Tab::Presentation); // Wraps around
        assert_eq!(Tab::Events.prev(), Tab::Standings);
        assert_eq!(Tab::Overview.prev(), Tab::Events);
        assert_eq!(Tab::Presentation.prev(), Tab::Overview);
    }

    #[test]
    fn test_tab_next_prev_roundtrip() {
        let tabs = [Tab::Standings, Tab::Events, Tab::Overview, Tab::Presentation];
        for tab in tabs {
            assert_eq!(tab.next().prev(), tab);
            assert_eq!(tab.prev().next(), tab);
        }
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(Tab::Standings.title(), "Standings");
        assert_eq!(Tab::Events.title(), "Events");
        assert_eq!(Tab::Overview.title(), "Overview");
        assert_eq!(Tab::Presentation.title(), "Presentation");
    }

    // -------------------------------------------------------------------------
    // Event Filter Tests
    // -------------------------------------------------------------------------

    fn sample_event(name: &str, category: &str, grade: &str, school: &str) -> EventRecord {
        EventRecord {
            id: String::new(),
            name: name.to_string(),
            category: Some(category.to_string()),
            grade_level: Some(grade.to_string()),
            date: None,
            winners: vec![WinnerEntry {
                position: 1,
                school: school.to_string(),
                points: 10,
                name: "Winner".to_string(),
                photo: None,
            }],
        }
    }

    #[test]
    fn test_event_matches_search_by_name() {
        let event = sample_event("Solo Recitation", "Individual", "Junior", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(&event, "recit", None, None));
        assert!(App::event_matches(&event, "solo", None, None));
        assert!(!App::event_matches(&event, "quiz", None, None));
    }

    #[test]
    fn test_event_matches_search_by_school() {
        let event = sample_event("Solo Recitation", "Individual", "Junior", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(&event, "vidya", None, None));
        assert!(!App::event_matches(&event, "mercy", None, None));
    }

    #[test]
    fn test_event_matches_category_filter() {
        let event = sample_event("Group Song", "Group", "Senior", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(&event, "", None, None));
        assert!(App::event_matches(&event, "", Some(EventCategory::Group), None));
        assert!(!App::event_matches(&event, "", Some(EventCategory::Individual), None));
    }

    #[test]
    fn test_event_matches_grade_filter() {
        let event = sample_event("Group Song", "Group", "Senior", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(&event, "", None, Some(GradeLevel::Senior)));
        assert!(!App::event_matches(&event, "", None, Some(GradeLevel::Junior)));
    }

    #[test]
    fn test_event_matches_combined() {
        let event = sample_event("Group Song", "Group", "Senior", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(
            &event,
            "song",
            Some(EventCategory::Group),
            Some(GradeLevel::Senior)
        ));
        assert!(!App::event_matches(
            &event,
            "song",
            Some(EventCategory::Group),
            Some(GradeLevel::Middle)
        ));
    }

    #[test]
    fn test_event_matches_unparseable_metadata_fails_filter() {
        let mut event = sample_event("Mystery Event", "???", "???", "VIDYA VIKAS SCHOOL");
        assert!(App::event_matches(&event, "", None, None));
        assert!(!App::event_matches(&event, "", Some(EventCategory::Group), None));

        event.category = None;
        assert!(!App::event_matches(&event, "", Some(EventCategory::Individual), None));
    }

    // -------------------------------------------------------------------------
    // Latest Event Tests
    // -------------------------------------------------------------------------

    fn dated_event(name: &str, date: Option<&str>) -> EventRecord {
        EventRecord {
            id: String::new(),
            name: name.to_string(),
            category: None,
            grade_level: None,
            date: date.map(|d| d.to_string()),
            winners: Vec::new(),
        }
    }

    #[test]
    fn test_latest_of_prefers_newest_date() {
        let events = vec![
            dated_event("Old", Some("2025-11-01T09:00:00Z")),
            dated_event("New", Some("2025-11-03T09:00:00Z")),
            dated_event("Middle", Some("2025-11-02T09:00:00Z")),
        ];
        assert_eq!(App::latest_of(&events).map(|e| e.name.as_str()), Some("New"));
    }

    #[test]
    fn test_latest_of_falls_back_to_feed_order() {
        let events = vec![dated_event("First", None), dated_event("Second", None)];
        assert_eq!(App::latest_of(&events).map(|e| e.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_latest_of_empty() {
        assert_eq!(App::latest_of(&[]), None);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(MAX_USERNAME_LENGTH - 1, 'z'));
        assert!(!can_add_username_char(MAX_USERNAME_LENGTH, 'a'));
        assert!(!can_add_username_char(0, '\x07'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, '!'));
        assert!(can_add_password_char(MAX_PASSWORD_LENGTH - 1, '#'));
        assert!(!can_add_password_char(MAX_PASSWORD_LENGTH, 'x'));
        assert!(!can_add_password_char(0, '\n'));
    }

    // -------------------------------------------------------------------------
    // Session Refresh Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_session_refresh_does_not_block_caller() {
        // Nothing listens on port 9, so the login itself always fails
        let client = FeedClient::new("http://127.0.0.1:9/api/v1").unwrap();
        let (tx, mut rx) = mpsc::channel(1);

        let started = Instant::now();
        spawn_session_refresh(client, "admin".to_string(), "pw".to_string(), 4, tx);
        // The login runs on its own task; the caller returns right away
        assert!(started.elapsed() < Duration::from_secs(1));

        // A failed refresh sends nothing, the channel just closes
        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert!(update.is_none());
    }
}
