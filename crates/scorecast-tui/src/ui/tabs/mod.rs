//! Tab-specific content rendering.
//!
//! Every tab draws from the same standings/stats snapshot held by the
//! app, so the scores can never disagree between surfaces:
//!
//! - `standings`: Full-roster ranked table
//! - `events`: Event list with winner detail pane
//! - `overview`: Stats cards and latest results
//! - `presentation`: Rotating podium/leaderboard display

pub mod events;
pub mod overview;
pub mod presentation;
pub mod standings;
