//! Core library for scorecast.
//!
//! Everything the standings board needs short of a screen: the feed
//! client, event models, the roster, the aggregation and statistics
//! layers, live subscription plumbing, offline cache, configuration,
//! and admin session handling.

pub mod auth;
pub mod cache;
pub mod carousel;
pub mod config;
pub mod feed;
pub mod live;
pub mod models;
pub mod roster;
pub mod standings;
pub mod stats;

pub use carousel::Carousel;
pub use config::Config;
pub use roster::{Roster, School};
pub use standings::{StandingRow, Standings};
pub use stats::StatsSummary;
