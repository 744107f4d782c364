//! Results feed client module.
//!
//! This module provides the `FeedClient` for communicating with the
//! competition results feed to fetch scored events.
//!
//! The feed uses JWT bearer token authentication for its admin
//! endpoints; the event list itself is readable without a token.

pub mod client;
pub mod error;

pub use client::FeedClient;
pub use error::FeedError;
