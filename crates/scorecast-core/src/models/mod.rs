//! Data models for competition entities.
//!
//! This module contains the data structures used to represent
//! competition data including:
//!
//! - `EventRecord`, `WinnerEntry`: Scored events and their placements
//! - `EventCategory`, `GradeLevel`: Event classification
//! - `EventSortColumn`: Table sorting options

pub mod event;

pub use event::{EventCategory, EventRecord, EventSortColumn, GradeLevel, WinnerEntry};
