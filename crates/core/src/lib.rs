#![warn(clippy::all, missing_docs)]

//! Core domain logic for the GameRack library tracker.
//!
//! This crate hosts the data models, the composite score calculator,
//! the in-memory library state store, the rating-editor state machine,
//! and configuration handling used by the terminal UI and any future
//! frontends.

pub mod config;
pub mod editor;
pub mod library;
pub mod models;
pub mod score;

pub use config::AppConfig;
pub use editor::RatingEditor;
pub use library::{Library, LibraryCounts, LibraryError, YearFilter};
pub use models::{Criterion, Game, GameDraft, GameId, GameRating};
pub use score::composite_score;
