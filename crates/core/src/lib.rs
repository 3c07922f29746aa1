//! Core types and shared functionality for wikisearch.
//!
//! This crate provides:
//! - Key-value persistence with SQLite and in-memory backends
//! - Search history and theme preference state
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod history;
pub mod storage;
pub mod theme;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use history::{HISTORY_KEY, HistoryStore, MAX_HISTORY};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use theme::{THEME_KEY, Theme, ThemeStore};
