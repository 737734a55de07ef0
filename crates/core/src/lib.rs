//! Core types and shared functionality for regal-rss.
//!
//! This crate provides:
//! - Cache implementation with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, Item, NewItem};
pub use config::AppConfig;
pub use error::Error;
