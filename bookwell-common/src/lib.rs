//! # Bookwell Common Library
//!
//! Shared code for the Bookwell booking backend:
//! - Error type and `Result` alias
//! - Configuration and database path resolution
//! - Database schema bootstrap
//! - Row models shared across crates

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
