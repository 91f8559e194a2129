//! # Bookwell API service library
//!
//! REST backend for community session booking:
//! - `scheduling`: conflict detection and the session lifecycle
//! - `membership`: membership creation and its referential preconditions
//! - `bulk`: all-or-nothing batch coordination
//! - `store`: repository layer over SQLite with explicit transactions
//! - `api`: axum router, handlers and HTTP error mapping

pub mod api;
pub mod bulk;
pub mod membership;
pub mod scheduling;
pub mod store;
