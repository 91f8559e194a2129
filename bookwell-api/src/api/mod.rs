//! HTTP API: router, handlers and error mapping

pub mod error;
pub mod memberships;
pub mod server;
pub mod sessions;

pub use error::ApiError;
pub use server::{create_router, AppContext};
