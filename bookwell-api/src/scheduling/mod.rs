//! Session scheduling core
//!
//! - `conflict`: the pure overlap rule and the two-axis conflict detector
//! - `lifecycle`: create/update/delete orchestration with conflict-safety
//! - `availability`: day availability derived from the same axis queries

pub mod availability;
pub mod conflict;
pub mod lifecycle;

pub use availability::{AvailabilityRequest, AvailabilityResult, TimeSlot};
pub use conflict::{CandidateWindow, ConflictReport};
pub use lifecycle::{CreateSessionRequest, SessionService, UpdateSessionRequest};
