//! Per-identity recent-tag tracking.
//!
//! - [`tracker`]: a bounded most-recent-first tag set for one identity
//! - [`registry`]: the identity → tracker directory with lazy hydration
//! - [`identity`]: validated identity keys

pub mod identity;
pub mod registry;
pub mod tracker;

pub use identity::IdentityKey;
pub use registry::{RecencyRegistry, SharedTracker};
pub use tracker::{RecencyTracker, TouchOutcome, DEFAULT_RECENT_CAPACITY};
