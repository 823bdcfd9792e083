//! Developer tooling: read-only views over a running session.
//!
//! # Invariants
//! - Tools never mutate session state.

pub mod inspector;

pub use inspector::{HudInspector, HudSnapshot, SessionSummary};
