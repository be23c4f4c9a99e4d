//! Work-readiness performance scoreboard service.
//!
//! The scoring engine under [`workflows::performance`] turns raw check-in
//! assignment records into worker, team, and weekly scoreboards; the rest of
//! the crate is the thin service shell around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
