//! Resilience helpers.
//!
//! Deployment transactions are never retried. The only loop in the tool is
//! polling an explorer for a verification verdict, which uses a bounded
//! backoff schedule from `backoff.rs`.

pub mod backoff;

pub use backoff::{calculate_backoff, PollSchedule};
