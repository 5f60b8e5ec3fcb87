//! Retry and backoff.
//!
//! This module owns the backoff schedule and the retry loop so callers
//! (upload manager, or any host code) share one policy and one observable
//! state shape.

mod policy;
mod run;
mod state;

pub use policy::RetryPolicy;
pub use run::RetryExecutor;
pub use state::RetryState;
