//! `signet-core` — shared value primitives.
//!
//! This crate contains **pure value types** (no token, policy, or
//! infrastructure concerns).

pub mod environment;
pub mod error;
pub mod id;

pub use environment::Environment;
pub use error::{CoreError, CoreResult};
pub use id::UserId;
