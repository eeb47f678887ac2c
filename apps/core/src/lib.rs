//! Replydesk core: a rule-based reply engine.
//!
//! Messages are normalized, classified into an intent by ordered trigger
//! rules, matched against a bank of known patterns, and answered with a
//! pre-authored reply plus a heuristic confidence score.

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;

pub use actors::ChatServiceHandle;
pub use brain::{ChatEngine, Intent, Reply};
pub use config::{EngineConfig, Tier};
pub use error::AppError;
