//! Async front end to the chat engine.

pub mod chat;
pub mod messages;

pub use chat::{ChatServiceHandle, REQUEST_TIMEOUT};
