//! Discord integration.
//!
//! Request signature verification, the REST client used to carry out
//! moderation actions, command registration payloads and audit broadcasts.

pub mod audit;
pub mod client;
pub mod commands;
pub mod verify;

#[cfg(test)]
pub mod mock;

// Re-export main types for external use
pub use audit::AuditNotifier;
pub use client::{ChannelMessage, PlatformClient, SerenityClient};
