//! # Core Module
//!
//! Configuration and reply formatting shared by the client and command layers.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Markdown escaping and duration formatting for replies
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{format_duration, italic, truncate_for_message, MESSAGE_LIMIT};
