// Core layer - shared types and configuration
pub mod core;

// Remote-control API client
pub mod kenku;

// Application layer
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export client items
pub use kenku::{ClassifiedFailure, FailureKind, KenkuClient, PlaylistService, SoundboardService};
