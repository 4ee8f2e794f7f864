//! # KenkuFM Remote-Control Client
//!
//! Typed access to the KenkuFM remote-control HTTP API with failure classification.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod client;
pub mod error;
pub mod models;
pub mod playlist;
pub mod soundboard;

pub use client::KenkuClient;
pub use error::{ClassifiedFailure, FailureKind};
pub use playlist::PlaylistService;
pub use soundboard::SoundboardService;
