//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Playlist and soundboard services alongside the configuration
//! - 1.0.0: Initial implementation with core shared state

use anyhow::Result;
use std::sync::Arc;

use crate::core::Config;
use crate::kenku::{KenkuClient, PlaylistService, SoundboardService};

/// Shared context for all command handlers
///
/// Built once at startup and immutable afterwards, so concurrent
/// interactions share it without locking.
#[derive(Clone)]
pub struct CommandContext {
    pub config: Arc<Config>,
    pub playlist: PlaylistService,
    pub soundboard: SoundboardService,
}

impl CommandContext {
    pub fn new(
        config: Arc<Config>,
        playlist: PlaylistService,
        soundboard: SoundboardService,
    ) -> Self {
        Self {
            config,
            playlist,
            soundboard,
        }
    }

    /// Create the remote-control services described by `config`
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let client = KenkuClient::new(&config.url, config.request_timeout())?;
        Ok(Self::new(
            config,
            PlaylistService::new(client.clone()),
            SoundboardService::new(client),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<CommandContext>();
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            discord_token: "t".to_string(),
            ..Config::default()
        };
        let ctx = CommandContext::from_config(Arc::new(config)).unwrap();
        assert_eq!(ctx.config.prefix, "kfm");
    }
}
