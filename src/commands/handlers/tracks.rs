//! Playlist command handler
//!
//! Handles: {prefix}-tracks play <title> | stop | pause | resume | next | previous | status
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{bail, Result};
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::play::play_from_playlists;
use super::status::describe_playlist_state;
use super::{not_found, respond_deferred};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::commands::slash::{subcommand, titled_subcommand, TITLE_OPTION};
use crate::kenku::ClassifiedFailure;

/// Playback commands without arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Stop,
    Pause,
    Resume,
    Next,
    Previous,
}

impl Transport {
    fn parse(subcommand: &str) -> Option<Self> {
        match subcommand {
            "stop" => Some(Transport::Stop),
            "pause" => Some(Transport::Pause),
            "resume" => Some(Transport::Resume),
            "next" => Some(Transport::Next),
            "previous" => Some(Transport::Previous),
            _ => None,
        }
    }

    fn confirmation(self) -> &'static str {
        match self {
            Transport::Stop => "Stopped playback.",
            Transport::Pause => "Paused playback.",
            Transport::Resume => "Resumed playback.",
            Transport::Next => "Skipped to the next track.",
            Transport::Previous => "Went back to the previous track.",
        }
    }
}

/// Handler for playlist and track control
pub struct TracksHandler {
    name: String,
}

impl TracksHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::Tracks.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for TracksHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("Control playlist and track playback")
            .create_option(|o| {
                titled_subcommand(
                    o,
                    "play",
                    "Play a playlist or track",
                    "Playlist or track title or id",
                )
            })
            .create_option(|o| subcommand(o, "stop", "Stop playback"))
            .create_option(|o| subcommand(o, "pause", "Pause playback"))
            .create_option(|o| subcommand(o, "resume", "Resume playback"))
            .create_option(|o| subcommand(o, "next", "Play the next track"))
            .create_option(|o| subcommand(o, "previous", "Play the previous track"))
            .create_option(|o| subcommand(o, "status", "Show the current track"))
            .to_owned()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()> {
        let invocation = interaction.invocation();
        match invocation.subcommand() {
            Some("play") => {
                let title = invocation.required_string(TITLE_OPTION)?;
                respond_deferred(interaction, play(&ctx, &title)).await
            }
            Some("status") => respond_deferred(interaction, status(&ctx)).await,
            Some(other) => match Transport::parse(other) {
                Some(transport) => respond_deferred(interaction, control(&ctx, transport)).await,
                None => bail!("Unknown subcommand {other:?} for /{}", self.name),
            },
            None => bail!("Missing subcommand for /{}", self.name),
        }
    }
}

async fn play(ctx: &CommandContext, title: &str) -> Result<String, ClassifiedFailure> {
    Ok(play_from_playlists(ctx, title)
        .await?
        .unwrap_or_else(|| not_found("playlist or track", title)))
}

/// The remote API has no stop for playlists; stopping pauses
async fn control(ctx: &CommandContext, transport: Transport) -> Result<String, ClassifiedFailure> {
    match transport {
        Transport::Stop | Transport::Pause => ctx.playlist.pause().await?,
        Transport::Resume => ctx.playlist.resume().await?,
        Transport::Next => ctx.playlist.next().await?,
        Transport::Previous => ctx.playlist.previous().await?,
    }
    Ok(transport.confirmation().to_string())
}

async fn status(ctx: &CommandContext) -> Result<String, ClassifiedFailure> {
    let playback = ctx.playlist.state().await?;
    Ok(describe_playlist_state(&playback))
}
