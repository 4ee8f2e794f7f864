//! List command handler
//!
//! Handles: {prefix}-list playlists | soundboards | tracks <title> | sounds <title>
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{bail, Result};
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::{bullet_list, not_found, respond_deferred};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::commands::slash::{subcommand, titled_subcommand, TITLE_OPTION};
use crate::core::italic;
use crate::kenku::ClassifiedFailure;

/// Handler for the list command
pub struct ListHandler {
    name: String,
}

impl ListHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::List.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for ListHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("List playlists, soundboards, tracks or sound-effects")
            .create_option(|o| subcommand(o, "playlists", "List all playlists"))
            .create_option(|o| subcommand(o, "soundboards", "List all soundboards"))
            .create_option(|o| {
                titled_subcommand(
                    o,
                    "tracks",
                    "List the tracks of a playlist",
                    "Playlist title or id",
                )
            })
            .create_option(|o| {
                titled_subcommand(
                    o,
                    "sounds",
                    "List the sound-effects of a soundboard",
                    "Soundboard title or id",
                )
            })
            .to_owned()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()> {
        let invocation = interaction.invocation();
        match invocation.subcommand() {
            Some("playlists") => respond_deferred(interaction, list_playlists(&ctx)).await,
            Some("soundboards") => respond_deferred(interaction, list_soundboards(&ctx)).await,
            Some("tracks") => {
                let title = invocation.required_string(TITLE_OPTION)?;
                respond_deferred(interaction, list_tracks(&ctx, &title)).await
            }
            Some("sounds") => {
                let title = invocation.required_string(TITLE_OPTION)?;
                respond_deferred(interaction, list_sounds(&ctx, &title)).await
            }
            other => bail!("Unknown subcommand {other:?} for /{}", self.name),
        }
    }
}

async fn list_playlists(ctx: &CommandContext) -> Result<String, ClassifiedFailure> {
    let listing = ctx.playlist.list().await?;
    if listing.playlists.is_empty() {
        return Ok("KenkuFM has no playlists.".to_string());
    }
    Ok(format!("Playlists:\n{}", bullet_list(&listing.playlists)))
}

async fn list_soundboards(ctx: &CommandContext) -> Result<String, ClassifiedFailure> {
    let listing = ctx.soundboard.list().await?;
    if listing.soundboards.is_empty() {
        return Ok("KenkuFM has no soundboards.".to_string());
    }
    Ok(format!("Soundboards:\n{}", bullet_list(&listing.soundboards)))
}

async fn list_tracks(ctx: &CommandContext, title: &str) -> Result<String, ClassifiedFailure> {
    let listing = ctx.playlist.list().await?;
    let Some(playlist) = listing.find_playlist(title) else {
        return Ok(not_found("playlist", title));
    };

    let tracks = listing.tracks_of(playlist);
    if tracks.is_empty() {
        return Ok(format!("Playlist {} has no tracks.", italic(&playlist.title)));
    }
    Ok(format!(
        "Tracks of playlist {}:\n{}",
        italic(&playlist.title),
        bullet_list(tracks)
    ))
}

async fn list_sounds(ctx: &CommandContext, title: &str) -> Result<String, ClassifiedFailure> {
    let listing = ctx.soundboard.list().await?;
    let Some(soundboard) = listing.find_soundboard(title) else {
        return Ok(not_found("soundboard", title));
    };

    let sounds = listing.sounds_of(soundboard);
    if sounds.is_empty() {
        return Ok(format!("Soundboard {} has no sound-effects.", italic(&soundboard.title)));
    }
    Ok(format!(
        "Sound-effects of soundboard {}:\n{}",
        italic(&soundboard.title),
        bullet_list(sounds)
    ))
}
