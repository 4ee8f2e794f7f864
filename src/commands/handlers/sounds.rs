//! Sound-effect command handler
//!
//! Handles: {prefix}-sounds play <title> | stop <title> | status
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::{bail, Result};
use async_trait::async_trait;
use log::info;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::play::play_sound;
use super::status::describe_sound_state;
use super::{not_found, respond_deferred};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::commands::slash::{subcommand, titled_subcommand, TITLE_OPTION};
use crate::core::italic;
use crate::kenku::models::find_by_id_or_title;
use crate::kenku::ClassifiedFailure;

/// Handler for sound-effect control
pub struct SoundsHandler {
    name: String,
}

impl SoundsHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::Sounds.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for SoundsHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("Control soundboard sound-effects")
            .create_option(|o| {
                titled_subcommand(o, "play", "Play a sound-effect", "Sound-effect title or id")
            })
            .create_option(|o| {
                titled_subcommand(
                    o,
                    "stop",
                    "Stop a playing sound-effect",
                    "Sound-effect title or id",
                )
            })
            .create_option(|o| subcommand(o, "status", "Show playing sound-effects"))
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
            Some("stop") => {
                let title = invocation.required_string(TITLE_OPTION)?;
                respond_deferred(interaction, stop(&ctx, &title)).await
            }
            Some("status") => respond_deferred(interaction, status(&ctx)).await,
            other => bail!("Unknown subcommand {other:?} for /{}", self.name),
        }
    }
}

async fn play(ctx: &CommandContext, title: &str) -> Result<String, ClassifiedFailure> {
    Ok(play_sound(ctx, title)
        .await?
        .unwrap_or_else(|| not_found("sound-effect", title)))
}

/// Stop a sound-effect that is currently playing
async fn stop(ctx: &CommandContext, title: &str) -> Result<String, ClassifiedFailure> {
    let playback = ctx.soundboard.state().await?;
    let Some(sound) = find_by_id_or_title(&playback.sounds, title) else {
        return Ok(not_found("playing sound-effect", title));
    };

    ctx.soundboard.stop(&sound.id).await?;
    info!("Stopped sound-effect {} ({})", sound.title, sound.id);
    Ok(format!("Stopped sound-effect {}", italic(&sound.title)))
}

async fn status(ctx: &CommandContext) -> Result<String, ClassifiedFailure> {
    let playback = ctx.soundboard.state().await?;
    Ok(describe_sound_state(&playback))
}
