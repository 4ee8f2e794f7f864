//! Search command handler
//!
//! Handles: {prefix}-search <title>
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::{bullet_list, not_found, respond_deferred};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::commands::slash::{title_option, TITLE_OPTION};
use crate::core::italic;
use crate::kenku::models::Titled;
use crate::kenku::ClassifiedFailure;

/// Handler for the search command
pub struct SearchHandler {
    name: String,
}

impl SearchHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::Search.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for SearchHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("Search playlists, tracks, soundboards and sound-effects")
            .create_option(|o| title_option(o, "Part of a title, or an exact id", true))
            .to_owned()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()> {
        let query = interaction.invocation().required_string(TITLE_OPTION)?;
        respond_deferred(interaction, search(&ctx, &query)).await
    }
}

async fn search(ctx: &CommandContext, query: &str) -> Result<String, ClassifiedFailure> {
    let playlists = ctx.playlist.list().await?;
    let soundboards = ctx.soundboard.list().await?;

    let sections: Vec<String> = [
        section("Playlists", &playlists.playlists, query),
        section("Tracks", &playlists.tracks, query),
        section("Soundboards", &soundboards.soundboards, query),
        section("Sound-effects", &soundboards.sounds, query),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sections.is_empty() {
        return Ok(not_found("playlist, track, soundboard or sound-effect", query));
    }
    Ok(format!(
        "Search results for {}:\n{}",
        italic(query),
        sections.join("\n")
    ))
}

/// Heading plus matching entries, `None` when nothing matches
fn section<T: Titled>(heading: &str, items: &[T], query: &str) -> Option<String> {
    let matches: Vec<&T> = items.iter().filter(|item| item.matches(query)).collect();
    if matches.is_empty() {
        return None;
    }
    Some(format!("{heading}:\n{}", bullet_list(matches)))
}
