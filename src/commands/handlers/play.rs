//! Play command handler
//!
//! Handles: {prefix}-play [title]
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::{not_found, respond_deferred};
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::commands::slash::{title_option, TITLE_OPTION};
use crate::core::italic;
use crate::kenku::ClassifiedFailure;

/// Handler for the play command
pub struct PlayHandler {
    name: String,
}

impl PlayHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::Play.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for PlayHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("Play a playlist, track or sound-effect, or resume playback")
            .create_option(|o| {
                title_option(o, "Title or id of the playlist, track or sound-effect", false)
            })
            .to_owned()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()> {
        let title = interaction.invocation().string_option(TITLE_OPTION);
        respond_deferred(interaction, play_anything(&ctx, title.as_deref())).await
    }
}

/// Resume without a title; otherwise playlists and tracks first, then sound-effects
async fn play_anything(
    ctx: &CommandContext,
    title: Option<&str>,
) -> Result<String, ClassifiedFailure> {
    let Some(title) = title else {
        ctx.playlist.resume().await?;
        return Ok("Resumed playback.".to_string());
    };

    if let Some(reply) = play_from_playlists(ctx, title).await? {
        return Ok(reply);
    }
    if let Some(reply) = play_sound(ctx, title).await? {
        return Ok(reply);
    }
    Ok(not_found("playlist, track or sound-effect", title))
}

/// Play the playlist or track matching `title`, `None` if nothing matches
pub(crate) async fn play_from_playlists(
    ctx: &CommandContext,
    title: &str,
) -> Result<Option<String>, ClassifiedFailure> {
    let listing = ctx.playlist.list().await?;

    if let Some(playlist) = listing.find_playlist(title) {
        ctx.playlist.play(&playlist.id).await?;
        info!("Started playlist {} ({})", playlist.title, playlist.id);
        return Ok(Some(format!("Now playing playlist {}", italic(&playlist.title))));
    }
    if let Some(track) = listing.find_track(title) {
        ctx.playlist.play(&track.id).await?;
        info!("Started track {} ({})", track.title, track.id);
        return Ok(Some(format!("Now playing track {}", italic(&track.title))));
    }
    Ok(None)
}

/// Play the sound-effect matching `title`, `None` if nothing matches
pub(crate) async fn play_sound(
    ctx: &CommandContext,
    title: &str,
) -> Result<Option<String>, ClassifiedFailure> {
    let listing = ctx.soundboard.list().await?;

    let Some(sound) = listing.find_sound(title) else {
        return Ok(None);
    };
    ctx.soundboard.play(&sound.id).await?;
    info!("Started sound-effect {} ({})", sound.title, sound.id);
    Ok(Some(format!("Now playing sound-effect {}", italic(&sound.title))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dispatcher::{DispatchState, Dispatcher};
    use crate::commands::handlers::build_registry;
    use crate::commands::interaction::CommandInvocation;
    use crate::commands::testing::{command_context, interaction, Recorded};
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use serde_json::json;

    async fn mock_listings(server: &mut ServerGuard) -> (Mock, Mock) {
        let playlists = server
            .mock("GET", "/v1/playlist")
            .with_status(200)
            .with_body(
                json!({
                    "playlists": [
                        { "id": "p1", "title": "Tavern", "background": "", "tracks": ["t1"] }
                    ],
                    "tracks": [
                        { "id": "t1", "title": "Lute Song", "url": "" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        let soundboards = server
            .mock("GET", "/v1/soundboard")
            .with_status(200)
            .with_body(
                json!({
                    "soundboards": [],
                    "sounds": [
                        { "id": "s1", "title": "Thunder", "url": "", "loop": false, "volume": 1, "fadeIn": 0, "fadeOut": 0 }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        (playlists, soundboards)
    }

    async fn run_play(url: &str, title: Option<&str>) -> Vec<Recorded> {
        let mut invocation = CommandInvocation::new("kfm-play");
        if let Some(title) = title {
            invocation = invocation.with_option("title", title);
        }
        let (ctx, responder) = interaction(invocation);
        PlayHandler::new("kfm")
            .handle(command_context(url), &ctx)
            .await
            .unwrap();
        responder.calls()
    }

    #[tokio::test]
    async fn test_play_playlist_by_title() {
        let mut server = Server::new_async().await;
        let (_playlists, soundboards) = mock_listings(&mut server).await;
        let endpoint = server
            .mock("PUT", "/v1/playlist/play")
            .match_body(Matcher::Json(json!({ "id": "p1" })))
            .with_status(200)
            .with_body(r#"{"id":"p1"}"#)
            .create_async()
            .await;

        let calls = run_play(&server.url(), Some("tavern")).await;

        endpoint.assert_async().await;
        // Sound-effects are only consulted when no playlist or track matches
        assert!(!soundboards.matched_async().await);
        assert_eq!(
            calls,
            vec![
                Recorded::Defer,
                Recorded::EditReply("Now playing playlist _Tavern_".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_play_falls_back_to_sound_effects() {
        let mut server = Server::new_async().await;
        let _listings = mock_listings(&mut server).await;
        let endpoint = server
            .mock("PUT", "/v1/soundboard/play")
            .match_body(Matcher::Json(json!({ "id": "s1" })))
            .with_status(200)
            .create_async()
            .await;

        let calls = run_play(&server.url(), Some("Thunder")).await;

        endpoint.assert_async().await;
        assert_eq!(
            calls[1],
            Recorded::EditReply("Now playing sound-effect _Thunder_".to_string())
        );
    }

    #[tokio::test]
    async fn test_play_without_title_resumes() {
        let mut server = Server::new_async().await;
        let resume = server
            .mock("PUT", "/v1/playlist/playback/play")
            .with_status(200)
            .create_async()
            .await;

        let calls = run_play(&server.url(), None).await;

        resume.assert_async().await;
        assert_eq!(calls[1], Recorded::EditReply("Resumed playback.".to_string()));
    }

    #[tokio::test]
    async fn test_play_unknown_title_warns() {
        let mut server = Server::new_async().await;
        let _listings = mock_listings(&mut server).await;

        let calls = run_play(&server.url(), Some("Dragon Roar")).await;

        assert_eq!(
            calls[1],
            Recorded::EditReply(
                "Warning: Could not find any playlist, track or sound-effect matching _Dragon Roar_"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_play_service_unavailable_is_reported() {
        let mut server = Server::new_async().await;
        let _listings = mock_listings(&mut server).await;
        let _endpoint = server
            .mock("PUT", "/v1/playlist/play")
            .with_status(503)
            .with_body("KenkuFM is restarting")
            .create_async()
            .await;

        let registry = build_registry("kfm").unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry), command_context(&server.url()));
        let (ctx, responder) =
            interaction(CommandInvocation::new("kfm-play").with_option("title", "Tavern"));

        // Classified failures are answered by the handler, not the dispatcher fallback
        assert_eq!(dispatcher.dispatch(&ctx).await, DispatchState::Completed);

        let calls = responder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Recorded::Defer);
        let reply = responder.final_reply().unwrap();
        assert!(reply.starts_with("Error:"));
        assert!(reply.contains("503"));
    }
}
