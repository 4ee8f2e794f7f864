//! Status command handler
//!
//! Handles: {prefix}-status
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Show loop flag of sound-effects, tracks without a playlist
//! - 1.0.0: Playlist and soundboard playback state

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::respond_deferred;
use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandKind, SlashCommandHandler};
use crate::commands::interaction::InteractionContext;
use crate::core::{format_duration, italic};
use crate::kenku::models::{PlaylistPlayback, SoundPlayback, SoundState};
use crate::kenku::ClassifiedFailure;

/// Handler for the status command
pub struct StatusHandler {
    name: String,
}

impl StatusHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            name: CommandKind::Status.identifier(prefix),
        }
    }
}

#[async_trait]
impl SlashCommandHandler for StatusHandler {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn create_command(&self) -> CreateApplicationCommand {
        CreateApplicationCommand::default()
            .name(&self.name)
            .description("Show what KenkuFM is currently playing")
            .to_owned()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &InteractionContext,
    ) -> Result<()> {
        respond_deferred(interaction, playback_report(&ctx)).await
    }
}

/// Playlist state followed by soundboard state
pub async fn playback_report(ctx: &CommandContext) -> Result<String, ClassifiedFailure> {
    let playlist = ctx.playlist.state().await?;
    let soundboard = ctx.soundboard.state().await?;
    Ok(format!(
        "{}\n{}",
        describe_playlist_state(&playlist),
        describe_sound_state(&soundboard)
    ))
}

/// One line describing the loaded track
pub fn describe_playlist_state(state: &PlaylistPlayback) -> String {
    let Some(track) = &state.track else {
        return "No playlist or track is currently playing.".to_string();
    };

    let verb = if state.playing { "playing" } else { "paused" };
    let source = state
        .playlist
        .as_ref()
        .filter(|playlist| !playlist.title.is_empty())
        .map(|playlist| format!(" from playlist {}", italic(&playlist.title)))
        .unwrap_or_default();

    format!(
        "Currently {verb} track {}{source} (Progress: {} / {})",
        italic(&track.title),
        format_duration(track.progress),
        format_duration(track.duration)
    )
}

/// Playing sound-effects, one per line
pub fn describe_sound_state(state: &SoundPlayback) -> String {
    if state.sounds.is_empty() {
        return "Currently not playing any soundboard or sound-effect.".to_string();
    }

    let lines: Vec<String> = state.sounds.iter().map(describe_sound).collect();
    format!("Currently playing sound-effects:\n{}", lines.join("\n"))
}

fn describe_sound(sound: &SoundState) -> String {
    let looping = if sound.looping { ", looping" } else { "" };
    format!(
        "- {} (Progress: {} / {}{looping})",
        italic(&sound.title),
        format_duration(sound.progress),
        format_duration(sound.duration)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::dispatcher::{DispatchState, Dispatcher};
    use crate::commands::handlers::build_registry;
    use crate::commands::interaction::CommandInvocation;
    use crate::commands::testing::{command_context, interaction, refused_url, Recorded};
    use crate::kenku::models::{PlaylistState, TrackState};
    use mockito::{Mock, Server, ServerGuard};
    use serde_json::json;

    async fn mock_state(
        server: &mut ServerGuard,
        sounds: serde_json::Value,
        hits: usize,
    ) -> (Mock, Mock) {
        let playlist = server
            .mock("GET", "/v1/playlist/playback")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "playing": true,
                    "volume": 1,
                    "muted": false,
                    "shuffle": false,
                    "repeat": "playlist",
                    "track": {
                        "id": "t1",
                        "title": "Harbour Ambience",
                        "url": "",
                        "duration": 185,
                        "progress": 65
                    },
                    "playlist": { "id": "p1", "title": "Port Town" }
                })
                .to_string(),
            )
            .expect(hits)
            .create_async()
            .await;
        let soundboard = server
            .mock("GET", "/v1/soundboard/playback")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "sounds": sounds }).to_string())
            .expect(hits)
            .create_async()
            .await;
        (playlist, soundboard)
    }

    fn thunder() -> serde_json::Value {
        json!([{
            "id": "s1",
            "title": "Thunder",
            "url": "",
            "loop": true,
            "volume": 1,
            "fadeIn": 0,
            "fadeOut": 0,
            "duration": 20,
            "progress": 5
        }])
    }

    #[tokio::test]
    async fn test_status_reports_playing_sound() {
        let mut server = Server::new_async().await;
        let (playlist, soundboard) = mock_state(&mut server, thunder(), 1).await;

        let handler = StatusHandler::new("kfm");
        let (ctx, responder) = interaction(CommandInvocation::new("kfm-status"));
        handler
            .handle(command_context(&server.url()), &ctx)
            .await
            .unwrap();

        playlist.assert_async().await;
        soundboard.assert_async().await;

        let calls = responder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Recorded::Defer);

        let reply = responder.final_reply().unwrap();
        assert!(reply.contains("Thunder"));
        assert!(reply.contains("5s"));
        assert!(reply.contains("20s"));
        assert!(reply.contains("looping"));
        assert!(reply.contains("Currently playing track _Harbour Ambience_ from playlist _Port Town_"));
        assert!(reply.contains("1:05 / 3:05"));
    }

    #[tokio::test]
    async fn test_status_without_remote_api_warns() {
        let handler = StatusHandler::new("kfm");
        let (ctx, responder) = interaction(CommandInvocation::new("kfm-status"));
        handler
            .handle(command_context(&refused_url()), &ctx)
            .await
            .unwrap();

        assert_eq!(responder.calls()[0], Recorded::Defer);
        assert!(responder.final_reply().unwrap().starts_with("Warning:"));
    }

    #[tokio::test]
    async fn test_concurrent_status_requests_are_independent() {
        let mut server = Server::new_async().await;
        let (playlist, soundboard) = mock_state(&mut server, thunder(), 2).await;

        let registry = build_registry("kfm").unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry), command_context(&server.url()));

        let (first, first_responder) = interaction(CommandInvocation::new("kfm-status"));
        let (second, second_responder) = interaction(CommandInvocation::new("kfm-status"));

        let (first_state, second_state) =
            tokio::join!(dispatcher.dispatch(&first), dispatcher.dispatch(&second));

        assert_eq!(first_state, DispatchState::Completed);
        assert_eq!(second_state, DispatchState::Completed);
        assert_ne!(first.request_id(), second.request_id());

        for responder in [first_responder, second_responder] {
            let calls = responder.calls();
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0], Recorded::Defer);
            assert!(matches!(&calls[1], Recorded::EditReply(reply) if reply.contains("Thunder")));
        }

        playlist.assert_async().await;
        soundboard.assert_async().await;
    }

    #[test]
    fn test_describe_idle_state() {
        assert_eq!(
            describe_playlist_state(&PlaylistPlayback::default()),
            "No playlist or track is currently playing."
        );
        assert_eq!(
            describe_sound_state(&SoundPlayback::default()),
            "Currently not playing any soundboard or sound-effect."
        );
    }

    #[test]
    fn test_describe_paused_track_without_playlist() {
        let state = PlaylistPlayback {
            playing: false,
            track: Some(TrackState {
                title: "Rain".to_string(),
                duration: 30.0,
                progress: 12.0,
                ..TrackState::default()
            }),
            playlist: Some(PlaylistState::default()),
            ..PlaylistPlayback::default()
        };

        assert_eq!(
            describe_playlist_state(&state),
            "Currently paused track _Rain_ (Progress: 12s / 30s)"
        );
    }
}
