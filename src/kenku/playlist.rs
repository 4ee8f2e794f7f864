//! Playlist endpoints of the remote-control API

use super::client::KenkuClient;
use super::error::ClassifiedFailure;
use super::models::{KenkuId, PlaylistListing, PlaylistPlayback};

const LIST_PATH: &str = "/v1/playlist";
const PLAY_PATH: &str = "/v1/playlist/play";
const STATE_PATH: &str = "/v1/playlist/playback";
const PAUSE_PATH: &str = "/v1/playlist/playback/pause";
const RESUME_PATH: &str = "/v1/playlist/playback/play";
const NEXT_PATH: &str = "/v1/playlist/playback/next";
const PREVIOUS_PATH: &str = "/v1/playlist/playback/previous";

/// Playlists and tracks. Only one track plays at a time.
#[derive(Clone)]
pub struct PlaylistService {
    client: KenkuClient,
}

impl PlaylistService {
    pub fn new(client: KenkuClient) -> Self {
        Self { client }
    }

    /// All playlists and the tracks they reference
    pub async fn list(&self) -> Result<PlaylistListing, ClassifiedFailure> {
        self.client
            .fetch_collection(LIST_PATH, "fetch list of all playlists and tracks")
            .await
    }

    /// Start a playlist or a single track by id
    pub async fn play(&self, id: &str) -> Result<Option<KenkuId>, ClassifiedFailure> {
        self.client
            .issue_command(PLAY_PATH, Some(&KenkuId::new(id)), "play playlist or track")
            .await
    }

    pub async fn pause(&self) -> Result<(), ClassifiedFailure> {
        self.client
            .issue_command(PAUSE_PATH, None, "pause playlist or track")
            .await
            .map(drop)
    }

    pub async fn resume(&self) -> Result<(), ClassifiedFailure> {
        self.client
            .issue_command(RESUME_PATH, None, "resume playlist or track")
            .await
            .map(drop)
    }

    pub async fn next(&self) -> Result<(), ClassifiedFailure> {
        self.client
            .issue_command(NEXT_PATH, None, "play next track in playlist")
            .await
            .map(drop)
    }

    pub async fn previous(&self) -> Result<(), ClassifiedFailure> {
        self.client
            .issue_command(PREVIOUS_PATH, None, "play previous track in playlist")
            .await
            .map(drop)
    }

    /// Current playback snapshot (never cached)
    pub async fn state(&self) -> Result<PlaylistPlayback, ClassifiedFailure> {
        self.client
            .fetch_state(STATE_PATH, "fetch playlist state")
            .await
    }
}
