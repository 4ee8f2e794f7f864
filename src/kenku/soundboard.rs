//! Soundboard endpoints of the remote-control API

use super::client::KenkuClient;
use super::error::ClassifiedFailure;
use super::models::{KenkuId, SoundPlayback, SoundboardListing};

const LIST_PATH: &str = "/v1/soundboard";
const PLAY_PATH: &str = "/v1/soundboard/play";
const STOP_PATH: &str = "/v1/soundboard/stop";
const STATE_PATH: &str = "/v1/soundboard/playback";

/// Soundboards and sound-effects. Several sounds may play at once.
#[derive(Clone)]
pub struct SoundboardService {
    client: KenkuClient,
}

impl SoundboardService {
    pub fn new(client: KenkuClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<SoundboardListing, ClassifiedFailure> {
        self.client
            .fetch_collection(LIST_PATH, "fetch list of all soundboards and sound-effects")
            .await
    }

    pub async fn play(&self, id: &str) -> Result<Option<KenkuId>, ClassifiedFailure> {
        self.client
            .issue_command(PLAY_PATH, Some(&KenkuId::new(id)), "play sound-effect")
            .await
    }

    pub async fn stop(&self, id: &str) -> Result<Option<KenkuId>, ClassifiedFailure> {
        self.client
            .issue_command(STOP_PATH, Some(&KenkuId::new(id)), "stop sound-effect")
            .await
    }

    /// Sounds currently playing (never cached)
    pub async fn state(&self) -> Result<SoundPlayback, ClassifiedFailure> {
        self.client
            .fetch_state(STATE_PATH, "fetch soundboard state")
            .await
    }
}
