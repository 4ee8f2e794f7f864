//! JSON shapes of the KenkuFM remote-control API
//!
//! Fields the bot does not read are still modelled so debug logs and tests can
//! round-trip real payloads; everything beyond `id`/`title` is optional on input.

use serde::{Deserialize, Serialize};

/// A playlist entry from `GET /v1/playlist`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub background: String,
    /// Track ids, in playback order
    pub tracks: Vec<String>,
}

/// A track entry from `GET /v1/playlist`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Response of `GET /v1/playlist`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistListing {
    pub playlists: Vec<Playlist>,
    pub tracks: Vec<Track>,
}

/// A soundboard entry from `GET /v1/soundboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Soundboard {
    pub id: String,
    pub title: String,
    pub background: String,
    /// Sound ids on this board
    pub sounds: Vec<String>,
}

/// A sound-effect entry from `GET /v1/soundboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sound {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub volume: f64,
    pub fade_in: f64,
    pub fade_out: f64,
}

/// Response of `GET /v1/soundboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundboardListing {
    pub soundboards: Vec<Soundboard>,
    pub sounds: Vec<Sound>,
}

/// Currently loaded track in `GET /v1/playlist/playback`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackState {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Seconds
    pub duration: f64,
    /// Seconds
    pub progress: f64,
}

/// Currently loaded playlist in `GET /v1/playlist/playback`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistState {
    pub id: String,
    pub title: String,
}

/// Response of `GET /v1/playlist/playback`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistPlayback {
    pub playing: bool,
    pub volume: f64,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: String,
    pub track: Option<TrackState>,
    pub playlist: Option<PlaylistState>,
}

/// A playing sound in `GET /v1/soundboard/playback`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SoundState {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub volume: f64,
    pub fade_in: f64,
    pub fade_out: f64,
    /// Seconds
    pub duration: f64,
    /// Seconds
    pub progress: f64,
}

/// Response of `GET /v1/soundboard/playback`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundPlayback {
    pub sounds: Vec<SoundState>,
}

/// Request body and response of the `PUT .../play` and `PUT .../stop` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KenkuId {
    pub id: String,
}

impl KenkuId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Anything addressable by id or title
pub trait Titled {
    fn id(&self) -> &str;
    fn title(&self) -> &str;

    /// Exact id match
    fn has_id(&self, query: &str) -> bool {
        self.id() == query
    }

    /// Case-insensitive title match
    fn has_title(&self, query: &str) -> bool {
        self.title().to_lowercase() == query.trim().to_lowercase()
    }

    /// Case-insensitive substring match on the title, or exact id match
    fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        !needle.is_empty() && (self.has_id(query) || self.title().to_lowercase().contains(&needle))
    }
}

macro_rules! impl_titled {
    ($($ty:ty),*) => {
        $(impl Titled for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn title(&self) -> &str {
                &self.title
            }
        })*
    };
}

impl_titled!(Playlist, Track, Soundboard, Sound, SoundState);

/// Find by exact id first, then by case-insensitive title
pub fn find_by_id_or_title<'a, T: Titled>(items: &'a [T], query: &str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| item.has_id(query))
        .or_else(|| items.iter().find(|item| item.has_title(query)))
}

/// Resolve an ordered id list against a collection, skipping ids that do not resolve
fn resolve_ids<'a, T: Titled>(ids: &[String], items: &'a [T]) -> Vec<&'a T> {
    ids.iter()
        .filter_map(|id| items.iter().find(|item| item.id() == id))
        .collect()
}

impl PlaylistListing {
    pub fn find_playlist(&self, query: &str) -> Option<&Playlist> {
        find_by_id_or_title(&self.playlists, query)
    }

    pub fn find_track(&self, query: &str) -> Option<&Track> {
        find_by_id_or_title(&self.tracks, query)
    }

    /// Tracks of a playlist in playlist order
    pub fn tracks_of(&self, playlist: &Playlist) -> Vec<&Track> {
        resolve_ids(&playlist.tracks, &self.tracks)
    }
}

impl SoundboardListing {
    pub fn find_soundboard(&self, query: &str) -> Option<&Soundboard> {
        find_by_id_or_title(&self.soundboards, query)
    }

    pub fn find_sound(&self, query: &str) -> Option<&Sound> {
        find_by_id_or_title(&self.sounds, query)
    }

    /// Sounds of a soundboard in board order
    pub fn sounds_of(&self, soundboard: &Soundboard) -> Vec<&Sound> {
        resolve_ids(&soundboard.sounds, &self.sounds)
    }
}
