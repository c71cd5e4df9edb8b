use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::library::Track;

/// Transport state as reported by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Advance policy applied when a track ends or next/previous is requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// Sequential order, wrapping at both ends.
    Repeat,
    /// Uniform random pick, avoiding an immediate repeat.
    Random,
    /// Stay on the current track.
    Single,
}

impl Default for PlayMode {
    fn default() -> Self {
        Self::Repeat
    }
}

/// An ordered sequence of tracks. Order is playback order.
///
/// Playlists are value snapshots: the frontend never edits one in place, it
/// requests engine operations that produce a new snapshot. Timestamps
/// serialize as ISO-8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            tracks: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::empty()
    }
}

/// The complete playback state as known to the engine at one point in time.
///
/// Delivered as a single event payload and applied as a whole; the engine
/// never sends partial updates. Serialized field names are a wire contract
/// shared with the engine process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub playback_state: PlaybackState,
    /// Output volume in `[0.0, 1.0]`.
    pub volume: f32,
    /// Position within the current track, in milliseconds.
    pub current_position: u64,
    /// Track length in milliseconds; `None` means unknown, distinct from 0.
    pub total_duration: Option<u64>,
    pub current_file: Option<PathBuf>,
    pub current_track: Option<Track>,
    /// Always present, possibly empty.
    pub current_playlist: Playlist,
    pub current_play_mode: PlayMode,
    /// Index of the current track within `current_playlist`.
    pub current_index: Option<usize>,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            playback_state: PlaybackState::Stopped,
            volume: 1.0,
            current_position: 0,
            total_duration: None,
            current_file: None,
            current_track: None,
            current_playlist: Playlist::empty(),
            current_play_mode: PlayMode::Repeat,
            current_index: None,
        }
    }
}

impl PlaybackSnapshot {
    pub fn is_playing(&self) -> bool {
        self.playback_state == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.playback_state == PlaybackState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.playback_state == PlaybackState::Stopped
    }
}
