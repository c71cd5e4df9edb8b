use chrono::Utc;
use rand::RngExt;
use thiserror::Error;
use uuid::Uuid;

use crate::library::Track;
use crate::player::{PlayMode, Playlist};

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("index {index} out of bounds (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Owns the active playlist, the current index and the advance policy.
///
/// Pure index bookkeeping; it never touches the audio sink. The engine thread
/// asks it which track comes next and then drives the transport itself.
#[derive(Debug, Clone)]
pub struct PlaylistManager {
    playlist: Playlist,
    pub current_index: Option<usize>,
    pub play_mode: PlayMode,
}

impl PlaylistManager {
    pub fn new() -> Self {
        Self {
            playlist: Playlist::empty(),
            current_index: None,
            play_mode: PlayMode::Repeat,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn len(&self) -> usize {
        self.playlist.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index
            .and_then(|idx| self.playlist.tracks.get(idx))
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode = mode;
    }

    pub fn set_current_index(&mut self, index: usize) -> Result<(), PlaylistError> {
        if index < self.len() {
            self.current_index = Some(index);
            Ok(())
        } else {
            Err(PlaylistError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
        }
    }

    /// Replace the whole playlist with a freshly minted snapshot and reset the
    /// index to the first track.
    pub fn replace(&mut self, name: &str, tracks: Vec<Track>, mode: PlayMode) {
        let now = Utc::now();
        self.current_index = if tracks.is_empty() { None } else { Some(0) };
        self.playlist = Playlist {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            tracks,
            created_at: now,
            updated_at: now,
        };
        self.play_mode = mode;
    }

    /// Advance according to the play mode and return the new current track.
    pub fn next_track(&mut self) -> Option<&Track> {
        match self.play_mode {
            PlayMode::Repeat => self.next_repeat(),
            PlayMode::Random => self.next_random(),
            PlayMode::Single => self.current_track(),
        }
    }

    fn next_repeat(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let next = match self.current_index {
            Some(current) if current + 1 < len => current + 1,
            // End of the playlist wraps to the start.
            Some(_) => 0,
            None => 0,
        };
        self.current_index = Some(next);
        self.current_track()
    }

    fn next_random(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        if len == 1 {
            self.current_index = Some(0);
            return self.current_track();
        }

        // Uniform pick that never lands on the current track twice in a row.
        let current = self.current_index;
        let mut rng = rand::rng();
        let next = loop {
            let candidate = rng.random_range(0..len);
            if current != Some(candidate) {
                break candidate;
            }
        };
        self.current_index = Some(next);
        self.current_track()
    }

    /// Retreat according to the play mode and return the new current track.
    ///
    /// Repeat wraps from the first track to the last; Single stays put;
    /// Random steps back sequentially and returns `None` at the start,
    /// leaving the index unchanged.
    pub fn previous_track(&mut self) -> Option<&Track> {
        match self.play_mode {
            PlayMode::Repeat => self.previous_repeat(),
            PlayMode::Single => self.current_track(),
            PlayMode::Random => self.previous_sequential(),
        }
    }

    fn previous_repeat(&mut self) -> Option<&Track> {
        let len = self.len();
        if len == 0 {
            return None;
        }

        let prev = match self.current_index {
            Some(0) => len - 1,
            Some(current) => current - 1,
            None => len - 1,
        };
        self.current_index = Some(prev);
        self.current_track()
    }

    fn previous_sequential(&mut self) -> Option<&Track> {
        match self.current_index {
            Some(current) if current > 0 => {
                self.current_index = Some(current - 1);
                self.current_track()
            }
            _ => None,
        }
    }
}

impl Default for PlaylistManager {
    fn default() -> Self {
        Self::new()
    }
}
