use std::sync::{Arc, Mutex};

use super::snapshot::{PlayMode, PlaybackSnapshot};

/// Shared handle to the replica, written by the event pump and the gateway,
/// read by everything that renders state. Critical sections are short and
/// never nest.
pub type ReplicaHandle = Arc<Mutex<PlayerReplica>>;

pub fn new_replica_handle() -> ReplicaHandle {
    Arc::new(Mutex::new(PlayerReplica::new()))
}

/// Local mirror of the engine's playback state.
///
/// Updated from two sources only: inbound snapshot events (total overwrite)
/// and the optimistic writes in [`set_volume`](Self::set_volume) and
/// [`set_play_mode`](Self::set_play_mode). Last snapshot wins; there is no
/// merge and no conflict detection.
#[derive(Debug, Default)]
pub struct PlayerReplica {
    state: PlaybackSnapshot,
    busy: bool,
}

impl PlayerReplica {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackSnapshot {
        &self.state
    }

    /// Replace the entire state with `snapshot`.
    ///
    /// A single value assignment keeps the update atomic from any reader's
    /// point of view; events never patch individual fields. Clears the busy
    /// flag unconditionally: a fresh snapshot is the engine's confirmation.
    pub fn apply_snapshot(&mut self, snapshot: PlaybackSnapshot) {
        self.state = snapshot;
        self.busy = false;
    }

    /// A state-affecting command has been issued and not yet confirmed.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn mark_busy(&mut self) {
        self.busy = true;
    }

    pub fn clear_busy(&mut self) {
        self.busy = false;
    }

    /// Optimistic volume write, clamped at the write boundary.
    pub fn set_volume(&mut self, volume: f32) {
        self.state.volume = volume.clamp(0.0, 1.0);
    }

    /// Optimistic play-mode write.
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.state.current_play_mode = mode;
    }

    /// Playback progress in `[0.0, 100.0]`.
    ///
    /// `0.0` when the duration is unknown or zero. Capped at 100 because the
    /// position may transiently overshoot a stale duration during a track
    /// transition.
    pub fn progress_percent(&self) -> f64 {
        match self.state.total_duration {
            None | Some(0) => 0.0,
            Some(total) => {
                ((self.state.current_position as f64 / total as f64) * 100.0).min(100.0)
            }
        }
    }

    /// Current position as `MM:SS`.
    pub fn formatted_position(&self) -> String {
        format_clock(self.state.current_position)
    }

    /// Total duration as `MM:SS`; `"00:00"` when unknown.
    pub fn formatted_duration(&self) -> String {
        format_clock(self.state.total_duration.unwrap_or(0))
    }
}

/// Render milliseconds as zero-padded `MM:SS`. Minutes are not capped at 59,
/// so 75 minutes renders as `"75:00"`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
