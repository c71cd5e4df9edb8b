use crate::library::Track;
use crate::player::PlayMode;

/// Commands accepted by the engine thread.
///
/// All are one-way and asynchronously acknowledged: delivery into the channel
/// is the only acknowledgment, effect visibility arrives later as a snapshot
/// event. None are idempotent — sending `NextTrack` twice advances twice.
#[derive(Debug)]
pub enum EngineCmd {
    /// Start playback of the current track, or resume when paused.
    Play,
    Pause,
    Resume,
    /// Advance the playlist index according to the play mode.
    NextTrack,
    /// Retreat the playlist index according to the play mode.
    PreviousTrack,
    /// Set output volume; the value has been clamped to `[0, 1]` by the sender.
    SetVolume(f32),
    /// Seek within the current track, absolute position in milliseconds.
    Seek(u64),
    SetPlayMode(PlayMode),
    /// Replace the current playlist with `tracks` and start playing.
    PlayToPlaylist { tracks: Vec<Track>, mode: PlayMode },
    /// Stop playback and reset the position.
    Stop,
    /// Leave the command loop, optionally fading out first.
    Quit { fade_out_ms: u64 },
}
