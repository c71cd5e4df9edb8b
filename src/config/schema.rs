use serde::Deserialize;

use crate::player::PlayMode;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dacapo/config.toml` or `~/.config/dacapo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DACAPO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub engine: EngineSettings,
    pub library: LibrarySettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial output volume, clamped to `[0, 1]` when applied.
    pub volume: f32,
    /// Default advance policy.
    pub play_mode: PlayModeSetting,
    /// Whether to start playing the scanned library on startup.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            play_mode: PlayModeSetting::Repeat,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Command-loop receive timeout; also the autoadvance check cadence (milliseconds).
    pub tick_ms: u64,
    /// How often a position-only snapshot is emitted while playing (milliseconds).
    pub progress_emit_ms: u64,
    /// Fade-out duration on shutdown (milliseconds). Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            progress_emit_ms: 500,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayModeSetting {
    #[serde(alias = "sequential", alias = "loop", alias = "loop-all")]
    Repeat,
    #[serde(alias = "shuffle")]
    Random,
    #[serde(alias = "single-track", alias = "repeat-one")]
    Single,
}

impl From<PlayModeSetting> for PlayMode {
    fn from(setting: PlayModeSetting) -> Self {
        match setting {
            PlayModeSetting::Repeat => PlayMode::Repeat,
            PlayModeSetting::Random => PlayMode::Random,
            PlayModeSetting::Single => PlayMode::Single,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    /// "artists - title", whatever the tags produced.
    Display,
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Which track fields to show in the now-playing line, and in what order.
    ///
    /// Example: ["artist", "title", "album"]
    pub now_playing_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_fields`.
    pub now_playing_separator: String,

    /// Whether the now-playing line carries elapsed/total time and progress.
    pub show_progress: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            now_playing_fields: vec![TrackDisplayField::Display],
            now_playing_separator: " - ".to_string(),
            show_progress: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields to use to build `Track.display` and its ordering.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}
