//! Reference playback engine: the authoritative side of the command/event
//! protocol.
//!
//! The engine runs on its own thread, owns the playlist and the audio sink,
//! and is the only writer of playback truth. It consumes commands from one
//! channel and publishes a full [`PlaybackSnapshot`](crate::player::PlaybackSnapshot)
//! on another after every state change — including changes it triggers
//! itself, such as end-of-track autoadvance.

mod handle;
mod playlist;
mod sink;
mod thread;
mod types;

pub use handle::Engine;
pub use playlist::{PlaylistError, PlaylistManager};
pub use types::EngineCmd;

#[cfg(test)]
mod tests;
