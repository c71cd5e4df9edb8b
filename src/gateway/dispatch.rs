use std::sync::mpsc::Sender;

use log::error;
use thiserror::Error;

use crate::engine::EngineCmd;
use crate::library::Track;
use crate::player::{PlayMode, PlayerReplica, ReplicaHandle};

use super::readiness::ReadinessGate;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("engine command channel is closed")]
    ChannelClosed,
}

/// Frontend-side boundary toward the engine.
///
/// State-affecting commands (`play`, `next_track`, `previous_track`,
/// `play_to_playlist`) mark the replica busy at issue time; the flag is
/// cleared by the next snapshot or by a failed dispatch, never by a timer.
/// `set_volume` and `set_play_mode` write the replica optimistically before
/// dispatching, and those writes are NOT rolled back on failure: the value
/// drifts until the next snapshot corrects it.
pub struct PlayerGateway {
    tx: Sender<EngineCmd>,
    replica: ReplicaHandle,
    gate: ReadinessGate,
}

impl PlayerGateway {
    pub fn new(tx: Sender<EngineCmd>, replica: ReplicaHandle, gate: ReadinessGate) -> Self {
        Self { tx, replica, gate }
    }

    pub fn replica(&self) -> ReplicaHandle {
        self.replica.clone()
    }

    pub fn play(&self) -> Result<(), DispatchError> {
        self.dispatch_busy(EngineCmd::Play)
    }

    pub fn pause(&self) -> Result<(), DispatchError> {
        self.dispatch(EngineCmd::Pause)
    }

    pub fn resume(&self) -> Result<(), DispatchError> {
        self.dispatch(EngineCmd::Resume)
    }

    pub fn next_track(&self) -> Result<(), DispatchError> {
        self.dispatch_busy(EngineCmd::NextTrack)
    }

    pub fn previous_track(&self) -> Result<(), DispatchError> {
        self.dispatch_busy(EngineCmd::PreviousTrack)
    }

    pub fn stop(&self) -> Result<(), DispatchError> {
        self.dispatch(EngineCmd::Stop)
    }

    /// Seek within the current track, absolute position in milliseconds.
    /// Rapid repeated calls (slider drags) are all forwarded; the engine
    /// tolerates the burst.
    pub fn seek(&self, position_ms: u64) -> Result<(), DispatchError> {
        self.dispatch(EngineCmd::Seek(position_ms))
    }

    /// Set output volume. Clamped to `[0, 1]` here, before the optimistic
    /// write and before anything reaches the wire.
    pub fn set_volume(&self, volume: f32) -> Result<(), DispatchError> {
        let volume = volume.clamp(0.0, 1.0);
        self.with_replica(|r| r.set_volume(volume));
        self.dispatch(EngineCmd::SetVolume(volume))
    }

    pub fn set_play_mode(&self, mode: PlayMode) -> Result<(), DispatchError> {
        self.with_replica(|r| r.set_play_mode(mode));
        self.dispatch(EngineCmd::SetPlayMode(mode))
    }

    /// Replace the engine's playlist with `tracks` and start playing.
    pub fn play_to_playlist(&self, tracks: Vec<Track>) -> Result<(), DispatchError> {
        self.dispatch_busy(EngineCmd::PlayToPlaylist {
            tracks,
            mode: PlayMode::Single,
        })
    }

    fn with_replica(&self, f: impl FnOnce(&mut PlayerReplica)) {
        let mut replica = self.replica.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut replica);
    }

    fn dispatch(&self, cmd: EngineCmd) -> Result<(), DispatchError> {
        self.gate.wait_ready();
        self.tx.send(cmd).map_err(|e| {
            error!("gateway: dispatch failed: {e}");
            DispatchError::ChannelClosed
        })
    }

    fn dispatch_busy(&self, cmd: EngineCmd) -> Result<(), DispatchError> {
        // Busy flips at issue time, synchronously, before any waiting or
        // sending happens.
        self.with_replica(PlayerReplica::mark_busy);
        self.gate.wait_ready();
        self.tx.send(cmd).map_err(|e| {
            error!("gateway: dispatch failed: {e}");
            self.with_replica(PlayerReplica::clear_busy);
            DispatchError::ChannelClosed
        })
    }
}
