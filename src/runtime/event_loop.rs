use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use log::info;

use crate::config::Settings;
use crate::engine::Engine;
use crate::gateway::PlayerGateway;
use crate::library::display_from_fields;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackSnapshot, PlaybackState, ReplicaHandle};

use super::mpris_sync::update_mpris;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Last transport state and file echoed to the console, so transitions
    /// print once instead of once per snapshot.
    last_playback: PlaybackState,
    last_file: Option<PathBuf>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main runtime loop: pumps snapshot events into the replica in receipt
/// order, mirrors the result to MPRIS and the console, and services pending
/// intents through the gateway. Returns `Ok(())` when shutdown is requested.
pub fn run(
    settings: &Settings,
    replica: &ReplicaHandle,
    gateway: &PlayerGateway,
    engine: &Engine,
    mpris: &MprisHandle,
    events_rx: &Receiver<PlaybackSnapshot>,
    control_rx: &Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let fade_out = Duration::from_millis(settings.engine.quit_fade_out_ms);

    loop {
        // Apply every pending snapshot, oldest first. Each application is a
        // whole-state replacement, so the newest one wins with no residue.
        let mut applied = false;
        while let Ok(snapshot) = events_rx.try_recv() {
            let mut replica = replica.lock().unwrap_or_else(|e| e.into_inner());
            replica.apply_snapshot(snapshot);
            applied = true;
        }

        if applied {
            update_mpris(mpris, replica);
            announce_transitions(settings, replica, state);
        }

        match control_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(ControlCmd::Quit) => {
                engine.quit_softly(fade_out);
                return Ok(());
            }
            Ok(cmd) => apply_control(cmd, gateway, replica),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Every intent source is gone; shut down cleanly.
                engine.quit_softly(fade_out);
                return Ok(());
            }
        }
    }
}

/// Map an intent to gateway calls. Dispatch failures are already logged by
/// the gateway and the replica stays on its last-known state, so they are
/// not surfaced further here.
fn apply_control(cmd: ControlCmd, gateway: &PlayerGateway, replica: &ReplicaHandle) {
    let (playing, paused) = {
        let replica = replica.lock().unwrap_or_else(|e| e.into_inner());
        let snap = replica.state();
        (snap.is_playing(), snap.is_paused())
    };

    let _ = match cmd {
        ControlCmd::Play => {
            if paused {
                gateway.resume()
            } else {
                gateway.play()
            }
        }
        ControlCmd::Pause => gateway.pause(),
        ControlCmd::Resume => gateway.resume(),
        ControlCmd::PlayPause => {
            if playing {
                gateway.pause()
            } else if paused {
                gateway.resume()
            } else {
                gateway.play()
            }
        }
        ControlCmd::Stop => gateway.stop(),
        ControlCmd::Next => gateway.next_track(),
        ControlCmd::Prev => gateway.previous_track(),
        ControlCmd::SetVolume(v) => gateway.set_volume(v),
        ControlCmd::Seek(ms) => gateway.seek(ms),
        ControlCmd::SetMode(mode) => gateway.set_play_mode(mode),
        // Handled by the caller.
        ControlCmd::Quit => Ok(()),
    };
}

fn announce_transitions(settings: &Settings, replica: &ReplicaHandle, state: &mut EventLoopState) {
    let replica = replica.lock().unwrap_or_else(|e| e.into_inner());
    let snap = replica.state();

    let changed =
        snap.playback_state != state.last_playback || snap.current_file != state.last_file;
    if !changed {
        return;
    }
    state.last_playback = snap.playback_state;
    state.last_file = snap.current_file.clone();

    match &snap.current_track {
        Some(track) => {
            let line = display_from_fields(
                &track.file_path,
                &track.title,
                &track.artists,
                track.album.as_deref(),
                &settings.console.now_playing_fields,
                &settings.console.now_playing_separator,
            );
            if settings.console.show_progress && !snap.is_stopped() {
                info!(
                    "{:?}: {line} [{}/{} {:.0}%]",
                    snap.playback_state,
                    replica.formatted_position(),
                    replica.formatted_duration(),
                    replica.progress_percent(),
                );
            } else {
                info!("{:?}: {line}", snap.playback_state);
            }
        }
        None => info!("{:?}", snap.playback_state),
    }
}
