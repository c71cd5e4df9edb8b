use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::EngineSettings;
use crate::gateway::ReadinessGate;
use crate::player::{PlaybackSnapshot, PlaybackState};

use super::playlist::PlaylistManager;
use super::sink::create_sink_at;
use super::types::EngineCmd;

/// Transport state around the audio sink: pause bookkeeping and
/// `Instant`-based position accounting.
struct Transport {
    sink: Option<Sink>,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    volume: f32,
    current_file: Option<PathBuf>,
}

impl Transport {
    fn new() -> Self {
        Self {
            sink: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            volume: 1.0,
            current_file: None,
        }
    }

    fn state(&self) -> PlaybackState {
        match &self.sink {
            None => PlaybackState::Stopped,
            Some(_) if self.paused => PlaybackState::Paused,
            Some(_) => PlaybackState::Playing,
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.is_some() && !self.paused
    }

    fn sink_empty(&self) -> bool {
        self.sink.as_ref().map(Sink::empty).unwrap_or(false)
    }

    fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Load `path` into a fresh sink and start playing at `start_at`.
    /// On failure the transport ends up stopped.
    fn play_file(&mut self, stream: &OutputStream, path: &Path, start_at: Duration) -> bool {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink_at(stream, path, start_at) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                sink.play();
                self.sink = Some(sink);
                self.paused = false;
                self.started_at = Some(Instant::now());
                self.accumulated = start_at;
                self.current_file = Some(path.to_path_buf());
                true
            }
            Err(e) => {
                error!("engine: {e}");
                self.stop();
                false
            }
        }
    }

    fn pause(&mut self) {
        let Some(s) = self.sink.as_ref() else { return };
        if self.paused {
            return;
        }
        s.pause();
        if let Some(st) = self.started_at {
            self.accumulated += st.elapsed();
        }
        self.started_at = None;
        self.paused = true;
    }

    fn resume(&mut self) {
        let Some(s) = self.sink.as_ref() else { return };
        if !self.paused {
            return;
        }
        s.play();
        self.started_at = Some(Instant::now());
        self.paused = false;
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.current_file = None;
    }

    fn set_volume(&mut self, volume: f32) {
        // Clamp again at this write boundary; the engine trusts no caller.
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(s) = self.sink.as_ref() else { return };
        if fade_out_ms == 0 {
            s.set_volume(0.0);
            return;
        }
        let steps: u64 = 20;
        let step_ms = (fade_out_ms / steps).max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            s.set_volume(self.volume * (1.0 - t));
            thread::sleep(Duration::from_millis(step_ms));
        }
        s.set_volume(0.0);
    }
}

fn make_snapshot(transport: &Transport, playlist: &PlaylistManager) -> PlaybackSnapshot {
    PlaybackSnapshot {
        playback_state: transport.state(),
        volume: transport.volume,
        current_position: transport.position().as_millis() as u64,
        total_duration: if transport.current_file.is_some() {
            playlist.current_track().and_then(|t| t.duration_ms)
        } else {
            None
        },
        current_file: transport.current_file.clone(),
        current_track: playlist.current_track().cloned(),
        current_playlist: playlist.playlist().clone(),
        current_play_mode: playlist.play_mode,
        current_index: playlist.current_index,
    }
}

fn start_current(stream: &OutputStream, transport: &mut Transport, playlist: &PlaylistManager) {
    if let Some(track) = playlist.current_track() {
        let path = track.file_path.clone();
        transport.play_file(stream, &path, Duration::ZERO);
    }
}

fn seek_to(stream: &OutputStream, transport: &mut Transport, position_ms: u64) {
    let Some(path) = transport.current_file.clone() else {
        debug!("engine: seek ignored, nothing loaded");
        return;
    };

    let was_paused = transport.paused;
    if transport.play_file(stream, &path, Duration::from_millis(position_ms)) && was_paused {
        transport.pause();
    }
}

fn handle_cmd(
    cmd: EngineCmd,
    stream: &OutputStream,
    transport: &mut Transport,
    playlist: &mut PlaylistManager,
) {
    match cmd {
        EngineCmd::Play => {
            if transport.sink.is_some() && transport.paused {
                transport.resume();
            } else {
                if playlist.current_index.is_none() && !playlist.is_empty() {
                    // No current track yet: start from the top.
                    let _ = playlist.set_current_index(0);
                }
                start_current(stream, transport, playlist);
            }
        }
        EngineCmd::Pause => transport.pause(),
        EngineCmd::Resume => transport.resume(),
        EngineCmd::NextTrack => {
            if playlist.next_track().is_some() {
                start_current(stream, transport, playlist);
            }
        }
        EngineCmd::PreviousTrack => {
            if playlist.previous_track().is_some() {
                start_current(stream, transport, playlist);
            }
        }
        EngineCmd::SetVolume(v) => transport.set_volume(v),
        EngineCmd::Seek(position_ms) => seek_to(stream, transport, position_ms),
        EngineCmd::SetPlayMode(mode) => playlist.set_play_mode(mode),
        EngineCmd::PlayToPlaylist { tracks, mode } => {
            info!("engine: replacing playlist with {} tracks", tracks.len());
            playlist.replace("", tracks, mode);
            if playlist.is_empty() {
                transport.stop();
            } else {
                start_current(stream, transport, playlist);
            }
        }
        EngineCmd::Stop => transport.stop(),
        EngineCmd::Quit { fade_out_ms } => {
            transport.fade_out(fade_out_ms);
            transport.stop();
        }
    }
}

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<PlaybackSnapshot>,
    gate: ReadinessGate,
    settings: EngineSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                // The gate stays closed; callers keep waiting, which is the
                // contract for an engine that never comes up.
                error!("engine: no audio output device: {e}");
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a console frontend.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut playlist = PlaylistManager::new();
        let mut transport = Transport::new();

        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let progress_every = Duration::from_millis(settings.progress_emit_ms.max(1));
        let mut last_progress = Instant::now();

        // Commands are accepted from here on; the gate holds earlier callers
        // until now.
        gate.signal_ready();
        debug!("engine: command loop ready");

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => {
                    let quit = matches!(cmd, EngineCmd::Quit { .. });
                    handle_cmd(cmd, &stream, &mut transport, &mut playlist);
                    // Every applied command yields a fresh full snapshot.
                    let _ = events.send(make_snapshot(&transport, &playlist));
                    last_progress = Instant::now();
                    if quit {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if transport.is_playing() && transport.sink_empty() {
                        // Track ran out on its own; the play mode decides the
                        // follow-up (Single replays, Repeat wraps, Random picks).
                        let _ = playlist.next_track();
                        if playlist.current_track().is_some() {
                            start_current(&stream, &mut transport, &playlist);
                        } else {
                            transport.stop();
                        }
                        let _ = events.send(make_snapshot(&transport, &playlist));
                        last_progress = Instant::now();
                    } else if transport.is_playing() && last_progress.elapsed() >= progress_every {
                        // Keep position eventually consistent while playing.
                        let _ = events.send(make_snapshot(&transport, &playlist));
                        last_progress = Instant::now();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
