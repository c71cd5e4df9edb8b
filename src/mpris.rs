//! MPRIS media-control integration.
//!
//! Mirrors the replica's playback state onto the session bus so desktop
//! media keys and `playerctl` see the player, and forwards their commands as
//! [`ControlCmd`] intents — the same channel the console reader feeds. Bus
//! failures disable the integration with a logged warning; they never take
//! the process down.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use log::warn;
use zbus::{Connection, interface};
use zvariant::{OwnedValue, Value};

use crate::player::{PlayMode, PlaybackState};

/// A user intent toward the player, from MPRIS or the console.
#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Resume,
    Stop,
    Next,
    Prev,
    SetVolume(f32),
    Seek(u64),
    SetMode(PlayMode),
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    artists: Vec<String>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_now_playing(&self, title: Option<String>, artists: Vec<String>) {
        if let Ok(mut s) = self.state.lock() {
            s.title = title;
            s.artists = artists;
        }
    }
}

pub(crate) fn status_str(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// Minimal xesam metadata so `playerctl metadata` shows something.
pub(crate) fn metadata_map(
    title: Option<&str>,
    artists: &[String],
) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();

    let title = title.unwrap_or("").to_string();
    let title_value = OwnedValue::try_from(Value::from(title)).unwrap_or_else(|_| {
        OwnedValue::try_from(Value::from(String::new())).expect("OwnedValue conversion")
    });
    map.insert("xesam:title".to_string(), title_value);

    if let Ok(artists_value) = OwnedValue::try_from(Value::from(artists.to_vec())) {
        map.insert("xesam:artist".to_string(), artists_value);
    }

    map
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for a headless frontend.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "dacapo"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        status_str(s.playback)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let Ok(s) = self.state.lock() else {
            return HashMap::new();
        };
        metadata_map(s.title.as_deref(), &s.artists)
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("mpris: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.dacapo")
                .await
            {
                warn!("mpris: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                warn!("mpris: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!("mpris: failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
