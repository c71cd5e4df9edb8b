use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::EngineSettings;
use crate::gateway::ReadinessGate;
use crate::player::PlaybackSnapshot;

use super::thread::spawn_engine_thread;
use super::types::EngineCmd;

/// Owning handle for the engine thread.
pub struct Engine {
    tx: Sender<EngineCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Engine {
    /// Spawn the engine thread and return its handle together with the
    /// snapshot event stream. `gate` is signaled once the command loop is
    /// accepting commands; it stays closed if the engine fails to come up.
    pub fn spawn(
        settings: EngineSettings,
        gate: ReadinessGate,
    ) -> (Self, Receiver<PlaybackSnapshot>) {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlaybackSnapshot>();

        let join = spawn_engine_thread(rx, event_tx, gate, settings);

        (
            Self {
                tx,
                join: Mutex::new(Some(join)),
            },
            event_rx,
        )
    }

    /// Sender half of the command channel, for wiring up a gateway.
    pub fn command_sender(&self) -> Sender<EngineCmd> {
        self.tx.clone()
    }

    /// Ask the engine to fade out and exit, then join its thread.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(EngineCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
