//! Runtime wiring: settings, engine spawn, gateway construction, console and
//! MPRIS intents, and the event loop that keeps the replica in sync.

use std::env;
use std::path::Path;
use std::sync::mpsc;

use log::{debug, info};

use crate::engine::Engine;
use crate::gateway::{PlayerGateway, ReadinessGate};
use crate::library;
use crate::mpris::{self, ControlCmd};
use crate::player::new_replica_handle;

mod control;
mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = library::scan(Path::new(&dir), &settings.library);
    info!("{} tracks in {dir}", tracks.len());

    let gate = ReadinessGate::new();
    let (engine, events_rx) = Engine::spawn(settings.engine.clone(), gate.clone());
    if !gate.is_ready() {
        debug!("engine not ready yet; commands are held until it is");
    }

    let gateway = PlayerGateway::new(engine.command_sender(), new_replica_handle(), gate);
    let replica = gateway.replica();

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = mpris::spawn_mpris(control_tx.clone());
    let _console = control::spawn_console(control_tx);

    startup::apply_playback_defaults(&gateway, &settings, tracks);

    let mut state = event_loop::EventLoopState::new();
    event_loop::run(
        &settings,
        &replica,
        &gateway,
        &engine,
        &mpris,
        &events_rx,
        &control_rx,
        &mut state,
    )
}
