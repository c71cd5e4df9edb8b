use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::*;
use crate::engine::EngineCmd;
use crate::library::Track;
use crate::player::{PlayMode, PlaybackSnapshot, new_replica_handle};

fn ready_gate() -> ReadinessGate {
    let gate = ReadinessGate::new();
    gate.signal_ready();
    gate
}

fn track(title: &str) -> Track {
    Track {
        id: None,
        title: title.into(),
        artists: vec![],
        album: None,
        file_path: PathBuf::from("/music/x.mp3"),
        duration_ms: None,
        cover_art: vec![],
        lyrics: String::new(),
        display: title.into(),
    }
}

#[test]
fn play_marks_busy_synchronously_and_snapshot_clears_it() {
    let (tx, rx) = mpsc::channel();
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    gateway.play().unwrap();
    assert!(replica.lock().unwrap().is_busy());
    assert!(matches!(rx.try_recv().unwrap(), EngineCmd::Play));

    replica
        .lock()
        .unwrap()
        .apply_snapshot(PlaybackSnapshot::default());
    assert!(!replica.lock().unwrap().is_busy());
}

#[test]
fn failed_dispatch_clears_busy_and_leaves_state_untouched() {
    let (tx, rx) = mpsc::channel::<EngineCmd>();
    drop(rx);
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    assert!(matches!(
        gateway.next_track(),
        Err(DispatchError::ChannelClosed)
    ));

    let replica = replica.lock().unwrap();
    assert!(!replica.is_busy());
    assert_eq!(*replica.state(), PlaybackSnapshot::default());
}

#[test]
fn set_volume_clamps_before_the_wire_and_the_replica() {
    let (tx, rx) = mpsc::channel();
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    gateway.set_volume(1.7).unwrap();
    assert_eq!(replica.lock().unwrap().state().volume, 1.0);
    match rx.try_recv().unwrap() {
        EngineCmd::SetVolume(v) => assert_eq!(v, 1.0),
        other => panic!("unexpected command {other:?}"),
    }

    gateway.set_volume(-2.0).unwrap();
    assert_eq!(replica.lock().unwrap().state().volume, 0.0);
    match rx.try_recv().unwrap() {
        EngineCmd::SetVolume(v) => assert_eq!(v, 0.0),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn optimistic_volume_write_survives_a_failed_dispatch() {
    let (tx, rx) = mpsc::channel::<EngineCmd>();
    drop(rx);
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    assert!(gateway.set_volume(0.25).is_err());
    // Accepted drift: the optimistic write stays until a snapshot corrects it.
    assert_eq!(replica.lock().unwrap().state().volume, 0.25);
    assert!(!replica.lock().unwrap().is_busy());
}

#[test]
fn set_play_mode_is_visible_before_confirmation() {
    let (tx, _rx) = mpsc::channel();
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    gateway.set_play_mode(PlayMode::Random).unwrap();
    assert_eq!(
        replica.lock().unwrap().state().current_play_mode,
        PlayMode::Random
    );
}

#[test]
fn play_to_playlist_carries_tracks_and_single_mode() {
    let (tx, rx) = mpsc::channel();
    let replica = new_replica_handle();
    let gateway = PlayerGateway::new(tx, replica.clone(), ready_gate());

    gateway.play_to_playlist(vec![track("a"), track("b")]).unwrap();
    assert!(replica.lock().unwrap().is_busy());
    match rx.try_recv().unwrap() {
        EngineCmd::PlayToPlaylist { tracks, mode } => {
            assert_eq!(tracks.len(), 2);
            assert_eq!(mode, PlayMode::Single);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn command_issued_before_ready_is_dispatched_exactly_once_after_the_flip() {
    let (tx, rx) = mpsc::channel();
    let replica = new_replica_handle();
    let gate = ReadinessGate::new();
    let gateway = PlayerGateway::new(tx, replica.clone(), gate.clone());

    let issuer = thread::spawn(move || gateway.play().unwrap());

    // The command is held, not dropped, while the gate is closed. Busy is
    // already observable because it flips at issue time.
    thread::sleep(Duration::from_millis(50));
    assert!(rx.try_recv().is_err());
    assert!(replica.lock().unwrap().is_busy());

    gate.signal_ready();
    issuer.join().unwrap();

    assert!(matches!(
        rx.recv_timeout(Duration::from_secs(1)).unwrap(),
        EngineCmd::Play
    ));
    assert!(rx.try_recv().is_err());
}

#[test]
fn readiness_gate_fast_path_when_already_ready() {
    let gate = ReadinessGate::new();
    assert!(!gate.is_ready());
    gate.signal_ready();
    assert!(gate.is_ready());
    // Returns immediately; a second signal is a no-op.
    gate.wait_ready();
    gate.signal_ready();
    gate.wait_ready();
}
