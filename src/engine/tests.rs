use std::path::PathBuf;

use super::playlist::{PlaylistError, PlaylistManager};
use crate::library::Track;
use crate::player::PlayMode;

fn t(title: &str) -> Track {
    Track {
        id: None,
        title: title.into(),
        artists: vec![],
        album: None,
        file_path: PathBuf::from(format!("/music/{title}.mp3")),
        duration_ms: Some(1_000),
        cover_art: vec![],
        lyrics: String::new(),
        display: title.into(),
    }
}

fn manager(n: usize, mode: PlayMode) -> PlaylistManager {
    let mut m = PlaylistManager::new();
    let tracks = (0..n).map(|i| t(&format!("t{i}"))).collect();
    m.replace("test", tracks, mode);
    m
}

#[test]
fn new_manager_is_empty_with_repeat_mode() {
    let m = PlaylistManager::new();
    assert!(m.is_empty());
    assert_eq!(m.current_index, None);
    assert_eq!(m.play_mode, PlayMode::Repeat);
    assert!(m.current_track().is_none());
}

#[test]
fn replace_mints_identity_and_resets_index() {
    let mut m = PlaylistManager::new();
    m.replace("a", vec![t("x"), t("y")], PlayMode::Single);
    let first_id = m.playlist().id.clone();
    assert!(!first_id.is_empty());
    assert_eq!(m.current_index, Some(0));
    assert_eq!(m.play_mode, PlayMode::Single);
    assert_eq!(m.playlist().created_at, m.playlist().updated_at);

    m.replace("b", vec![t("z")], PlayMode::Repeat);
    assert_ne!(m.playlist().id, first_id);
    assert_eq!(m.current_index, Some(0));
}

#[test]
fn replace_with_no_tracks_clears_index() {
    let mut m = manager(3, PlayMode::Repeat);
    m.replace("empty", vec![], PlayMode::Repeat);
    assert_eq!(m.current_index, None);
    assert!(m.next_track().is_none());
    assert!(m.previous_track().is_none());
}

#[test]
fn set_current_index_is_bounds_checked() {
    let mut m = manager(2, PlayMode::Repeat);
    assert!(m.set_current_index(1).is_ok());
    let err = m.set_current_index(2).unwrap_err();
    assert!(matches!(
        err,
        PlaylistError::IndexOutOfBounds { index: 2, len: 2 }
    ));
    assert_eq!(m.current_index, Some(1));
}

#[test]
fn next_repeat_advances_and_wraps() {
    let mut m = manager(3, PlayMode::Repeat);
    assert_eq!(m.next_track().unwrap().title, "t1");
    assert_eq!(m.next_track().unwrap().title, "t2");
    // End of the playlist wraps to the start.
    assert_eq!(m.next_track().unwrap().title, "t0");
}

#[test]
fn next_repeat_without_index_starts_at_zero() {
    let mut m = manager(3, PlayMode::Repeat);
    m.current_index = None;
    assert_eq!(m.next_track().unwrap().title, "t0");
}

#[test]
fn previous_repeat_retreats_and_wraps() {
    let mut m = manager(3, PlayMode::Repeat);
    assert_eq!(m.previous_track().unwrap().title, "t2");
    assert_eq!(m.previous_track().unwrap().title, "t1");
}

#[test]
fn single_mode_stays_on_the_current_track() {
    let mut m = manager(3, PlayMode::Single);
    assert!(m.set_current_index(1).is_ok());
    assert_eq!(m.next_track().unwrap().title, "t1");
    assert_eq!(m.previous_track().unwrap().title, "t1");
    assert_eq!(m.current_index, Some(1));
}

#[test]
fn random_next_avoids_an_immediate_repeat() {
    let mut m = manager(2, PlayMode::Random);
    // With two tracks the non-repeating pick is forced, so this is deterministic.
    for _ in 0..10 {
        let before = m.current_index;
        m.next_track();
        assert_ne!(m.current_index, before);
    }
}

#[test]
fn random_next_with_one_track_stays_put() {
    let mut m = manager(1, PlayMode::Random);
    assert_eq!(m.next_track().unwrap().title, "t0");
    assert_eq!(m.current_index, Some(0));
}

#[test]
fn random_previous_steps_back_without_wrapping() {
    let mut m = manager(3, PlayMode::Random);
    assert!(m.set_current_index(1).is_ok());
    assert_eq!(m.previous_track().unwrap().title, "t0");
    // At the start there is nothing to go back to; the index stays.
    assert!(m.previous_track().is_none());
    assert_eq!(m.current_index, Some(0));
}
