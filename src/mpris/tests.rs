use super::{metadata_map, status_str};
use crate::player::PlaybackState;

#[test]
fn playback_status_maps_to_mpris_strings() {
    assert_eq!(status_str(PlaybackState::Stopped), "Stopped");
    assert_eq!(status_str(PlaybackState::Playing), "Playing");
    assert_eq!(status_str(PlaybackState::Paused), "Paused");
}

#[test]
fn metadata_always_carries_a_title() {
    let map = metadata_map(None, &[]);
    assert!(map.contains_key("xesam:title"));

    let map = metadata_map(Some("Song"), &[]);
    assert!(map.contains_key("xesam:title"));
}

#[test]
fn metadata_carries_artists_when_present() {
    let artists = vec!["A".to_string(), "B".to_string()];
    let map = metadata_map(Some("Song"), &artists);
    assert!(map.contains_key("xesam:artist"));
}
