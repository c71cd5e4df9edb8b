use log::info;

use crate::config::Settings;
use crate::gateway::PlayerGateway;
use crate::library::Track;

/// Push configured playback defaults through the gateway, optionally
/// starting the scanned library.
///
/// The play mode is applied last so the configured policy wins over the
/// fixed Single mode carried by `play_to_playlist`.
pub fn apply_playback_defaults(gateway: &PlayerGateway, settings: &Settings, tracks: Vec<Track>) {
    let _ = gateway.set_volume(settings.playback.volume);

    if settings.playback.autoplay && !tracks.is_empty() {
        info!("starting library playback ({} tracks)", tracks.len());
        let _ = gateway.play_to_playlist(tracks);
    }

    let _ = gateway.set_play_mode(settings.playback.play_mode.into());
}
