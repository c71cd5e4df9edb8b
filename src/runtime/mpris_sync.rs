use crate::mpris::MprisHandle;
use crate::player::ReplicaHandle;

pub fn update_mpris(mpris: &MprisHandle, replica: &ReplicaHandle) {
    let replica = replica.lock().unwrap_or_else(|e| e.into_inner());
    let snap = replica.state();

    mpris.set_playback(snap.playback_state);

    let (title, artists) = match &snap.current_track {
        Some(t) => (Some(t.title.clone()), t.artists.clone()),
        None => (None, Vec::new()),
    };
    mpris.set_now_playing(title, artists);
}
