//! Player-facing state: the snapshot wire model and the local replica.
//!
//! The replica is the only source of truth consumers read from. It is
//! eventually consistent with the engine, never independently authoritative:
//! every inbound snapshot replaces the whole state, and the handful of
//! optimistic local writes may be silently overridden by the next snapshot.

mod replica;
mod snapshot;

pub use replica::{PlayerReplica, ReplicaHandle, format_clock, new_replica_handle};
pub use snapshot::{PlayMode, PlaybackSnapshot, PlaybackState, Playlist};
