//! Command gateway between frontend intents and the playback engine.
//!
//! Commands are fire-and-forget: delivery into the engine's channel is the
//! only acknowledgment, and effect visibility arrives later on the snapshot
//! event stream. Every dispatch passes through the readiness gate so that a
//! command issued before the engine's command loop exists is held — not
//! dropped, not duplicated — until the engine signals ready.

mod dispatch;
mod readiness;

pub use dispatch::{DispatchError, PlayerGateway};
pub use readiness::ReadinessGate;

#[cfg(test)]
mod tests;
