//! Utilities for creating `rodio` sinks from track files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: rodio::decoder::DecoderError,
    },
}

/// Create a paused `Sink` for the file at `path` that starts playback at
/// `start_at`. Seeking is implemented by rebuilding the sink through here.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let file = File::open(path).map_err(|source| SinkError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| SinkError::Decode {
            path: path.display().to_string(),
            source,
        })?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
