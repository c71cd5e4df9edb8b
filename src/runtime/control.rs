use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::warn;

use crate::mpris::ControlCmd;
use crate::player::PlayMode;

/// Spawn the stdin reader: one intent per line. Unknown input is dropped
/// with a warning; the thread exits on EOF, `quit`, or a closed channel.
pub fn spawn_console(tx: Sender<ControlCmd>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(cmd) => {
                    let quit = matches!(cmd, ControlCmd::Quit);
                    if tx.send(cmd).is_err() || quit {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        warn!("console: unrecognized command: {}", line.trim());
                    }
                }
            }
        }
    })
}

pub(super) fn parse_line(line: &str) -> Option<ControlCmd> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?;
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    match (cmd, arg) {
        ("play", None) => Some(ControlCmd::Play),
        ("pause", None) => Some(ControlCmd::Pause),
        ("resume", None) => Some(ControlCmd::Resume),
        ("toggle", None) | ("p", None) => Some(ControlCmd::PlayPause),
        ("stop", None) => Some(ControlCmd::Stop),
        ("next", None) | ("n", None) => Some(ControlCmd::Next),
        ("prev", None) | ("previous", None) => Some(ControlCmd::Prev),
        ("quit", None) | ("q", None) => Some(ControlCmd::Quit),
        ("vol", Some(v)) | ("volume", Some(v)) => v.parse::<f32>().ok().map(ControlCmd::SetVolume),
        ("seek", Some(ms)) => ms.parse::<u64>().ok().map(ControlCmd::Seek),
        ("mode", Some(m)) => parse_mode(m).map(ControlCmd::SetMode),
        _ => None,
    }
}

fn parse_mode(word: &str) -> Option<PlayMode> {
    match word {
        "repeat" => Some(PlayMode::Repeat),
        "random" | "shuffle" => Some(PlayMode::Random),
        "single" => Some(PlayMode::Single),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_transport_commands() {
        assert!(matches!(parse_line("play"), Some(ControlCmd::Play)));
        assert!(matches!(parse_line("  pause "), Some(ControlCmd::Pause)));
        assert!(matches!(parse_line("toggle"), Some(ControlCmd::PlayPause)));
        assert!(matches!(parse_line("p"), Some(ControlCmd::PlayPause)));
        assert!(matches!(parse_line("next"), Some(ControlCmd::Next)));
        assert!(matches!(parse_line("prev"), Some(ControlCmd::Prev)));
        assert!(matches!(parse_line("stop"), Some(ControlCmd::Stop)));
        assert!(matches!(parse_line("quit"), Some(ControlCmd::Quit)));
    }

    #[test]
    fn parses_arguments() {
        assert!(matches!(
            parse_line("vol 0.5"),
            Some(ControlCmd::SetVolume(v)) if v == 0.5
        ));
        assert!(matches!(
            parse_line("seek 90000"),
            Some(ControlCmd::Seek(90_000))
        ));
        assert!(matches!(
            parse_line("mode shuffle"),
            Some(ControlCmd::SetMode(PlayMode::Random))
        ));
        assert!(matches!(
            parse_line("mode single"),
            Some(ControlCmd::SetMode(PlayMode::Single))
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_line("").is_none());
        assert!(parse_line("blast").is_none());
        assert!(parse_line("vol").is_none());
        assert!(parse_line("vol much").is_none());
        assert!(parse_line("seek -5").is_none());
        assert!(parse_line("play now please").is_none());
        assert!(parse_line("mode sideways").is_none());
    }
}
