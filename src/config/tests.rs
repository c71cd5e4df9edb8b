use std::sync::{Mutex, OnceLock};

use super::load::{default_config_path, resolve_config_path};
use super::schema::*;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_dacapo_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", "/tmp/dacapo-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/dacapo-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("dacapo")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("dacapo")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_play_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 0.4
play_mode = "shuffle"
autoplay = true

[engine]
tick_ms = 50
progress_emit_ms = 100
quit_fade_out_ms = 0

[console]
now_playing_fields = ["artist", "title"]
now_playing_separator = " | "
show_progress = false

[library]
extensions = ["mp3"]
recursive = false
include_hidden = false
follow_links = false
display_fields = ["filename"]
display_separator = "::"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("DACAPO__ENGINE__TICK_MS");

    let s = Settings::load().unwrap();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.volume, 0.4);
    assert!(matches!(s.playback.play_mode, PlayModeSetting::Random));
    assert!(s.playback.autoplay);
    assert_eq!(s.engine.tick_ms, 50);
    assert_eq!(s.engine.progress_emit_ms, 100);
    assert_eq!(s.engine.quit_fade_out_ms, 0);
    assert_eq!(s.console.now_playing_fields.len(), 2);
    assert!(matches!(
        s.console.now_playing_fields[0],
        TrackDisplayField::Artist
    ));
    assert!(matches!(
        s.console.now_playing_fields[1],
        TrackDisplayField::Title
    ));
    assert_eq!(s.console.now_playing_separator, " | ");
    assert!(!s.console.show_progress);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.display_separator, "::");
    assert!(matches!(
        s.library.display_fields[0],
        TrackDisplayField::Filename
    ));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[engine]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("DACAPO__ENGINE__TICK_MS", "25");

    let s = Settings::load().unwrap();
    assert_eq!(s.engine.tick_ms, 25);
}

#[test]
fn validate_rejects_zero_cadences() {
    let mut s = Settings::default();
    s.engine.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.engine.progress_emit_ms = 0;
    assert!(s.validate().is_err());

    assert!(Settings::default().validate().is_ok());
}
