use std::path::Path;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_from_fields;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Scan `dir` for audio files and build `Track` values from their tags.
///
/// Unreadable or untagged files degrade to a file-stem title; they are never
/// an error for the scan as a whole.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let default_title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            let mut title = default_title;
            let mut artists: Vec<String> = Vec::new();
            let mut album: Option<String> = None;
            let mut duration_ms: Option<u64> = None;
            let mut cover_art: Vec<String> = Vec::new();
            let mut lyrics = String::new();

            if let Ok(tagged) = lofty::read_from_path(path) {
                duration_ms = Some(tagged.properties().duration().as_millis() as u64);

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.to_string();
                        }
                    }
                    artists = tag
                        .get_strings(&ItemKey::TrackArtist)
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                        let v = v.trim();
                        if !v.is_empty() {
                            album = Some(v.to_string());
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::Lyrics) {
                        lyrics = v.to_string();
                    }
                    cover_art = (0..tag.pictures().len())
                        .map(|i| format!("embedded:{i}"))
                        .collect();
                }
            }

            let display = display_from_fields(
                path,
                &title,
                &artists,
                album.as_deref(),
                &settings.display_fields,
                &settings.display_separator,
            );

            tracks.push(Track {
                id: None,
                title,
                artists,
                album,
                file_path: path.to_path_buf(),
                duration_ms,
                cover_art,
                lyrics,
                display,
            });
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}
