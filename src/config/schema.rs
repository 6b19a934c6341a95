use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Search order: `$CADENZA_CONFIG_PATH`, `$XDG_CONFIG_HOME/cadenza/config.toml`
/// (or `~/.config/cadenza/config.toml`), then `~/.cadenza.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CADENZA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Root directories to scan. Empty means `~/Music`.
    pub directories: Vec<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            extensions: ["mp3", "wav", "oga", "ogg", "spx", "opus", "flac"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume units (out of 128) per coalesced volume key press.
    pub volume_step: u32,
    /// Seconds moved per coalesced seek key press.
    pub seek_seconds: u32,
    /// Quiescence window for volume/seek key bursts (milliseconds).
    pub debounce_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step: 1,
            seek_seconds: 1,
            debounce_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether repeat mode starts enabled.
    pub repeat: bool,
    /// Volume used for the first opened track, in [0, 128].
    pub initial_volume: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            repeat: false,
            initial_volume: 128,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Progress refresh cadence (milliseconds).
    pub tick_ms: u64,
    /// How long a transient status message stays visible (milliseconds).
    pub status_ttl_ms: u64,
    /// Title shown on the track list border.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            status_ttl_ms: 1500,
            header_text: " Tracks ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path; logging is disabled when unset.
    pub file: Option<PathBuf>,
    /// Fallback filter when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
