use std::{env, path::PathBuf};

use crate::error::StartupError;

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `CADENZA__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = resolve_config_path() {
            builder = builder.add_source(
                ::config::File::from(path.as_path())
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CADENZA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.debounce_ms == 0 {
            return Err("controls.debounce_ms must be >= 1".to_string());
        }
        if self.controls.volume_step == 0 {
            return Err("controls.volume_step must be >= 1".to_string());
        }
        if self.controls.seek_seconds == 0 {
            return Err("controls.seek_seconds must be >= 1".to_string());
        }
        if self.ui.tick_ms == 0 {
            return Err("ui.tick_ms must be >= 1".to_string());
        }
        Ok(())
    }

    /// Directories to scan: the configured list, or `~/Music` when empty.
    ///
    /// Falling back to the default requires a home directory and an existing
    /// `Music` folder; both are fatal when missing.
    pub fn music_directories(&self) -> Result<Vec<PathBuf>, StartupError> {
        if !self.library.directories.is_empty() {
            return Ok(self.library.directories.clone());
        }

        let home = home_dir().ok_or(StartupError::NoHomeDir)?;
        let music = home.join("Music");
        if !music.is_dir() {
            return Err(StartupError::MissingMusicDir(music));
        }
        Ok(vec![music])
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Resolve the config path: `CADENZA_CONFIG_PATH` if set, otherwise the
/// first existing candidate among the XDG location and `~/.cadenza.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CADENZA_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }

    let xdg = default_config_path();
    if let Some(p) = xdg.as_ref().filter(|p| p.is_file()) {
        return Some(p.clone());
    }
    if let Some(p) = home_config_path().filter(|p| p.is_file()) {
        return Some(p);
    }
    xdg
}

/// Compute the default config path under `$XDG_CONFIG_HOME/cadenza/config.toml`
/// or `~/.config/cadenza/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        home_dir().map(|h| h.join(".config"))
    };

    config_home.map(|d| d.join("cadenza").join("config.toml"))
}

/// Legacy single-file location in the home directory.
pub fn home_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".cadenza.toml"))
}
