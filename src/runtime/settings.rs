use crate::config::Settings;

/// Settings to run with, plus a note when the configured ones were unusable
/// and defaults were substituted. A broken config never stops startup.
pub fn load_settings() -> (Settings, Option<String>) {
    let checked = Settings::load()
        .map_err(|e| format!("config could not be loaded: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("config rejected: {msg}")),
        });

    match checked {
        Ok(s) => (s, None),
        Err(note) => (Settings::default(), Some(note)),
    }
}
