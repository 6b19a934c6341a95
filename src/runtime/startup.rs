use std::path::PathBuf;

use crate::config;
use crate::error::StartupError;

/// Directories to scan: command-line arguments win over the configuration.
pub fn resolve_roots(
    args: &[String],
    settings: &config::Settings,
) -> Result<Vec<PathBuf>, StartupError> {
    if !args.is_empty() {
        return Ok(args.iter().map(PathBuf::from).collect());
    }
    settings.music_directories()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_directories_replace_configured_ones() {
        let mut settings = config::Settings::default();
        settings.library.directories = vec!["/configured".into()];

        let roots = resolve_roots(&["/a".to_string(), "/b".to_string()], &settings).unwrap();
        assert_eq!(roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);

        let roots = resolve_roots(&[], &settings).unwrap();
        assert_eq!(roots, vec![PathBuf::from("/configured")]);
    }
}
