//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-pr-comment/`
//! - macOS: `~/Library/Application Support/gh-pr-comment/`
//! - Windows: `%APPDATA%\gh-pr-comment\`

use std::path::PathBuf;

const APP_NAME: &str = "gh-pr-comment";

/// Get the application config directory, without creating it
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get path to app config file
pub fn app_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_path_layout() {
        if let Some(path) = app_config_path() {
            assert!(path.ends_with("gh-pr-comment/config.toml"));
        }
    }
}
