use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".gh-pr-comment.toml";

/// Load config file content from CWD first, then the config directory
///
/// Searches for the config in:
/// 1. Current working directory as `.gh-pr-comment.toml`
/// 2. The application config directory as `config.toml`
///
/// Returns the path and the file content if found, None otherwise.
/// A candidate that exists but cannot be read is an error.
pub fn load_config_file() -> Result<Option<(PathBuf, String)>> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(path) = crate::paths::app_config_path() {
        candidates.push(path);
    }

    load_first(&candidates)
}

/// Read the first candidate that exists
fn load_first(candidates: &[PathBuf]) -> Result<Option<(PathBuf, String)>> {
    for path in candidates {
        if let Some(found) = read(path)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<Option<(PathBuf, String)>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Ok(Some((path.to_path_buf(), content)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
        }
    }
}
