//! Configuration file lookup and reading.
//!
//! # File Formats
//!
//! Both JSON5 (`.json5`, comments and trailing commas allowed) and plain
//! JSON (`.json`) are read.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./orglangs.json5` or `./orglangs.json`
//! 2. User: `~/.config/orglangs/config.json5` or `~/.config/orglangs/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["orglangs.json5", "orglangs.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "orglangs";

/// User config file names, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Lists the configuration file locations to try, in priority order.
///
/// `local_dir` is the directory searched for `orglangs.json5` and
/// `orglangs.json`; `config_dir` is the platform configuration directory,
/// if one is known.
#[must_use]
pub fn config_file_candidates(local_dir: &Path, config_dir: Option<&Path>) -> Vec<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = config_dir.into_iter().flat_map(|dir| {
        USER_CONFIG_FILE_NAMES
            .iter()
            .map(move |name| dir.join(USER_CONFIG_DIR).join(name))
    });
    local.chain(user).collect()
}

/// Finds the configuration file path.
///
/// Returns the first existing file among [`config_file_candidates`] for the
/// current directory and the user's configuration directory.
///
/// # Examples
///
/// ```no_run
/// use orglangs_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let config_dir = dirs::config_dir();
    config_file_candidates(Path::new("."), config_dir.as_deref())
        .into_iter()
        .find(|path| path.exists())
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
///
/// # Examples
///
/// ```no_run
/// use orglangs_config::persistence::read_config_file;
/// use orglangs_config::Config;
///
/// # fn main() -> orglangs_config::Result<()> {
/// let config: Config = read_config_file("orglangs.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Sample {
        batch_size: usize,
        api_url: String,
    }

    fn sample() -> Sample {
        Sample {
            batch_size: 4,
            api_url: "https://api.github.com".to_string(),
        }
    }

    #[test]
    fn candidates_prefer_local_json5() {
        let candidates =
            config_file_candidates(Path::new("/work"), Some(Path::new("/home/me/.config")));
        assert_eq!(
            candidates,
            [
                PathBuf::from("/work/orglangs.json5"),
                PathBuf::from("/work/orglangs.json"),
                PathBuf::from("/home/me/.config/orglangs/config.json5"),
                PathBuf::from("/home/me/.config/orglangs/config.json"),
            ]
        );
    }

    #[test]
    fn candidates_without_config_dir() {
        let candidates = config_file_candidates(Path::new("/work"), None);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn read_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orglangs.json5");
        std::fs::write(
            &path,
            r#"
            {
                // comments are allowed
                batch_size: 4,
                api_url: "https://api.github.com",
            }
            "#,
        )
        .unwrap();

        let loaded: Sample = read_config_file(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<Sample> = read_config_file("/nonexistent/orglangs.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result: Result<Sample> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }
}
