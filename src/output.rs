//! Config directory handling and artifact persistence.
//!
//! Layout of a generated config directory:
//!
//! ```text
//! configs/
//! |-- genesis-link-addresses.json   # {channel_id: {node: [link profiles]}}
//! |-- fulfilled-nm-request.json     # {"links": [claimed requests]}
//! \-- user-responses.json           # {} (no prompts for this channel)
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const GENESIS_LINK_ADDRESSES_FILE: &str = "genesis-link-addresses.json";
pub const FULFILLED_NM_REQUEST_FILE: &str = "fulfilled-nm-request.json";
pub const USER_RESPONSES_FILE: &str = "user-responses.json";

/// Errors raised while preparing or writing the config directory
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Config directory '{}' is not empty, use --overwrite to replace it", .path.display())]
    NotEmpty { path: PathBuf },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{}': {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Make sure `dir` exists and is empty.
///
/// An existing non-empty directory is an error unless `overwrite` is set,
/// in which case its contents are removed.
pub fn prepare_config_dir(dir: &Path, overwrite: bool) -> Result<(), OutputError> {
    if dir.exists() {
        let has_entries = fs::read_dir(dir)
            .map_err(io_error(dir))?
            .next()
            .is_some();

        if has_entries {
            if !overwrite {
                return Err(OutputError::NotEmpty {
                    path: dir.to_path_buf(),
                });
            }
            log::info!("Removing existing configs in {:?}", dir);
            fs::remove_dir_all(dir).map_err(io_error(dir))?;
        }
    }

    fs::create_dir_all(dir).map_err(io_error(dir))?;
    Ok(())
}

/// Write `value` as pretty-printed JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), OutputError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| OutputError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(io_error(path))?;
    log::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_missing_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("configs");

        prepare_config_dir(&dir, false).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_prepare_accepts_empty_dir() {
        let temp = TempDir::new().unwrap();
        prepare_config_dir(temp.path(), false).unwrap();
    }

    #[test]
    fn test_prepare_refuses_non_empty_without_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.json"), "{}").unwrap();

        let err = prepare_config_dir(temp.path(), false).unwrap_err();
        assert!(matches!(err, OutputError::NotEmpty { .. }));
        assert!(temp.path().join("old.json").exists());
    }

    #[test]
    fn test_prepare_overwrite_clears_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("configs");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("old.json"), "{}").unwrap();

        prepare_config_dir(&dir, true).unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("old.json").exists());
    }

    #[test]
    fn test_write_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("value.json");

        write_json(&serde_json::json!({"links": []}), &path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({"links": []}));
    }
}
