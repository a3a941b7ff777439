//! Loading dispatch configuration from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use brand_dispatch::DispatchConfig;
use thiserror::Error;

/// Error loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a [`DispatchConfig`] from a JSON file. Missing fields take their defaults.
pub fn read_config(path: &Path) -> Result<DispatchConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brand_dispatch::ResolutionPolicy;

    #[test]
    fn test_missing_file() {
        let err = read_config(Path::new("/nonexistent/brand-numeric.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("failed to read config file"));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispatch.json");
        fs::write(&path, r#"{"policy": "most-specific"}"#).unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.policy, ResolutionPolicy::MostSpecific);
        assert!(config.cache);
    }
}
