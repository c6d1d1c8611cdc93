use crate::{DircmpError, HashAlgo};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "dircmp.toml";

/// User preferences loaded from the platform config directory.
/// Command-line flags always win over these.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Default hash algorithm when --algo is not given
    #[serde(default)]
    pub default_algo: Option<HashAlgo>,

    /// Force colors off even on a terminal
    #[serde(default)]
    pub color: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    pub exists: bool,
}

pub fn load_config() -> Result<LoadedConfig, DircmpError> {
    let path = resolve_config_path()?;
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LoadedConfig, DircmpError> {
    let exists = path.exists();

    let config = if exists {
        let data = fs::read_to_string(path)?;
        toml::from_str(&data).map_err(|e| DircmpError::Config(e.to_string()))?
    } else {
        AppConfig::default()
    };

    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        exists,
    })
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), DircmpError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = toml::to_string_pretty(config).map_err(|e| DircmpError::Serialization(e.to_string()))?;
    fs::write(path, data)?;
    Ok(())
}

fn resolve_config_path() -> Result<PathBuf, DircmpError> {
    let dirs = ProjectDirs::from("", "", "dircmp")
        .ok_or_else(|| DircmpError::Config("Unable to determine config directory".to_string()))?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        let loaded = load_config_from(&path).unwrap();
        assert!(!loaded.exists);
        assert!(loaded.config.default_algo.is_none());
        assert!(loaded.config.color.is_none());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        let config = AppConfig {
            default_algo: Some(HashAlgo::Blake3),
            color: Some(false),
        };
        save_config(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.exists);
        assert_eq!(loaded.config.default_algo, Some(HashAlgo::Blake3));
        assert_eq!(loaded.config.color, Some(false));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "default_algo = 42").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(DircmpError::Config(_))
        ));
    }
}
