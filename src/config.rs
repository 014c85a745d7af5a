// YAML configuration for the CLI

use crate::storage::{FileStorage, SqliteStorage, Storage};
use crate::store::DEFAULT_SLOT;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which storage backend holds the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub data_dir: Option<PathBuf>,
    pub slot: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: None,
            slot: DEFAULT_SLOT.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    ///
    /// A missing file yields defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(file = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;

        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }

    /// Directory that holds the storage files
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => expand_home(dir),
            None => dirs::data_dir()
                .map(|d| d.join("shoplist"))
                .unwrap_or_else(|| PathBuf::from(".shoplist")),
        }
    }

    /// Open the configured backend
    pub fn open_storage(&self) -> Result<Box<dyn Storage>> {
        let dir = self.data_dir();
        let storage: Box<dyn Storage> = match self.backend {
            Backend::File => Box::new(FileStorage::open(&dir)?),
            Backend::Sqlite => Box::new(SqliteStorage::open(&dir)?),
        };
        Ok(storage)
    }
}

/// `<config_dir>/shoplist/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shoplist").join("config.yml"))
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(temp.path().join("config.yml").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.slot, "shoppingList");
    }

    #[test]
    fn test_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "backend: sqlite\ndata_dir: /tmp/lists\nslot: weekly\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/lists"));
        assert_eq!(config.slot, "weekly");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "backend: sqlite\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.slot, DEFAULT_SLOT);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "backend: floppy\n").unwrap();

        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_open_each_backend() {
        let temp = TempDir::new().unwrap();
        for backend in [Backend::File, Backend::Sqlite] {
            let config = Config {
                backend,
                data_dir: Some(temp.path().to_path_buf()),
                ..Default::default()
            };

            let mut storage = config.open_storage().unwrap();
            storage.set(&config.slot, "[]").unwrap();
            assert_eq!(storage.get(&config.slot).unwrap().as_deref(), Some("[]"));
        }
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/lists")), home.join("lists"));
        }
        assert_eq!(expand_home(Path::new("/abs")), PathBuf::from("/abs"));
    }
}
