//! # Configuration
//!
//! Stored as `bettersave.json` in the host's save directory. A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `root_dir` | `bettersave` | Name of the save root under the save directory |
//! | `separate_lists` | `true` | Store lists in `lists/` instead of next to levels in `created/` |
//! | `legacy_blobs` | `["CCLocalLevels.dat", "CCLocalLevels2.dat"]` | Monolithic save files; each non-empty one is backed up before migration, the first one is the re-export target |
//! | `legacy_store_dir` | `levels` | Old per-item store scanned by recovery |
//!
//! ## Storage Layout
//!
//! ```text
//! <save_dir>/
//! ├── bettersave.json        # This config
//! ├── CCLocalLevels.dat      # Legacy blob (wiped after migration)
//! ├── levels/                # Old per-item store (recovery source)
//! └── bettersave/            # Save root R
//!     ├── created/<id>/level.gmd
//!     ├── lists/<id>/list.gmdl
//!     ├── trashcan/<id>/{level.gmd|list.gmdl, .trashtime}
//!     ├── .ccbackup/<timestamp>.dat
//!     └── .version
//! ```

use crate::error::{Result, SaveError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "bettersave.json";
const DEFAULT_ROOT_DIR: &str = "bettersave";
const DEFAULT_LEGACY_STORE_DIR: &str = "levels";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveConfig {
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    #[serde(default = "default_separate_lists")]
    pub separate_lists: bool,

    #[serde(default = "default_legacy_blobs")]
    pub legacy_blobs: Vec<String>,

    #[serde(default = "default_legacy_store_dir")]
    pub legacy_store_dir: String,
}

fn default_root_dir() -> String {
    DEFAULT_ROOT_DIR.to_string()
}

fn default_separate_lists() -> bool {
    true
}

fn default_legacy_blobs() -> Vec<String> {
    vec![
        "CCLocalLevels.dat".to_string(),
        "CCLocalLevels2.dat".to_string(),
    ]
}

fn default_legacy_store_dir() -> String {
    DEFAULT_LEGACY_STORE_DIR.to_string()
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            separate_lists: default_separate_lists(),
            legacy_blobs: default_legacy_blobs(),
            legacy_store_dir: default_legacy_store_dir(),
        }
    }
}

impl SaveConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(save_dir: P) -> Result<Self> {
        let config_path = save_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SaveError::Io)?;
        let config: SaveConfig =
            serde_json::from_str(&content).map_err(SaveError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, save_dir: P) -> Result<()> {
        let save_dir = save_dir.as_ref();
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).map_err(SaveError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(SaveError::Serialization)?;
        fs::write(save_dir.join(CONFIG_FILENAME), content).map_err(SaveError::Io)?;
        Ok(())
    }
}

/// Every location the save system touches, resolved once from the save dir and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePaths {
    pub save_dir: PathBuf,
    pub root: PathBuf,
    pub legacy_blobs: Vec<PathBuf>,
    pub legacy_store: PathBuf,
    pub separate_lists: bool,
}

impl SavePaths {
    pub fn new(save_dir: impl Into<PathBuf>, config: &SaveConfig) -> Self {
        let save_dir = save_dir.into();
        Self {
            root: save_dir.join(&config.root_dir),
            legacy_blobs: config
                .legacy_blobs
                .iter()
                .map(|name| save_dir.join(name))
                .collect(),
            legacy_store: save_dir.join(&config.legacy_store_dir),
            separate_lists: config.separate_lists,
            save_dir,
        }
    }

    pub fn created_dir(&self) -> PathBuf {
        self.root.join("created")
    }

    pub fn lists_dir(&self) -> PathBuf {
        if self.separate_lists {
            self.root.join("lists")
        } else {
            self.created_dir()
        }
    }

    pub fn trash_dir(&self) -> PathBuf {
        self.root.join("trashcan")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(".ccbackup")
    }

    pub fn version_file(&self) -> PathBuf {
        self.root.join(".version")
    }
}
