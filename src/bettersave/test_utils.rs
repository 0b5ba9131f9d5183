use crate::config::{SaveConfig, SavePaths};
use crate::legacy::LegacyBlob;
use crate::model::{Item, Level, List};
use crate::system::SaveSystem;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A save system rooted in a throwaway directory.
pub struct TestEnv {
    // Kept so the directory lives as long as the env
    pub _temp_dir: TempDir,
    pub system: SaveSystem,
    pub save_dir: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(SaveConfig::default())
    }

    pub fn with_config(config: SaveConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let save_dir = temp_dir.path().to_path_buf();
        config.save(&save_dir).expect("failed to write config");
        let system = SaveSystem::open(&save_dir).expect("failed to open save system");
        Self {
            _temp_dir: temp_dir,
            system,
            save_dir,
        }
    }

    pub fn paths(&self) -> &SavePaths {
        self.system.paths()
    }

    /// A second, independent system over the same directory (a fresh process start).
    pub fn reopen(&self) -> SaveSystem {
        SaveSystem::open(&self.save_dir).expect("failed to reopen save system")
    }

    pub fn legacy_blob_path(&self) -> PathBuf {
        self.paths().legacy_blobs[0].clone()
    }

    pub fn write_legacy_blob(&self, blob: &LegacyBlob) {
        let content = serde_json::to_string(blob).expect("failed to encode blob");
        fs::write(self.legacy_blob_path(), content).expect("failed to write blob");
    }
}

pub fn level(name: &str, objects: u32) -> Item {
    Item::from_level(Level::new(name, format!("payload of {}", name), objects))
        .expect("editor level")
}

pub fn list(name: &str, levels: Vec<i64>) -> Item {
    Item::from_list(List::new(name, levels)).expect("custom list")
}
