//! # Export Codec
//!
//! The category system never looks inside an item's file; it asks an [`ExportCodec`]
//! to write or read the single file that holds one level (`level.gmd`) or one list
//! (`list.gmdl`). [`GmdCodec`] is the implementation used in production. Tests can
//! swap in their own codec to simulate broken files.

use crate::error::{Result, SaveError};
use crate::model::{Level, List};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

pub trait ExportCodec {
    fn export_level(&self, level: &Level, path: &Path) -> Result<()>;

    fn export_list(&self, list: &List, path: &Path) -> Result<()>;

    fn import_level(&self, path: &Path) -> Result<Level>;

    fn import_list(&self, path: &Path) -> Result<List>;
}

/// JSON-encoded item files, written atomically (tmp file, then rename).
#[derive(Debug, Clone, Copy, Default)]
pub struct GmdCodec;

/// Write `content` next to `path` under a unique tmp name, then rename it into place.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = dir.join(format!(".export-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

impl GmdCodec {
    fn write<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| SaveError::Codec(format!("Unable to encode '{}': {}", path.display(), e)))?;
        write_atomic(path, content.as_bytes())
            .map_err(|e| SaveError::Codec(format!("Unable to write '{}': {}", path.display(), e)))
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .map_err(|e| SaveError::Codec(format!("Unable to read '{}': {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| SaveError::Codec(format!("Unable to parse '{}': {}", path.display(), e)))
    }
}

impl ExportCodec for GmdCodec {
    fn export_level(&self, level: &Level, path: &Path) -> Result<()> {
        self.write(level, path)
    }

    fn export_list(&self, list: &List, path: &Path) -> Result<()> {
        self.write(list, path)
    }

    fn import_level(&self, path: &Path) -> Result<Level> {
        self.read(path)
    }

    fn import_list(&self, path: &Path) -> Result<List> {
        self.read(path)
    }
}
