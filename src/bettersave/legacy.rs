//! # Legacy Blob
//!
//! Before the per-item layout, every level and list lived in one monolithic save file.
//! [`LegacyStore`] reads that blob into uncategorized items, backs it up before
//! migration destroys it, and wipes it afterwards.
//!
//! Wiping truncates the file instead of deleting it: the host still expects the file
//! to exist, and an empty blob reads as "nothing to migrate" on the next start. Leaving
//! the old content in place would let a crash between categorization and cleanup
//! re-migrate everything as duplicates.

use crate::codec::write_atomic;
use crate::error::{Result, SaveError};
use crate::model::{Item, Level, List};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const BACKUP_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H-%M-%S";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyBlob {
    #[serde(default)]
    pub levels: Vec<Level>,
    #[serde(default)]
    pub lists: Vec<List>,
}

impl LegacyBlob {
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.lists.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LegacyStore {
    blobs: Vec<PathBuf>,
    backup_dir: PathBuf,
}

impl LegacyStore {
    /// `blobs[0]` is the primary blob: the one that gets re-exported.
    pub fn new(blobs: Vec<PathBuf>, backup_dir: PathBuf) -> Self {
        Self { blobs, backup_dir }
    }

    pub fn primary(&self) -> Option<&Path> {
        self.blobs.first().map(PathBuf::as_path)
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    fn read_blob(path: &Path) -> Result<LegacyBlob> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LegacyBlob::default()),
            Err(e) => return Err(SaveError::fs("read legacy blob", path, e)),
        };
        if content.trim().is_empty() {
            return Ok(LegacyBlob::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Every editor level and custom list found across all blobs, levels first.
    pub fn read_items(&self) -> Result<Vec<Item>> {
        let mut levels = Vec::new();
        let mut lists = Vec::new();
        for path in &self.blobs {
            let blob = Self::read_blob(path)?;
            if blob.is_empty() {
                continue;
            }
            tracing::debug!(
                path = %path.display(),
                levels = blob.levels.len(),
                lists = blob.lists.len(),
                "Read legacy blob"
            );
            for level in blob.levels {
                match Item::from_level(level) {
                    Ok(item) => levels.push(item),
                    Err(e) => tracing::warn!("Skipping legacy entry: {}", e),
                }
            }
            for list in blob.lists {
                match Item::from_list(list) {
                    Ok(item) => lists.push(item),
                    Err(e) => tracing::warn!("Skipping legacy entry: {}", e),
                }
            }
        }
        levels.extend(lists);
        Ok(levels)
    }

    /// Pick a backup file name that does not exist yet and create it.
    ///
    /// `<stem>.dat` first, then `<stem>-1.dat`, `<stem>-2.dat` and so on, so backups
    /// taken within the same second never replace each other.
    fn create_backup_file(&self, stem: &str) -> io::Result<(PathBuf, fs::File)> {
        let mut counter = 0usize;
        loop {
            let name = if counter == 0 {
                format!("{}.dat", stem)
            } else {
                format!("{}-{}.dat", stem, counter)
            };
            let target = self.backup_dir.join(name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&target)
            {
                Ok(file) => return Ok((target, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => counter += 1,
                Err(e) => return Err(e),
            }
        }
    }

    fn copy_blob(&self, blob: &Path, stem: &str) -> Result<PathBuf> {
        let mut source =
            fs::File::open(blob).map_err(|e| SaveError::fs("open legacy blob", blob, e))?;
        let (target, mut file) = self
            .create_backup_file(stem)
            .map_err(|e| SaveError::fs("create backup file", &self.backup_dir, e))?;
        if let Err(e) = io::copy(&mut source, &mut file).and_then(|_| file.sync_all()) {
            let _ = fs::remove_file(&target);
            return Err(SaveError::fs("back up legacy blob", &target, e));
        }
        Ok(target)
    }

    /// Copy every non-empty blob into the backup directory under a timestamped name.
    ///
    /// The primary blob is saved as `<stamp>.dat`, the others as
    /// `<stamp> <file stem>.dat`. Missing and empty blobs are skipped, so the result
    /// is empty when there is nothing worth backing up. Any failure aborts the whole
    /// backup.
    pub fn backup(&self) -> Result<Vec<PathBuf>> {
        let mut pending = Vec::new();
        for (index, path) in self.blobs.iter().enumerate() {
            let size = match fs::metadata(path) {
                Ok(meta) => meta.len(),
                Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
                Err(e) => return Err(SaveError::fs("inspect legacy blob", path, e)),
            };
            if size > 0 {
                pending.push((index, path));
            }
        }
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| SaveError::fs("create backup directory", &self.backup_dir, e))?;
        let stamp = chrono::Local::now()
            .format(BACKUP_TIMESTAMP_FORMAT)
            .to_string();
        let mut backups = Vec::with_capacity(pending.len());
        for (index, path) in pending {
            let stem = match path.file_stem().map(|s| s.to_string_lossy()) {
                Some(name) if index > 0 => format!("{} {}", stamp, name),
                _ => stamp.clone(),
            };
            let target = self.copy_blob(path, &stem)?;
            tracing::info!(blob = %path.display(), backup = %target.display(), "Backed up legacy blob");
            backups.push(target);
        }
        Ok(backups)
    }

    /// Truncate every existing blob to zero bytes. Missing blobs are left missing.
    pub fn wipe(&self) -> Result<()> {
        for path in &self.blobs {
            if !path.exists() {
                continue;
            }
            fs::File::create(path).map_err(|e| SaveError::fs("wipe legacy blob", path, e))?;
            tracing::debug!(path = %path.display(), "Wiped legacy blob");
        }
        Ok(())
    }

    /// Write `blob` into the primary blob, replacing whatever is there.
    pub fn write(&self, blob: &LegacyBlob) -> Result<()> {
        let Some(primary) = self.primary() else {
            return Err(SaveError::Api("No legacy blob configured".to_string()));
        };
        let content = serde_json::to_string_pretty(blob)?;
        write_atomic(primary, content.as_bytes())
            .map_err(|e| SaveError::fs("write legacy blob", primary, e))
    }
}
