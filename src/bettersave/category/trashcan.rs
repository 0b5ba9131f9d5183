//! # Trashcan
//!
//! Soft-deleted items. Trashed items are not part of the live collection; the
//! trashcan keeps its own list, most recently trashed first.
//!
//! Each trashed item directory carries a `.trashtime` sidecar: the trash time as
//! minutes since the Unix epoch, encoded as a little-endian `i64`. The sidecar is
//! written after the directory has been moved, so a failed write leaves an item
//! without one; such items read as trashed "now".

use super::{Category, Hooks};
use crate::events::{EventItem, TrashEvent, TrashMode};
use crate::model::ItemKey;
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const TRASHTIME_FILE: &str = ".trashtime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrashedItem {
    pub key: ItemKey,
    pub trashed_at: DateTime<Utc>,
}

fn now_to_minute() -> DateTime<Utc> {
    minutes_to_time(Utc::now().timestamp() / 60)
}

fn minutes_to_time(minutes: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(minutes.saturating_mul(60), 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn read_trash_time(dir: &Path) -> io::Result<DateTime<Utc>> {
    let bytes = fs::read(dir.join(TRASHTIME_FILE))?;
    let raw: [u8; 8] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "trash time must be 8 bytes"))?;
    Ok(minutes_to_time(i64::from_le_bytes(raw)))
}

pub fn write_trash_time(dir: &Path, time: DateTime<Utc>) -> io::Result<()> {
    let minutes = time.timestamp() / 60;
    fs::write(dir.join(TRASHTIME_FILE), minutes.to_le_bytes())
}

#[derive(Debug, Clone)]
pub struct Trashcan {
    dir: PathBuf,
    trashed: Vec<TrashedItem>,
}

impl Trashcan {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            trashed: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items(&self) -> &[TrashedItem] {
        &self.trashed
    }

    pub fn trashed_at(&self, key: ItemKey) -> Option<DateTime<Utc>> {
        self.trashed
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.trashed_at)
    }

    /// Forget every trashed item, returning what was there.
    pub fn take_all(&mut self) -> Vec<TrashedItem> {
        std::mem::take(&mut self.trashed)
    }
}

impl Category for Trashcan {
    fn levels_dir(&self) -> &Path {
        &self.dir
    }

    fn lists_dir(&self) -> &Path {
        &self.dir
    }

    fn on_load(&mut self, _hooks: &mut Hooks<'_>, key: ItemKey, dir: &Path) {
        let trashed_at = read_trash_time(dir).unwrap_or_else(|e| {
            tracing::debug!(dir = %dir.display(), "No usable trash time, using now: {}", e);
            now_to_minute()
        });
        self.trashed.push(TrashedItem { key, trashed_at });
    }

    fn on_load_finished(&mut self, _hooks: &mut Hooks<'_>) {
        self.trashed
            .sort_by(|a, b| b.trashed_at.cmp(&a.trashed_at));
    }

    fn on_add(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, dir: &Path, is_new: bool) {
        let trashed_at = now_to_minute();
        if let Err(e) = write_trash_time(dir, trashed_at) {
            tracing::warn!(dir = %dir.display(), "Unable to write trash time: {}", e);
        }
        self.trashed.retain(|t| t.key != key);
        self.trashed.insert(0, TrashedItem { key, trashed_at });
        hooks.library.remove(key);

        if !is_new {
            if let Some(item) = hooks.items.get(key) {
                hooks.events.post(TrashEvent::for_item(
                    EventItem::new(key, item),
                    TrashMode::Trash,
                ));
            }
        }
    }

    fn on_remove(&mut self, _hooks: &mut Hooks<'_>, key: ItemKey, new_dir: Option<&Path>) {
        self.trashed.retain(|t| t.key != key);
        let Some(dir) = new_dir else {
            return;
        };
        match fs::remove_file(dir.join(TRASHTIME_FILE)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(dir = %dir.display(), "Unable to remove trash time: {}", e),
        }
    }
}
