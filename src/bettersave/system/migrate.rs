//! # Migration
//!
//! Moves uncategorized items from the live collection (read from the legacy blob or
//! recovered from the old store) into the active library.
//!
//! Order of operations:
//!
//! 1. Back up every non-empty legacy blob. Failure is fatal and nothing has been touched yet.
//! 2. For each uncategorized item: discard it if it is a probable duplicate of an item
//!    already in the active library, otherwise categorize it.
//! 3. Wipe the legacy blobs so a later start cannot migrate the same content again.
//! 4. Persist order metadata right away.

use super::SaveSystem;
use crate::category::CategoryKind;
use crate::codec::ExportCodec;
use crate::error::{Result, SaveError};
use crate::model::{ItemKey, ItemKind};
use std::path::PathBuf;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// One copy per non-empty legacy blob, taken before anything was wiped.
    pub backups: Vec<PathBuf>,
    pub migrated: usize,
    pub duplicates: usize,
}

impl<C: ExportCodec> SaveSystem<C> {
    fn is_duplicate_of_created(&self, key: ItemKey) -> bool {
        let Some(item) = self.items.get(key) else {
            return false;
        };
        self.bindings
            .iter()
            .filter(|(_, owner)| **owner == CategoryKind::Created)
            .filter_map(|(other, _)| self.items.get(*other))
            .any(|other| other.is_probable_duplicate(item))
    }

    pub fn migrate(&mut self) -> Result<MigrationReport> {
        tracing::debug!("Migrating legacy items");
        let backups = match self.legacy.backup() {
            Ok(backups) => backups,
            Err(e) => {
                tracing::error!("Unable to back up legacy blob, refusing to migrate: {}", e);
                return Err(SaveError::Fatal(format!(
                    "Unable to back up legacy save data: {}",
                    e
                )));
            }
        };
        let mut report = MigrationReport {
            backups,
            ..Default::default()
        };

        for kind in [ItemKind::Level, ItemKind::List] {
            let snapshot: Vec<ItemKey> = self.library.keys(kind).to_vec();
            for key in snapshot {
                if self.bindings.contains_key(&key) {
                    continue;
                }
                if self.is_duplicate_of_created(key) {
                    if let Some(item) = self.items.get(key) {
                        tracing::debug!(name = item.name(), "Discarding probable duplicate");
                    }
                    self.library.remove(key);
                    self.items.remove(key);
                    report.duplicates += 1;
                    continue;
                }
                if self
                    .resolve(key, Some(CategoryKind::Created), None)?
                    .is_some()
                {
                    report.migrated += 1;
                }
            }
        }

        if let Err(e) = self.legacy.wipe() {
            tracing::warn!("Unable to wipe legacy blob: {}", e);
        }
        if report.migrated > 0 {
            self.created
                .save_metadata(&self.items, &self.library, |key| {
                    self.category_of(key) == Some(CategoryKind::Created)
                })?;
        }
        tracing::info!(
            migrated = report.migrated,
            duplicates = report.duplicates,
            "Migration finished"
        );
        Ok(report)
    }
}
