//! # List Recovery
//!
//! Versions before 1.1.0 kept their own per-item store and never categorized lists.
//! Recovery scans that store once and brings back whatever the live collection is
//! missing:
//!
//! ```text
//! <save_dir>/levels/
//! ├── created/<id>/level.gmd     → live collection (uncategorized)
//! ├── created/metadata.json      { "level-order": [...] }
//! ├── lists/<id>/list.gmdl       → live collection (uncategorized)
//! ├── lists/metadata.json        { "list-order": [...] }
//! ├── trashcan/<id>/...          → trashcan
//! └── .recovered-by-bettersave   written when done
//! ```
//!
//! Entries whose content already exists in the live collection are skipped. Anything
//! else that slips through is caught by the duplicate filter of the migration pass
//! that runs right after.

use super::SaveSystem;
use crate::category::created::read_order;
use crate::category::CategoryKind;
use crate::codec::ExportCodec;
use crate::error::Result;
use crate::model::{Item, ItemKey, ItemKind};
use crate::version::{self, SaveVersion, LISTS_CATEGORIZED_SINCE};
use std::fs;
use std::path::Path;

pub const RECOVERY_MARKER: &str = ".recovered-by-bettersave";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryCounts {
    pub recovered: usize,
    pub duplicate: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryStats {
    pub levels: RecoveryCounts,
    pub lists: RecoveryCounts,
    pub trashed: RecoveryCounts,
}

impl RecoveryStats {
    fn counts_mut(&mut self, kind: ItemKind) -> &mut RecoveryCounts {
        match kind {
            ItemKind::Level => &mut self.levels,
            ItemKind::List => &mut self.lists,
        }
    }

    pub fn recovered(&self) -> usize {
        self.levels.recovered + self.lists.recovered + self.trashed.recovered
    }
}

fn old_store_dir(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Level => "created",
        ItemKind::List => "lists",
    }
}

fn dir_id(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl<C: ExportCodec> SaveSystem<C> {
    /// Recovery runs once, and only for trees written before lists were categorized.
    pub fn needs_recovery(&self) -> bool {
        let store = &self.paths.legacy_store;
        if !store.is_dir() || store.join(RECOVERY_MARKER).exists() {
            return false;
        }
        match version::read_existing(&self.paths.version_file()) {
            Some(written) => written < LISTS_CATEGORIZED_SINCE,
            None => true,
        }
    }

    fn has_live_copy(&self, item: &Item, category: Option<CategoryKind>) -> bool {
        let candidates: Vec<ItemKey> = match category {
            Some(category) => self.items_in(category),
            None => self.library.iter().collect(),
        };
        candidates
            .into_iter()
            .filter_map(|key| self.items.get(key))
            .any(|live| live.has_same_content(item))
    }

    pub fn recover_lists(&mut self) -> Result<RecoveryStats> {
        let store = self.paths.legacy_store.clone();
        tracing::info!(store = %store.display(), "Recovering from old item store");
        let mut stats = RecoveryStats::default();

        for kind in [ItemKind::Level, ItemKind::List] {
            let root = store.join(old_store_dir(kind));
            let mut recovered = Vec::new();
            for dir in Self::child_dirs(&root)? {
                let mut item = match Item::import_from(&dir, &self.codec) {
                    Ok(item) => item,
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), "Unable to recover item: {}", e);
                        stats.counts_mut(kind).failed += 1;
                        continue;
                    }
                };
                let counts = stats.counts_mut(item.kind());
                if self.has_live_copy(&item, None) {
                    counts.duplicate += 1;
                    continue;
                }
                item.set_id(dir_id(&dir));
                counts.recovered += 1;
                recovered.push((item.kind(), self.items.insert(item)));
            }

            let order = read_order(&root, kind).unwrap_or_default();
            let position = |key: &ItemKey| {
                self.items
                    .get(*key)
                    .and_then(|item| order.iter().position(|id| id == item.id()))
            };
            recovered.sort_by_key(|(_, key)| position(key));
            for (kind, key) in recovered.into_iter().rev() {
                self.library.insert_front(kind, key);
            }
        }

        for dir in Self::child_dirs(&store.join("trashcan"))? {
            let item = match Item::import_from(&dir, &self.codec) {
                Ok(item) => item,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), "Unable to recover trashed item: {}", e);
                    stats.trashed.failed += 1;
                    continue;
                }
            };
            if self.has_live_copy(&item, Some(CategoryKind::Trashcan)) {
                stats.trashed.duplicate += 1;
                continue;
            }
            let key = self.items.insert(item);
            self.add(CategoryKind::Trashcan, key)?;
            stats.trashed.recovered += 1;
        }

        let marker = store.join(RECOVERY_MARKER);
        if let Err(e) = fs::write(&marker, SaveVersion::current().to_string()) {
            tracing::warn!(marker = %marker.display(), "Unable to mark old store as recovered: {}", e);
        }
        tracing::info!(
            levels = stats.levels.recovered,
            lists = stats.lists.recovered,
            trashed = stats.trashed.recovered,
            "Recovery finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GmdCodec;
    use crate::model::{Level, List};
    use crate::test_utils::TestEnv;

    fn old_entry(store: &Path, sub: &str, id: &str, item: &Item) {
        let dir = store.join(sub).join(id);
        fs::create_dir_all(&dir).unwrap();
        item.export_to(&dir, &GmdCodec).unwrap();
    }

    fn list(name: &str, levels: Vec<i64>) -> Item {
        Item::from_list(List::new(name, levels)).unwrap()
    }

    #[test]
    fn gate_requires_old_store_without_marker() {
        let env = TestEnv::new();
        assert!(!env.system.needs_recovery());

        fs::create_dir_all(&env.paths().legacy_store).unwrap();
        assert!(env.system.needs_recovery());

        fs::write(env.paths().legacy_store.join(RECOVERY_MARKER), "1.0.0").unwrap();
        assert!(!env.system.needs_recovery());
    }

    #[test]
    fn gate_respects_version_marker() {
        let env = TestEnv::new();
        fs::create_dir_all(&env.paths().legacy_store).unwrap();
        fs::create_dir_all(&env.paths().root).unwrap();

        fs::write(env.paths().version_file(), "1.0.4").unwrap();
        assert!(env.system.needs_recovery());

        fs::write(env.paths().version_file(), "1.1.0").unwrap();
        assert!(!env.system.needs_recovery());
    }

    #[test]
    fn recovers_lists_in_old_order_and_skips_duplicates() {
        let mut env = TestEnv::new();
        let store = env.paths().legacy_store.clone();
        env.system.create(list("Existing", vec![9])).unwrap();

        old_entry(&store, "lists", "alpha", &list("Alpha", vec![1]));
        old_entry(&store, "lists", "beta", &list("Beta", vec![2]));
        old_entry(&store, "lists", "copy", &list("Copy", vec![9]));
        fs::write(
            store.join("lists").join("metadata.json"),
            r#"{ "list-order": ["beta", "alpha"] }"#,
        )
        .unwrap();

        let stats = env.system.recover_lists().unwrap();
        assert_eq!(stats.lists.recovered, 2);
        assert_eq!(stats.lists.duplicate, 1);
        assert!(store.join(RECOVERY_MARKER).exists());

        let ids: Vec<_> = env
            .system
            .library()
            .keys(ItemKind::List)
            .iter()
            .map(|key| env.system.item(*key).unwrap().id().to_string())
            .collect();
        assert_eq!(ids, vec!["beta", "alpha", "existing"]);
        assert_eq!(env.system.uncategorized().len(), 2);
    }

    #[test]
    fn recovers_levels_by_payload() {
        let mut env = TestEnv::new();
        let store = env.paths().legacy_store.clone();
        env.system
            .create(Item::from_level(Level::new("Mine", "payload", 3)).unwrap())
            .unwrap();
        old_entry(
            &store,
            "created",
            "renamed",
            &Item::from_level(Level::new("Renamed", "payload", 3)).unwrap(),
        );
        old_entry(
            &store,
            "created",
            "other",
            &Item::from_level(Level::new("Other", "different", 3)).unwrap(),
        );
        fs::create_dir_all(store.join("created").join("junk")).unwrap();

        let stats = env.system.recover_lists().unwrap();
        assert_eq!(
            stats.levels,
            RecoveryCounts {
                recovered: 1,
                duplicate: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn trashed_entries_go_straight_to_the_trashcan() {
        let mut env = TestEnv::new();
        let store = env.paths().legacy_store.clone();
        old_entry(&store, "trashcan", "bin", &list("Bin", vec![4]));

        let stats = env.system.recover_lists().unwrap();
        assert_eq!(stats.trashed.recovered, 1);
        let trashed = env.system.trashed_items();
        assert_eq!(trashed.len(), 1);
        assert!(env.system.is_trashed(trashed[0].key));
        assert!(env.paths().trash_dir().join("bin/list.gmdl").exists());
    }
}
