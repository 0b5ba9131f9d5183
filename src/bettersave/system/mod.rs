//! # Save System
//!
//! [`SaveSystem`] composes the whole engine: the item arena, the binding side-table,
//! both categories, the host's live collection, the event bus and the export codec.
//!
//! ## Bindings
//!
//! An item is *categorized* when the side-table maps its key to a [`CategoryKind`].
//! The binding is created once ([`SaveSystem::resolve`]), changed only by moves
//! ([`SaveSystem::add`]), and removed only together with the item itself
//! ([`SaveSystem::permanently_delete`], [`SaveSystem::clear_trash`]).
//!
//! ## Moves
//!
//! Moving an item between categories is a single directory rename. IDs are unique
//! across every directory under the save root, so the rename target never exists.
//! If the rename fails the item stays where it was, still owned by its old category.
//!
//! ## Fatal Errors
//!
//! Three situations return [`SaveError::Fatal`]: an item loaded from disk that cannot
//! be bound, a fresh item whose save directory cannot be created or written, and a
//! failed legacy backup before migration. Callers must stop on them.

mod arena;
pub mod migrate;
pub mod recovery;

pub use arena::ItemArena;
pub use migrate::MigrationReport;
pub use recovery::{RecoveryCounts, RecoveryStats, RECOVERY_MARKER};

use crate::category::{
    Category, CategoryInfo, CategoryKind, CreatedLevels, Hooks, TrashedItem, Trashcan,
};
use crate::codec::{ExportCodec, GmdCodec};
use crate::config::{SaveConfig, SavePaths};
use crate::error::{Result, SaveError};
use crate::events::{EventBus, EventItem, TrashEvent, TrashMode};
use crate::ident::{scope_roots, synthesize_id};
use crate::legacy::{LegacyBlob, LegacyStore};
use crate::library::LocalLevels;
use crate::model::{Item, ItemKey, ItemKind};
use crate::version;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Directories whose ID was already bound to the category.
    pub skipped: usize,
    /// Directories that could not be imported.
    pub failed: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub legacy_items: usize,
    pub created: LoadReport,
    pub trashed: LoadReport,
    pub recovery: Option<RecoveryStats>,
    pub migration: Option<MigrationReport>,
}

pub struct SaveSystem<C: ExportCodec = GmdCodec> {
    paths: SavePaths,
    codec: C,
    items: ItemArena,
    bindings: HashMap<ItemKey, CategoryKind>,
    created: CreatedLevels,
    trashcan: Trashcan,
    library: LocalLevels,
    events: EventBus,
    legacy: LegacyStore,
}

impl SaveSystem<GmdCodec> {
    /// Open the save tree under `save_dir`, reading `bettersave.json` if present.
    pub fn open(save_dir: impl Into<PathBuf>) -> Result<Self> {
        let save_dir = save_dir.into();
        let config = SaveConfig::load(&save_dir)?;
        Ok(Self::new(SavePaths::new(save_dir, &config)))
    }

    pub fn new(paths: SavePaths) -> Self {
        Self::with_codec(paths, GmdCodec)
    }
}

impl<C: ExportCodec> SaveSystem<C> {
    pub fn with_codec(paths: SavePaths, codec: C) -> Self {
        let created = CreatedLevels::new(paths.created_dir(), paths.lists_dir());
        let trashcan = Trashcan::new(paths.trash_dir());
        let legacy = LegacyStore::new(paths.legacy_blobs.clone(), paths.backup_dir());
        Self {
            paths,
            codec,
            items: ItemArena::new(),
            bindings: HashMap::new(),
            created,
            trashcan,
            library: LocalLevels::new(),
            events: EventBus::new(),
            legacy,
        }
    }

    pub fn paths(&self) -> &SavePaths {
        &self.paths
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn library(&self) -> &LocalLevels {
        &self.library
    }

    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Mutable access for the host's editor. Call [`SaveSystem::save_item`] afterwards.
    pub fn item_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(key)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TrashEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub fn category(&self, kind: CategoryKind) -> &dyn Category {
        match kind {
            CategoryKind::Created => &self.created,
            CategoryKind::Trashcan => &self.trashcan,
        }
    }

    fn split(&mut self, kind: CategoryKind) -> (&mut dyn Category, Hooks<'_>) {
        let category: &mut dyn Category = match kind {
            CategoryKind::Created => &mut self.created,
            CategoryKind::Trashcan => &mut self.trashcan,
        };
        let hooks = Hooks {
            items: &self.items,
            library: &mut self.library,
            events: &mut self.events,
        };
        (category, hooks)
    }

    fn get(&self, key: ItemKey) -> Result<&Item> {
        self.items.get(key).ok_or(SaveError::UnknownItem(key))
    }

    /// Hand an uncategorized item to the system. It joins the live collection.
    pub fn insert(&mut self, item: Item) -> ItemKey {
        let kind = item.kind();
        let key = self.items.insert(item);
        self.library.append(kind, key);
        key
    }

    /// Insert a new item and categorize it into the active library.
    pub fn create(&mut self, item: Item) -> Result<ItemKey> {
        let key = self.insert(item);
        self.add(CategoryKind::Created, key)?;
        Ok(key)
    }

    pub fn category_of(&self, key: ItemKey) -> Option<CategoryKind> {
        self.bindings.get(&key).copied()
    }

    pub fn is_trashed(&self, key: ItemKey) -> bool {
        self.category_of(key) == Some(CategoryKind::Trashcan)
    }

    pub fn trashed_items(&self) -> &[TrashedItem] {
        self.trashcan.items()
    }

    pub fn trashed_at(&self, key: ItemKey) -> Option<DateTime<Utc>> {
        self.trashcan.trashed_at(key)
    }

    /// Find a categorized item by its ID.
    pub fn find(&self, id: &str) -> Option<ItemKey> {
        if id.is_empty() {
            return None;
        }
        self.bindings
            .keys()
            .copied()
            .find(|key| self.items.get(*key).is_some_and(|item| item.id() == id))
    }

    /// Keys of the items a category owns, in display order.
    pub fn items_in(&self, category: CategoryKind) -> Vec<ItemKey> {
        match category {
            CategoryKind::Created => self
                .library
                .iter()
                .filter(|key| self.category_of(*key) == Some(CategoryKind::Created))
                .collect(),
            CategoryKind::Trashcan => self.trashcan.items().iter().map(|t| t.key).collect(),
        }
    }

    /// Items in the live collection that no category owns yet.
    pub fn uncategorized(&self) -> Vec<ItemKey> {
        self.library
            .iter()
            .filter(|key| !self.bindings.contains_key(key))
            .collect()
    }

    /// Find or create the binding for `key`.
    ///
    /// - Already bound: returns the binding, or `None` if `default` names another category.
    /// - Unbound without `default`: `None`.
    /// - Unbound with `existing_id`: adopts that ID (the item is already on disk).
    /// - Unbound otherwise: synthesizes an ID, reserves its directory and saves the item.
    pub fn resolve(
        &mut self,
        key: ItemKey,
        default: Option<CategoryKind>,
        existing_id: Option<&str>,
    ) -> Result<Option<CategoryInfo>> {
        if let Some(&owner) = self.bindings.get(&key) {
            if default.is_some_and(|category| category != owner) {
                return Ok(None);
            }
            return Ok(Some(CategoryInfo {
                key,
                category: owner,
            }));
        }
        let Some(category) = default else {
            return Ok(None);
        };

        let item = self.get(key)?;
        let kind = item.kind();
        let id = match existing_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let id = id.to_string();
                if let Some(item) = self.items.get_mut(key) {
                    item.set_id(id.clone());
                }
                self.bindings.insert(key, category);
                id
            }
            None => {
                let id = synthesize_id(item.name(), &scope_roots(&self.paths.root));
                let dir = self.category(category).dir_for(kind).join(&id);
                if let Err(e) = fs::create_dir_all(&dir) {
                    tracing::error!(dir = %dir.display(), "Unable to reserve save directory: {}", e);
                    return Err(SaveError::Fatal(format!(
                        "Unable to create save directory '{}': {}",
                        dir.display(),
                        e
                    )));
                }
                if let Some(item) = self.items.get_mut(key) {
                    item.set_id(id.clone());
                }
                self.bindings.insert(key, category);
                if let Err(e) = self.save(key) {
                    tracing::error!(id = %id, "Unable to save newly categorized item: {}", e);
                    return Err(SaveError::Fatal(format!(
                        "Unable to save newly categorized item '{}': {}",
                        id, e
                    )));
                }
                id
            }
        };
        tracing::debug!(id = %id, category = %category, "Bound item");
        Ok(Some(CategoryInfo { key, category }))
    }

    pub fn save_dir(&self, key: ItemKey) -> Result<PathBuf> {
        let item = self.get(key)?;
        let owner = self
            .category_of(key)
            .ok_or_else(|| SaveError::NotCategorized(item.name().to_string()))?;
        Ok(self.category(owner).dir_for(item.kind()).join(item.id()))
    }

    /// Export the item into its save directory.
    pub fn save(&self, key: ItemKey) -> Result<()> {
        let dir = self.save_dir(key)?;
        fs::create_dir_all(&dir).map_err(|e| SaveError::fs("create save directory", &dir, e))?;
        self.get(key)?.export_to(&dir, &self.codec)
    }

    /// Host hook for "the user saved this item in the editor".
    ///
    /// Uncategorized items are categorized into the active library first. Returns
    /// `false` without saving when the item belongs to another category.
    pub fn save_item(&mut self, key: ItemKey) -> Result<bool> {
        if self.resolve(key, Some(CategoryKind::Created), None)?.is_none() {
            return Ok(false);
        }
        self.save(key)?;
        Ok(true)
    }

    pub fn add(&mut self, category: CategoryKind, key: ItemKey) -> Result<()> {
        let kind = self.get(key)?.kind();
        match self.category_of(key) {
            None => {
                if self.resolve(key, Some(category), None)?.is_none() {
                    return Err(SaveError::Fatal(format!(
                        "Item {} could not be bound to {}",
                        key, category
                    )));
                }
                let dir = self.save_dir(key)?;
                let (target, mut hooks) = self.split(category);
                target.on_add(&mut hooks, key, &dir, true);
                Ok(())
            }
            Some(owner) if owner == category => Ok(()),
            Some(owner) => {
                let from = self.save_dir(key)?;
                let target = self.category(category);
                for dir in [target.levels_dir(), target.lists_dir()] {
                    fs::create_dir_all(dir)
                        .map_err(|e| SaveError::fs("create category directory", dir, e))?;
                }
                let to = target.dir_for(kind).join(self.get(key)?.id());
                fs::rename(&from, &to)
                    .map_err(|e| SaveError::fs("move item directory", &from, e))?;

                {
                    let (old, mut hooks) = self.split(owner);
                    old.on_remove(&mut hooks, key, Some(&to));
                }
                self.bindings.insert(key, category);
                let (new, mut hooks) = self.split(category);
                new.on_add(&mut hooks, key, &to, false);
                tracing::debug!(from = %owner, to = %category, dir = %to.display(), "Moved item");
                Ok(())
            }
        }
    }

    pub fn trash(&mut self, key: ItemKey) -> Result<()> {
        self.add(CategoryKind::Trashcan, key)
    }

    pub fn untrash(&mut self, key: ItemKey) -> Result<()> {
        self.add(CategoryKind::Created, key)
    }

    fn child_dirs(root: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SaveError::fs("read directory", root, e)),
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    fn is_bound_to(&self, category: CategoryKind, id: &str) -> bool {
        self.bindings.iter().any(|(key, owner)| {
            *owner == category && self.items.get(*key).is_some_and(|item| item.id() == id)
        })
    }

    /// Scan a category's directories and bind every item found there.
    ///
    /// Corrupt entries are logged and skipped. Loading twice never duplicates items.
    pub fn load(&mut self, category: CategoryKind) -> Result<LoadReport> {
        let target = self.category(category);
        let mut roots = vec![target.levels_dir().to_path_buf()];
        if target.lists_dir() != target.levels_dir() {
            roots.push(target.lists_dir().to_path_buf());
        }

        let mut report = LoadReport::default();
        for root in roots {
            for dir in Self::child_dirs(&root)? {
                let Some(id) = dir.file_name().and_then(|name| name.to_str()) else {
                    tracing::warn!(dir = %dir.display(), "Skipping directory with a non UTF-8 name");
                    report.failed += 1;
                    continue;
                };
                if self.is_bound_to(category, id) {
                    report.skipped += 1;
                    continue;
                }
                let item = match Item::import_from(&dir, &self.codec) {
                    Ok(item) => item,
                    Err(e) => {
                        tracing::warn!(dir = %dir.display(), "Unable to load item: {}", e);
                        report.failed += 1;
                        continue;
                    }
                };

                let key = self.items.insert(item);
                if self.resolve(key, Some(category), Some(id))?.is_none() {
                    tracing::error!(dir = %dir.display(), "Loaded item could not be categorized");
                    return Err(SaveError::Fatal(format!(
                        "Item loaded from '{}' could not be categorized",
                        dir.display()
                    )));
                }
                let (target, mut hooks) = self.split(category);
                target.on_load(&mut hooks, key, &dir);
                report.loaded += 1;
            }
        }

        let (target, mut hooks) = self.split(category);
        target.on_load_finished(&mut hooks);
        tracing::info!(
            category = %category,
            loaded = report.loaded,
            skipped = report.skipped,
            failed = report.failed,
            "Loaded category"
        );
        Ok(report)
    }

    /// Delete the item from disk and forget it.
    pub fn permanently_delete(&mut self, key: ItemKey) -> Result<()> {
        let item = self.get(key)?;
        let owner = self
            .category_of(key)
            .ok_or_else(|| SaveError::NotCategorized(item.name().to_string()))?;
        let snapshot = EventItem::new(key, item);
        let dir = self.save_dir(key)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SaveError::fs("remove item directory", &dir, e)),
        }

        {
            let (old, mut hooks) = self.split(owner);
            old.on_remove(&mut hooks, key, None);
        }
        self.events
            .post(TrashEvent::for_item(snapshot, TrashMode::PermanentDelete));
        self.bindings.remove(&key);
        self.library.remove(key);
        self.items.remove(key);
        tracing::debug!(dir = %dir.display(), "Permanently deleted item");
        Ok(())
    }

    /// Permanently delete everything in the trash. Returns how many items were removed.
    pub fn clear_trash(&mut self) -> Result<usize> {
        let dir = self.trashcan.dir().to_path_buf();
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SaveError::fs("clear trash", &dir, e)),
        }
        let removed = self.trashcan.take_all();
        for trashed in &removed {
            self.bindings.remove(&trashed.key);
            self.items.remove(trashed.key);
        }
        self.events.post(TrashEvent::all_trashed());
        tracing::info!(count = removed.len(), "Cleared trash");
        Ok(removed.len())
    }

    /// Read the legacy blob into the live collection as uncategorized items.
    pub fn load_legacy_blob(&mut self) -> Result<usize> {
        let items = self.legacy.read_items()?;
        let count = items.len();
        for item in items {
            self.insert(item);
        }
        if count > 0 {
            tracing::info!(count, "Read items from legacy blob");
        }
        Ok(count)
    }

    /// Write the live collection back into the primary legacy blob.
    pub fn export_legacy_blob(&self) -> Result<usize> {
        let live = |kind: ItemKind| {
            self.library
                .keys(kind)
                .iter()
                .filter_map(|key| self.items.get(*key))
        };
        let blob = LegacyBlob {
            levels: live(ItemKind::Level)
                .filter_map(Item::as_level)
                .cloned()
                .collect(),
            lists: live(ItemKind::List)
                .filter_map(Item::as_list)
                .cloned()
                .collect(),
        };
        let count = blob.levels.len() + blob.lists.len();
        self.legacy.write(&blob)?;
        tracing::info!(count, "Exported live collection to legacy blob");
        Ok(count)
    }

    /// Bootstrap in the fixed order: legacy blob, active library, trash,
    /// recovery (when needed), migration (when anything is uncategorized).
    pub fn startup(&mut self) -> Result<StartupReport> {
        let legacy_items = self.load_legacy_blob()?;
        let created = self.load(CategoryKind::Created)?;
        let trashed = self.load(CategoryKind::Trashcan)?;
        let recovery = if self.needs_recovery() {
            Some(self.recover_lists()?)
        } else {
            None
        };
        let migration = if self.uncategorized().is_empty() {
            None
        } else {
            Some(self.migrate()?)
        };
        Ok(StartupReport {
            legacy_items,
            created,
            trashed,
            recovery,
            migration,
        })
    }

    /// Save order metadata and stamp the version marker.
    pub fn persist(&self) -> Result<()> {
        self.created
            .save_metadata(&self.items, &self.library, |key| {
                self.category_of(key) == Some(CategoryKind::Created)
            })?;
        version::write_current(&self.paths.version_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, List};
    use crate::test_utils::TestEnv;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn level(name: &str, objects: u32) -> Item {
        Item::from_level(Level::new(name, format!("data-{}", name), objects)).unwrap()
    }

    #[test]
    fn create_reserves_directory_and_saves() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("My Level", 10)).unwrap();

        let item = env.system.item(key).unwrap();
        assert_eq!(item.id(), "my-level");
        assert!(env.paths().created_dir().join("my-level/level.gmd").exists());
        assert_eq!(env.system.category_of(key), Some(CategoryKind::Created));
        assert_eq!(env.system.library().keys(ItemKind::Level), &[key]);
    }

    #[test]
    fn resolve_rejects_other_category() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("A", 1)).unwrap();
        assert!(env
            .system
            .resolve(key, Some(CategoryKind::Trashcan), None)
            .unwrap()
            .is_none());
        assert_eq!(
            env.system.resolve(key, None, None).unwrap(),
            Some(CategoryInfo {
                key,
                category: CategoryKind::Created
            })
        );
    }

    #[test]
    fn resolve_without_default_leaves_item_alone() {
        let mut env = TestEnv::new();
        let key = env.system.insert(level("Loose", 1));
        assert_eq!(env.system.resolve(key, None, None).unwrap(), None);
        assert_eq!(env.system.category_of(key), None);
    }

    #[test]
    fn add_to_own_category_is_a_no_op() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("A", 1)).unwrap();
        env.system.add(CategoryKind::Created, key).unwrap();
        assert_eq!(env.system.library().len(), 1);
    }

    #[test]
    fn lists_go_to_their_own_directory() {
        let mut env = TestEnv::new();
        let list = Item::from_list(List::new("Top Picks", vec![1, 2])).unwrap();
        let key = env.system.create(list).unwrap();
        assert_eq!(
            env.system.save_dir(key).unwrap(),
            env.paths().lists_dir().join("top-picks")
        );
        assert!(env.paths().lists_dir().join("top-picks/list.gmdl").exists());
    }

    #[test]
    fn save_item_skips_trashed_items() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("A", 1)).unwrap();
        env.system.trash(key).unwrap();
        assert!(!env.system.save_item(key).unwrap());

        let loose = env.system.insert(level("B", 2));
        assert!(env.system.save_item(loose).unwrap());
        assert_eq!(env.system.category_of(loose), Some(CategoryKind::Created));
    }

    #[test]
    fn permanently_delete_forgets_the_item() {
        let mut env = TestEnv::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        env.system.subscribe(move |ev| sink.borrow_mut().push(ev.clone()));

        let key = env.system.create(level("Gone", 1)).unwrap();
        let dir = env.system.save_dir(key).unwrap();
        env.system.permanently_delete(key).unwrap();

        assert!(!dir.exists());
        assert!(env.system.item(key).is_none());
        assert_eq!(env.system.category_of(key), None);
        assert!(env.system.library().is_empty());
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].is_permanent_delete());
        assert_eq!(events[0].item.as_ref().map(|i| i.id.as_str()), Some("gone"));
    }

    #[test]
    fn permanently_delete_requires_a_binding() {
        let mut env = TestEnv::new();
        let key = env.system.insert(level("Loose", 1));
        assert!(matches!(
            env.system.permanently_delete(key),
            Err(SaveError::NotCategorized(_))
        ));
    }

    #[test]
    fn clear_trash_removes_everything_trashed() {
        let mut env = TestEnv::new();
        let keep = env.system.create(level("Keep", 1)).unwrap();
        let a = env.system.create(level("A", 1)).unwrap();
        let b = env.system.create(level("B", 1)).unwrap();
        env.system.trash(a).unwrap();
        env.system.trash(b).unwrap();

        assert_eq!(env.system.clear_trash().unwrap(), 2);
        assert!(!env.paths().trash_dir().exists());
        assert!(env.system.trashed_items().is_empty());
        assert!(env.system.item(a).is_none());
        assert_eq!(env.system.items.len(), 1);
        assert_eq!(env.system.items_in(CategoryKind::Created), vec![keep]);
    }

    #[test]
    fn persist_writes_only_created_ids_to_order_metadata() {
        let mut env = TestEnv::new();
        env.system.create(level("Kept", 1)).unwrap();
        let mut loose = level("Loose", 1);
        loose.set_id("stale-legacy-id");
        env.system.insert(loose);

        env.system.persist().unwrap();
        assert_eq!(
            crate::category::created::read_order(&env.paths().created_dir(), ItemKind::Level),
            Some(vec!["kept".to_string()])
        );
    }

    #[test]
    fn trash_order_is_most_recent_first() {
        let mut env = TestEnv::new();
        let a = env.system.create(level("A", 1)).unwrap();
        let b = env.system.create(level("B", 1)).unwrap();
        env.system.trash(a).unwrap();
        env.system.trash(b).unwrap();
        assert_eq!(env.system.items_in(CategoryKind::Trashcan), vec![b, a]);
    }

    #[test]
    fn find_looks_up_categorized_ids() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("Find Me", 1)).unwrap();
        env.system.insert(level("Loose", 1));
        assert_eq!(env.system.find("find-me"), Some(key));
        assert_eq!(env.system.find(""), None);
        assert_eq!(env.system.find("loose"), None);
    }

    #[test]
    fn persist_writes_metadata_and_version() {
        let mut env = TestEnv::new();
        env.system.create(level("A", 1)).unwrap();
        env.system.persist().unwrap();
        assert!(env.paths().created_dir().join("metadata.json").exists());
        assert_eq!(
            version::read_existing(&env.paths().version_file()),
            Some(version::SaveVersion::current())
        );
    }

    #[test]
    fn load_skips_corrupt_entries() {
        let mut env = TestEnv::new();
        env.system.create(level("Good", 1)).unwrap();
        let broken = env.paths().created_dir().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("level.gmd"), "garbage").unwrap();
        fs::create_dir_all(env.paths().created_dir().join("empty")).unwrap();

        let mut fresh = env.reopen();
        let report = fresh.load(CategoryKind::Created).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.failed, 2);
        assert!(fresh.find("good").is_some());
    }

    #[test]
    fn export_legacy_blob_writes_live_collection() {
        let mut env = TestEnv::new();
        env.system.create(level("A", 1)).unwrap();
        env.system
            .create(Item::from_list(List::new("L", vec![3])).unwrap())
            .unwrap();
        assert_eq!(env.system.export_legacy_blob().unwrap(), 2);

        let mut fresh = env.reopen();
        assert_eq!(fresh.load_legacy_blob().unwrap(), 2);
    }
}
