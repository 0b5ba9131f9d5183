//! # Created Levels
//!
//! The active library. Items here are mirrored in the host's live collection, newest
//! first. Directory listings come back in lexicographic order, so the user-visible
//! order is persisted separately as order metadata:
//!
//! ```text
//! R/created/metadata.json   { "level-order": ["my-level", "other", ...] }
//! R/lists/metadata.json     { "list-order": ["favourites", ...] }
//! ```
//!
//! When levels and lists share a directory, both keys go into the same file.

use super::{Category, Hooks};
use crate::codec::write_atomic;
use crate::error::{Result, SaveError};
use crate::events::{EventItem, TrashEvent, TrashMode};
use crate::library::LocalLevels;
use crate::model::{ItemKey, ItemKind};
use crate::system::ItemArena;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct OrderMetadata {
    #[serde(rename = "level-order", default, skip_serializing_if = "Option::is_none")]
    level_order: Option<Vec<String>>,
    #[serde(rename = "list-order", default, skip_serializing_if = "Option::is_none")]
    list_order: Option<Vec<String>>,
}

impl OrderMetadata {
    fn take(self, kind: ItemKind) -> Option<Vec<String>> {
        match kind {
            ItemKind::Level => self.level_order,
            ItemKind::List => self.list_order,
        }
    }
}

/// Read the persisted order for `kind` from `dir/metadata.json`.
pub(crate) fn read_order(dir: &Path, kind: ItemKind) -> Option<Vec<String>> {
    let path = dir.join(METADATA_FILE);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<OrderMetadata>(&content) {
        Ok(meta) => meta.take(kind),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring unreadable order metadata: {}", e);
            None
        }
    }
}

/// Stable reorder of the live collection. IDs missing from `order` sort first.
pub(crate) fn apply_order(
    library: &mut LocalLevels,
    items: &ItemArena,
    kind: ItemKind,
    order: &[String],
) {
    library.sort_by_key(kind, |key| {
        items
            .get(*key)
            .and_then(|item| order.iter().position(|id| id == item.id()))
    });
}

#[derive(Debug, Clone)]
pub struct CreatedLevels {
    levels_dir: PathBuf,
    lists_dir: PathBuf,
}

impl CreatedLevels {
    pub fn new(levels_dir: PathBuf, lists_dir: PathBuf) -> Self {
        Self {
            levels_dir,
            lists_dir,
        }
    }

    fn ordered_ids(
        items: &ItemArena,
        library: &LocalLevels,
        kind: ItemKind,
        owned: &impl Fn(ItemKey) -> bool,
    ) -> Vec<String> {
        library
            .keys(kind)
            .iter()
            .filter(|key| owned(**key))
            .filter_map(|key| items.get(*key))
            .map(|item| item.id().to_string())
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn write_metadata(dir: &Path, meta: &OrderMetadata) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| SaveError::fs("create category directory", dir, e))?;
        let path = dir.join(METADATA_FILE);
        let content = serde_json::to_string_pretty(meta)?;
        write_atomic(&path, content.as_bytes())
            .map_err(|e| SaveError::fs("write order metadata", &path, e))
    }

    /// Persist the current order of the live collection.
    ///
    /// Only keys for which `owned` returns true are written, so uncategorized entries
    /// (still carrying whatever ID the legacy blob gave them) never reach the file.
    pub fn save_metadata(
        &self,
        items: &ItemArena,
        library: &LocalLevels,
        owned: impl Fn(ItemKey) -> bool,
    ) -> Result<()> {
        let level_order = Self::ordered_ids(items, library, ItemKind::Level, &owned);
        let list_order = Self::ordered_ids(items, library, ItemKind::List, &owned);
        tracing::debug!(
            levels = level_order.len(),
            lists = list_order.len(),
            "Saving order metadata"
        );

        if self.levels_dir == self.lists_dir {
            return Self::write_metadata(
                &self.levels_dir,
                &OrderMetadata {
                    level_order: Some(level_order),
                    list_order: Some(list_order),
                },
            );
        }
        Self::write_metadata(
            &self.levels_dir,
            &OrderMetadata {
                level_order: Some(level_order),
                list_order: None,
            },
        )?;
        Self::write_metadata(
            &self.lists_dir,
            &OrderMetadata {
                level_order: None,
                list_order: Some(list_order),
            },
        )
    }
}

impl Category for CreatedLevels {
    fn levels_dir(&self) -> &Path {
        &self.levels_dir
    }

    fn lists_dir(&self) -> &Path {
        &self.lists_dir
    }

    fn on_load(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, _dir: &Path) {
        if let Some(item) = hooks.items.get(key) {
            hooks.library.append(item.kind(), key);
        }
    }

    fn on_load_finished(&mut self, hooks: &mut Hooks<'_>) {
        for kind in [ItemKind::Level, ItemKind::List] {
            if let Some(order) = read_order(self.dir_for(kind), kind) {
                apply_order(hooks.library, hooks.items, kind, &order);
            }
        }
    }

    fn on_add(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, _dir: &Path, is_new: bool) {
        let Some(item) = hooks.items.get(key) else {
            return;
        };
        hooks.library.remove(key);
        hooks.library.insert_front(item.kind(), key);
        if !is_new {
            hooks.events.post(TrashEvent::for_item(
                EventItem::new(key, item),
                TrashMode::Untrash,
            ));
        }
    }

    fn on_remove(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, _new_dir: Option<&Path>) {
        hooks.library.remove(key);
    }
}
