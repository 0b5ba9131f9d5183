//! # Categories
//!
//! A category is a directory-backed bucket that owns items. There are two:
//!
//! - [`CreatedLevels`]: the active library, which also owns the order metadata.
//! - [`Trashcan`]: soft-deleted items, each with a trash timestamp.
//!
//! The generic parts of the lifecycle (ID reservation, moves between categories,
//! directory scans) live in [`crate::system::SaveSystem`]. A category only implements
//! the [`Category`] hooks that keep its own in-memory view in sync. Hooks cannot fail:
//! by the time they run, the on-disk change has already been committed.

pub mod created;
pub mod trashcan;

pub use created::CreatedLevels;
pub use trashcan::{TrashedItem, Trashcan};

use crate::events::EventBus;
use crate::library::LocalLevels;
use crate::model::{ItemKey, ItemKind};
use crate::system::ItemArena;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Created,
    Trashcan,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Created => write!(f, "created"),
            CategoryKind::Trashcan => write!(f, "trash"),
        }
    }
}

/// The binding between an item and the category that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub key: ItemKey,
    pub category: CategoryKind,
}

/// Shared state a hook may read or update.
pub struct Hooks<'a> {
    pub items: &'a ItemArena,
    pub library: &'a mut LocalLevels,
    pub events: &'a mut EventBus,
}

pub trait Category {
    fn levels_dir(&self) -> &Path;

    /// May be the same directory as [`Category::levels_dir`].
    fn lists_dir(&self) -> &Path;

    fn dir_for(&self, kind: ItemKind) -> &Path {
        match kind {
            ItemKind::Level => self.levels_dir(),
            ItemKind::List => self.lists_dir(),
        }
    }

    /// An item found on disk during a directory scan has been bound to this category.
    fn on_load(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, dir: &Path);

    /// Called once after a scan, whether or not anything was loaded.
    fn on_load_finished(&mut self, _hooks: &mut Hooks<'_>) {}

    /// An item was added. `is_new` is false when it was moved here from another category.
    fn on_add(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, dir: &Path, is_new: bool);

    /// An item is leaving. `new_dir` is where its directory now lives, or `None` when
    /// it was deleted from disk.
    fn on_remove(&mut self, hooks: &mut Hooks<'_>, key: ItemKey, new_dir: Option<&Path>);
}
