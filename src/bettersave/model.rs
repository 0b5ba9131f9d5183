//! # Domain Model
//!
//! The category system stores two kinds of user content: [`Level`]s and [`List`]s.
//! [`Item`] is the sum type over both; everything that moves content around works on
//! `Item` and only drops down to the concrete kind through [`Item::visit`] or a `match`.
//!
//! ## Identity
//!
//! An item's `id` doubles as its directory name on disk. An empty `id` means the item
//! has never been categorized (for example, it was just read from the legacy blob).
//!
//! ## Probable Duplicates
//!
//! [`Item::is_probable_duplicate`] is a heuristic used by migration, not an equivalence:
//! two items match when their (non-empty) IDs are equal, or for levels when name and
//! object count are equal, or for lists when name and member sequence are equal.

use crate::codec::ExportCodec;
use crate::error::{Result, SaveError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

pub const LEVEL_FILE: &str = "level.gmd";
pub const LIST_FILE: &str = "list.gmdl";

/// Stable in-memory handle for an item held by the save system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey(Uuid);

impl ItemKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Level,
    List,
}

impl ItemKind {
    /// Name of the export file inside an item's save directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ItemKind::Level => LEVEL_FILE,
            ItemKind::List => LIST_FILE,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Level => write!(f, "level"),
            ItemKind::List => write!(f, "list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Local,
    #[default]
    Editor,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Custom,
    Online,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub level_type: LevelType,
    #[serde(default)]
    pub object_count: u32,
    /// Encoded level data. Opaque to the category system.
    #[serde(default)]
    pub payload: String,
}

impl Level {
    pub fn new(name: impl Into<String>, payload: impl Into<String>, object_count: u32) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            level_type: LevelType::Editor,
            object_count,
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub list_type: ListType,
    /// Online IDs of the member levels, in list order.
    #[serde(default)]
    pub levels: Vec<i64>,
}

impl List {
    pub fn new(name: impl Into<String>, levels: Vec<i64>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            list_type: ListType::Custom,
            levels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Level(Level),
    List(List),
}

impl Item {
    /// Only editor levels take part in the category system.
    pub fn from_level(level: Level) -> Result<Self> {
        if level.level_type != LevelType::Editor {
            return Err(SaveError::NotEditorContent(format!(
                "level '{}' is not an editor level",
                level.name
            )));
        }
        Ok(Item::Level(level))
    }

    /// Only custom (user-made) lists take part in the category system.
    pub fn from_list(list: List) -> Result<Self> {
        if list.list_type != ListType::Custom {
            return Err(SaveError::NotEditorContent(format!(
                "list '{}' is not a custom list",
                list.name
            )));
        }
        Ok(Item::List(list))
    }

    /// Load an item from its save directory, trying the level file before the list file.
    pub fn import_from<C: ExportCodec + ?Sized>(dir: &Path, codec: &C) -> Result<Self> {
        let level_file = dir.join(LEVEL_FILE);
        if level_file.exists() {
            return Item::from_level(codec.import_level(&level_file)?);
        }
        let list_file = dir.join(LIST_FILE);
        if list_file.exists() {
            return Item::from_list(codec.import_list(&list_file)?);
        }
        Err(SaveError::NoContentFound(dir.to_path_buf()))
    }

    pub fn export_to<C: ExportCodec + ?Sized>(&self, dir: &Path, codec: &C) -> Result<()> {
        let path = dir.join(self.kind().file_name());
        match self {
            Item::Level(level) => codec.export_level(level, &path),
            Item::List(list) => codec.export_list(list, &path),
        }
    }

    pub fn visit<'a, R>(
        &'a self,
        on_level: impl FnOnce(&'a Level) -> R,
        on_list: impl FnOnce(&'a List) -> R,
    ) -> R {
        match self {
            Item::Level(level) => on_level(level),
            Item::List(list) => on_list(list),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Level(_) => ItemKind::Level,
            Item::List(_) => ItemKind::List,
        }
    }

    pub fn id(&self) -> &str {
        self.visit(|level| level.id.as_str(), |list| list.id.as_str())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        match self {
            Item::Level(level) => level.id = id,
            Item::List(list) => list.id = id,
        }
    }

    pub fn name(&self) -> &str {
        self.visit(|level| level.name.as_str(), |list| list.name.as_str())
    }

    pub fn as_level(&self) -> Option<&Level> {
        match self {
            Item::Level(level) => Some(level),
            Item::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Item::List(list) => Some(list),
            Item::Level(_) => None,
        }
    }

    pub fn is_probable_duplicate(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Level(a), Item::Level(b)) => {
                same_id(&a.id, &b.id) || (a.name == b.name && a.object_count == b.object_count)
            }
            (Item::List(a), Item::List(b)) => {
                same_id(&a.id, &b.id) || (a.name == b.name && a.levels == b.levels)
            }
            _ => false,
        }
    }

    /// Stricter comparison used when recovering from the old per-item store:
    /// identical level data, or identical list membership.
    pub fn has_same_content(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Level(a), Item::Level(b)) => a.payload == b.payload,
            (Item::List(a), Item::List(b)) => a.levels == b.levels,
            _ => false,
        }
    }
}

fn same_id(a: &str, b: &str) -> bool {
    !a.is_empty() && a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str, objects: u32) -> Item {
        Item::from_level(Level::new(name, "data", objects)).unwrap()
    }

    fn list(name: &str, levels: Vec<i64>) -> Item {
        Item::from_list(List::new(name, levels)).unwrap()
    }

    #[test]
    fn non_editor_levels_are_rejected() {
        let mut saved = Level::new("Online", "", 0);
        saved.level_type = LevelType::Saved;
        assert!(matches!(
            Item::from_level(saved),
            Err(SaveError::NotEditorContent(_))
        ));
    }

    #[test]
    fn non_custom_lists_are_rejected() {
        let mut online = List::new("Featured", vec![1, 2]);
        online.list_type = ListType::Online;
        assert!(matches!(
            Item::from_list(online),
            Err(SaveError::NotEditorContent(_))
        ));
    }

    #[test]
    fn levels_with_same_name_and_size_are_duplicates() {
        assert!(level("Stereo", 100).is_probable_duplicate(&level("Stereo", 100)));
        assert!(!level("Stereo", 100).is_probable_duplicate(&level("Stereo", 101)));
        assert!(!level("Stereo", 100).is_probable_duplicate(&level("Back", 100)));
    }

    #[test]
    fn matching_ids_are_duplicates_but_empty_ids_are_not() {
        let mut a = level("One", 1);
        let mut b = level("Two", 2);
        assert!(!a.is_probable_duplicate(&b));
        a.set_id("shared");
        b.set_id("shared");
        assert!(a.is_probable_duplicate(&b));
    }

    #[test]
    fn lists_compare_member_sequences() {
        assert!(list("Mine", vec![1, 2, 3]).is_probable_duplicate(&list("Mine", vec![1, 2, 3])));
        assert!(!list("Mine", vec![1, 2, 3]).is_probable_duplicate(&list("Mine", vec![3, 2, 1])));
    }

    #[test]
    fn levels_never_duplicate_lists() {
        let mut a = level("Same", 0);
        let mut b = list("Same", vec![]);
        a.set_id("x");
        b.set_id("x");
        assert!(!a.is_probable_duplicate(&b));
    }

    #[test]
    fn visit_dispatches_on_kind() {
        let kind = list("L", vec![]).visit(|_| "level", |_| "list");
        assert_eq!(kind, "list");
        assert_eq!(level("A", 0).kind().file_name(), LEVEL_FILE);
    }
}
