//! The host's live collection: the ordered levels and lists currently shown in the
//! user's library. Holds keys only; the items themselves live in the arena.

use crate::model::{ItemKey, ItemKind};

#[derive(Debug, Default, Clone)]
pub struct LocalLevels {
    levels: Vec<ItemKey>,
    lists: Vec<ItemKey>,
}

impl LocalLevels {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries_mut(&mut self, kind: ItemKind) -> &mut Vec<ItemKey> {
        match kind {
            ItemKind::Level => &mut self.levels,
            ItemKind::List => &mut self.lists,
        }
    }

    pub fn keys(&self, kind: ItemKind) -> &[ItemKey] {
        match kind {
            ItemKind::Level => &self.levels,
            ItemKind::List => &self.lists,
        }
    }

    pub fn insert_front(&mut self, kind: ItemKind, key: ItemKey) {
        self.entries_mut(kind).insert(0, key);
    }

    pub fn append(&mut self, kind: ItemKind, key: ItemKey) {
        self.entries_mut(kind).push(key);
    }

    /// Returns whether the key was present.
    pub fn remove(&mut self, key: ItemKey) -> bool {
        for kind in [ItemKind::Level, ItemKind::List] {
            let entries = self.entries_mut(kind);
            if let Some(pos) = entries.iter().position(|k| *k == key) {
                entries.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.levels.contains(&key) || self.lists.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.levels.iter().chain(self.lists.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len() + self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.lists.is_empty()
    }

    /// Stable reorder of one kind's entries.
    pub fn sort_by_key<K: Ord>(&mut self, kind: ItemKind, key_fn: impl FnMut(&ItemKey) -> K) {
        self.entries_mut(kind).sort_by_key(key_fn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_front_and_append() {
        let mut lib = LocalLevels::new();
        let (a, b, c) = (ItemKey::new(), ItemKey::new(), ItemKey::new());
        lib.append(ItemKind::Level, a);
        lib.append(ItemKind::Level, b);
        lib.insert_front(ItemKind::Level, c);
        assert_eq!(lib.keys(ItemKind::Level), &[c, a, b]);
        assert!(lib.keys(ItemKind::List).is_empty());
    }

    #[test]
    fn remove_finds_either_kind() {
        let mut lib = LocalLevels::new();
        let (level, list) = (ItemKey::new(), ItemKey::new());
        lib.append(ItemKind::Level, level);
        lib.append(ItemKind::List, list);

        assert!(lib.remove(list));
        assert!(!lib.remove(list));
        assert_eq!(lib.len(), 1);
        assert!(lib.contains(level));
    }

    #[test]
    fn sort_is_stable() {
        let mut lib = LocalLevels::new();
        let keys: Vec<_> = (0..4).map(|_| ItemKey::new()).collect();
        for k in &keys {
            lib.append(ItemKind::Level, *k);
        }
        // Everything equal except the last, which moves to the front
        let last = keys[3];
        lib.sort_by_key(ItemKind::Level, |k| *k != last);
        assert_eq!(lib.keys(ItemKind::Level), &[keys[3], keys[0], keys[1], keys[2]]);
    }
}
