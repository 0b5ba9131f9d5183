use crate::model::{Item, ItemKey};
use std::collections::HashMap;

/// Owns every item the save system knows about, categorized or not.
#[derive(Debug, Default)]
pub struct ItemArena {
    items: HashMap<ItemKey, Item>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: Item) -> ItemKey {
        let key = ItemKey::new();
        self.items.insert(key, item);
        key
    }

    pub fn get(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(&key)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(&key)
    }

    pub fn remove(&mut self, key: ItemKey) -> Option<Item> {
        self.items.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
