//! # Trash Events
//!
//! Every ownership-changing transition posts a [`TrashEvent`] right after the change
//! is committed on disk and in memory. Posting is synchronous: listeners run on the
//! caller's thread before the operation returns.

use crate::model::{Item, ItemKey, ItemKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashMode {
    PermanentDelete,
    Trash,
    Untrash,
}

/// Snapshot of the item an event is about. Taken at post time, so it stays valid
/// after a permanent delete has dropped the item itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub key: ItemKey,
    pub kind: ItemKind,
    pub id: String,
    pub name: String,
}

impl EventItem {
    pub fn new(key: ItemKey, item: &Item) -> Self {
        Self {
            key,
            kind: item.kind(),
            id: item.id().to_string(),
            name: item.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashEvent {
    /// `None` means the event affects every trashed item (clearing the trash).
    pub item: Option<EventItem>,
    pub mode: TrashMode,
}

impl TrashEvent {
    pub fn for_item(item: EventItem, mode: TrashMode) -> Self {
        Self {
            item: Some(item),
            mode,
        }
    }

    pub fn all_trashed() -> Self {
        Self {
            item: None,
            mode: TrashMode::PermanentDelete,
        }
    }

    pub fn is_permanent_delete(&self) -> bool {
        self.mode == TrashMode::PermanentDelete
    }

    pub fn is_trash(&self) -> bool {
        self.mode == TrashMode::Trash
    }

    pub fn is_untrash(&self) -> bool {
        self.mode == TrashMode::Untrash
    }
}

type Listener = Box<dyn FnMut(&TrashEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TrashEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn post(&mut self, event: TrashEvent) {
        tracing::debug!(mode = ?event.mode, item = ?event.item.as_ref().map(|i| &i.id), "Posting trash event");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Level;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_receive_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = seen.clone();
        bus.subscribe(move |ev| sink.borrow_mut().push(ev.mode));

        let item = Item::from_level(Level::new("A", "", 0)).unwrap();
        let snapshot = EventItem::new(ItemKey::new(), &item);
        bus.post(TrashEvent::for_item(snapshot.clone(), TrashMode::Trash));
        bus.post(TrashEvent::for_item(snapshot, TrashMode::Untrash));
        bus.post(TrashEvent::all_trashed());

        assert_eq!(
            *seen.borrow(),
            vec![
                TrashMode::Trash,
                TrashMode::Untrash,
                TrashMode::PermanentDelete
            ]
        );
    }

    #[test]
    fn bulk_event_has_no_item() {
        let ev = TrashEvent::all_trashed();
        assert!(ev.item.is_none());
        assert!(ev.is_permanent_delete());
        assert!(!ev.is_trash());
    }
}
