use crate::category::CategoryKind;
use crate::model::{ItemKey, ItemKind};
use chrono::{DateTime, Utc};

pub mod clear;
pub mod helpers;
pub mod import;
pub mod list;
pub mod purge;
pub mod restore;
pub mod status;
pub mod trash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A display-ready snapshot of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub key: ItemKey,
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub category: Option<CategoryKind>,
    pub trashed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<ItemView>,
    pub listed: Vec<ItemView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, items: Vec<ItemView>) -> Self {
        self.listed = items;
        self
    }
}
