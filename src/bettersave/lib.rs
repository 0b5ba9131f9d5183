//! # Bettersave Architecture
//!
//! Bettersave stores user-made levels and lists one item per directory, tracks which
//! category owns each item (the active library or the trash), and migrates content out
//! of the old monolithic save blob without losing or duplicating anything.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, picks exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Resolves item IDs to keys, runs startup / persist        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Save System (system/, category/)                           │
//! │  - Item arena + binding side-table                          │
//! │  - CreatedLevels and Trashcan behind the Category trait     │
//! │  - Migration from the legacy blob, list recovery            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## On-disk Layout
//!
//! ```text
//! R/created/<id>/level.gmd      R/created/metadata.json
//! R/lists/<id>/list.gmdl        R/lists/metadata.json
//! R/trashcan/<id>/...           R/trashcan/<id>/.trashtime
//! R/.ccbackup/<timestamp>.dat   R/.version
//! ```
//!
//! Item IDs are directory names and are unique across every directory under `R`, so a
//! move between categories is one atomic rename.
//!
//! ## Errors
//!
//! Everything returns [`error::Result`]. Most failures are recoverable and name the
//! item or path involved. [`error::SaveError::Fatal`] marks a broken invariant; hosts
//! must stop instead of continuing on the in-memory model.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by every client
//! - [`commands`]: list, trash, restore, purge, clear, import, status
//! - [`system`]: [`system::SaveSystem`], migration and recovery
//! - [`category`]: the [`category::Category`] trait, CreatedLevels, Trashcan
//! - [`model`]: levels, lists and the [`model::Item`] sum type
//! - [`ident`]: ID synthesis from display names
//! - [`codec`]: item file encoding
//! - [`legacy`]: the monolithic legacy blob
//! - [`library`]: the host's live collection
//! - [`events`]: trash events
//! - [`version`]: the save format version marker
//! - [`config`]: `bettersave.json` and resolved paths
//! - [`error`]: error types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod category;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod ident;
pub mod legacy;
pub mod library;
pub mod model;
pub mod system;
pub mod version;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
