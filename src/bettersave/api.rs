//! # API Facade
//!
//! A thin layer over the command modules and the single entry point for every
//! bettersave operation, whatever the UI.
//!
//! The facade:
//! - **Normalizes inputs**: user-facing item IDs become arena keys
//! - **Dispatches** to the command function
//! - **Owns the lifecycle**: [`SaveApi::startup`] before commands, [`SaveApi::persist`] after
//!
//! It does no printing and never exits the process.

use crate::codec::{ExportCodec, GmdCodec};
use crate::commands::{self, helpers::resolve_ids, CmdResult};
use crate::error::Result;
use crate::system::{SaveSystem, StartupReport};
use std::path::PathBuf;

pub struct SaveApi<C: ExportCodec = GmdCodec> {
    system: SaveSystem<C>,
}

impl<C: ExportCodec> SaveApi<C> {
    pub fn new(system: SaveSystem<C>) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &SaveSystem<C> {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut SaveSystem<C> {
        &mut self.system
    }

    pub fn startup(&mut self) -> Result<StartupReport> {
        self.system.startup()
    }

    pub fn persist(&self) -> Result<()> {
        self.system.persist()
    }

    pub fn list(&self, show_trash: bool) -> Result<CmdResult> {
        commands::list::run(&self.system, show_trash)
    }

    pub fn trash<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let keys = resolve_ids(&self.system, ids)?;
        commands::trash::run(&mut self.system, &keys)
    }

    pub fn restore<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let keys = resolve_ids(&self.system, ids)?;
        commands::restore::run(&mut self.system, &keys)
    }

    pub fn purge<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let keys = resolve_ids(&self.system, ids)?;
        commands::purge::run(&mut self.system, &keys)
    }

    pub fn clear_trash(&mut self) -> Result<CmdResult> {
        commands::clear::run(&mut self.system)
    }

    pub fn import(&mut self, paths: &[PathBuf]) -> Result<CmdResult> {
        commands::import::run(&mut self.system, paths)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.system)
    }
}
