use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ItemKey;
use crate::system::SaveSystem;

use super::helpers::item_view;

/// Permanently delete the given items, wherever they are.
pub fn run<C: ExportCodec>(system: &mut SaveSystem<C>, keys: &[ItemKey]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &key in keys {
        // Snapshot first: the item is gone afterwards
        let view = item_view(system, key)?;
        system.permanently_delete(key)?;
        result.add_message(CmdMessage::success(format!(
            "Purged: {} ({})",
            view.name, view.id
        )));
        result.affected.push(view);
    }

    if result.affected.is_empty() {
        result.add_message(CmdMessage::info("Nothing to purge."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{level, TestEnv};

    #[test]
    fn purges_active_and_trashed_items() {
        let mut env = TestEnv::new();
        let active = env.system.create(level("Active", 1)).unwrap();
        let trashed = env.system.create(level("Trashed", 1)).unwrap();
        env.system.trash(trashed).unwrap();

        let result = run(&mut env.system, &[active, trashed]).unwrap();
        assert_eq!(result.affected.len(), 2);
        assert!(!env.paths().created_dir().join("active").exists());
        assert!(!env.paths().trash_dir().join("trashed").exists());
        assert!(env.system.trashed_items().is_empty());
    }

    #[test]
    fn nothing_to_purge() {
        let mut env = TestEnv::new();
        let result = run(&mut env.system, &[]).unwrap();
        assert_eq!(result.messages[0].content, "Nothing to purge.");
    }
}
