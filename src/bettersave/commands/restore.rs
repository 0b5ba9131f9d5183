use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ItemKey;
use crate::system::SaveSystem;

use super::helpers::item_view;

/// Move trashed items back into the active library.
pub fn run<C: ExportCodec>(system: &mut SaveSystem<C>, keys: &[ItemKey]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &key in keys {
        if !system.is_trashed(key) {
            let view = item_view(system, key)?;
            result.add_message(CmdMessage::warning(format!(
                "Not in trash: {} ({})",
                view.name, view.id
            )));
            continue;
        }
        system.untrash(key)?;
        let view = item_view(system, key)?;
        result.add_message(CmdMessage::success(format!(
            "Restored: {} ({})",
            view.name, view.id
        )));
        result.affected.push(view);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::trashcan::TRASHTIME_FILE;
    use crate::category::CategoryKind;
    use crate::commands::{trash, MessageLevel};
    use crate::test_utils::{level, TestEnv};

    #[test]
    fn restores_trashed_items() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("Saved", 1)).unwrap();
        trash::run(&mut env.system, &[key]).unwrap();

        let result = run(&mut env.system, &[key]).unwrap();
        assert_eq!(result.affected[0].category, Some(CategoryKind::Created));
        let dir = env.paths().created_dir().join("saved");
        assert!(dir.join("level.gmd").exists());
        assert!(!dir.join(TRASHTIME_FILE).exists());
    }

    #[test]
    fn restoring_active_item_warns() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("Saved", 1)).unwrap();
        let result = run(&mut env.system, &[key]).unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
