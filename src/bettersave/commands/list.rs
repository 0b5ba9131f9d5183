use crate::category::CategoryKind;
use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::system::SaveSystem;

use super::helpers::item_view;

/// List the active library (levels first, then lists) or the trash.
pub fn run<C: ExportCodec>(system: &SaveSystem<C>, show_trash: bool) -> Result<CmdResult> {
    let category = if show_trash {
        CategoryKind::Trashcan
    } else {
        CategoryKind::Created
    };
    let listed = system
        .items_in(category)
        .into_iter()
        .map(|key| item_view(system, key))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(if show_trash {
            "Trash is empty."
        } else {
            "No levels or lists yet."
        }));
    }
    Ok(result.with_listed(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;
    use crate::test_utils::{level, list, TestEnv};

    #[test]
    fn lists_active_items_newest_first() {
        let mut env = TestEnv::new();
        env.system.create(level("First", 1)).unwrap();
        env.system.create(level("Second", 1)).unwrap();
        env.system.create(list("Picks", vec![1])).unwrap();

        let result = run(&env.system, false).unwrap();
        let ids: Vec<_> = result.listed.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first", "picks"]);
        assert_eq!(result.listed[2].kind, ItemKind::List);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn trash_listing_excludes_active_items() {
        let mut env = TestEnv::new();
        let gone = env.system.create(level("Gone", 1)).unwrap();
        env.system.create(level("Kept", 1)).unwrap();
        env.system.trash(gone).unwrap();

        let result = run(&env.system, true).unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].id, "gone");
    }

    #[test]
    fn empty_trash_says_so() {
        let env = TestEnv::new();
        let result = run(&env.system, true).unwrap();
        assert!(result.listed.is_empty());
        assert_eq!(result.messages[0].content, "Trash is empty.");
    }
}
