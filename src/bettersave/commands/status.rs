use crate::category::CategoryKind;
use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ItemKind;
use crate::system::SaveSystem;
use crate::version::{self, SaveVersion};

pub fn run<C: ExportCodec>(system: &SaveSystem<C>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let paths = system.paths();

    let active = system.items_in(CategoryKind::Created);
    let count = |kind: ItemKind| {
        active
            .iter()
            .filter(|key| system.item(**key).is_some_and(|item| item.kind() == kind))
            .count()
    };
    result.add_message(CmdMessage::info(format!(
        "Save root: {}",
        paths.root.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Library: {} levels, {} lists",
        count(ItemKind::Level),
        count(ItemKind::List)
    )));
    result.add_message(CmdMessage::info(format!(
        "Trash: {} items",
        system.trashed_items().len()
    )));

    let written = version::read_existing(&paths.version_file())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string());
    result.add_message(CmdMessage::info(format!(
        "Save format: {} (this build: {})",
        written,
        SaveVersion::current()
    )));

    let uncategorized = system.uncategorized().len();
    if uncategorized > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} items are not categorized yet",
            uncategorized
        )));
    }
    Ok(result)
}
