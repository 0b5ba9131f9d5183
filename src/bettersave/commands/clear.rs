use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::system::SaveSystem;

use super::helpers::item_view;

/// Empty the trash.
pub fn run<C: ExportCodec>(system: &mut SaveSystem<C>) -> Result<CmdResult> {
    let removed = system
        .trashed_items()
        .iter()
        .map(|t| item_view(system, t.key))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    if removed.is_empty() {
        result.add_message(CmdMessage::info("Trash is already empty."));
        return Ok(result);
    }

    let count = system.clear_trash()?;
    result.add_message(CmdMessage::success(format!(
        "Permanently deleted {} item{} from the trash",
        count,
        if count == 1 { "" } else { "s" }
    )));
    result.affected = removed;
    Ok(result)
}
