use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ItemKey;
use crate::system::SaveSystem;

use super::helpers::item_view;

pub fn run<C: ExportCodec>(system: &mut SaveSystem<C>, keys: &[ItemKey]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &key in keys {
        if system.is_trashed(key) {
            let view = item_view(system, key)?;
            result.add_message(CmdMessage::warning(format!(
                "Already in trash: {} ({})",
                view.name, view.id
            )));
            continue;
        }
        system.trash(key)?;
        let view = item_view(system, key)?;
        result.add_message(CmdMessage::success(format!(
            "Moved to trash: {} ({})",
            view.name, view.id
        )));
        result.affected.push(view);
    }

    Ok(result)
}
