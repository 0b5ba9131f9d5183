use crate::codec::ExportCodec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SaveError};
use crate::model::Item;
use crate::system::SaveSystem;
use std::path::{Path, PathBuf};

use super::helpers::item_view;

fn read_item<C: ExportCodec>(codec: &C, path: &Path) -> Result<Item> {
    if path.is_dir() {
        return Item::import_from(path, codec);
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gmd") => Item::from_level(codec.import_level(path)?),
        Some("gmdl") => Item::from_list(codec.import_list(path)?),
        _ => Err(SaveError::Api(format!(
            "Unsupported file '{}': expected a .gmd or .gmdl file",
            path.display()
        ))),
    }
}

/// Import exported level or list files into the active library.
///
/// Imported items always get a fresh ID; a bad path is reported and skipped.
pub fn run<C: ExportCodec>(system: &mut SaveSystem<C>, paths: &[PathBuf]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for path in paths {
        let mut item = match read_item(system.codec(), path) {
            Ok(item) => item,
            Err(e) => {
                result.add_message(CmdMessage::error(format!(
                    "Failed to import {}: {}",
                    path.display(),
                    e
                )));
                continue;
            }
        };
        item.set_id("");
        let key = system.create(item)?;
        let view = item_view(system, key)?;
        result.add_message(CmdMessage::success(format!(
            "Imported {}: {} ({})",
            view.kind, view.name, view.id
        )));
        result.affected.push(view);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::GmdCodec;
    use crate::commands::MessageLevel;
    use crate::model::{Level, List};
    use crate::test_utils::TestEnv;
    use std::fs;

    #[test]
    fn imports_files_and_directories() {
        let mut env = TestEnv::new();
        let outside = tempfile::tempdir().unwrap();
        let level_file = outside.path().join("exported.gmd");
        GmdCodec
            .export_level(&Level::new("Imported", "abc", 4), &level_file)
            .unwrap();
        let list_dir = outside.path().join("some-list");
        fs::create_dir_all(&list_dir).unwrap();
        Item::from_list(List::new("Folder List", vec![5]))
            .unwrap()
            .export_to(&list_dir, &GmdCodec)
            .unwrap();

        let result = run(&mut env.system, &[level_file, list_dir]).unwrap();
        let ids: Vec<_> = result.affected.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["imported", "folder-list"]);
        assert!(env.paths().created_dir().join("imported/level.gmd").exists());
        assert!(env.paths().lists_dir().join("folder-list/list.gmdl").exists());
    }

    #[test]
    fn imported_ids_never_clash() {
        let mut env = TestEnv::new();
        let outside = tempfile::tempdir().unwrap();
        let file = outside.path().join("a.gmd");
        let mut level = Level::new("Twin", "", 1);
        level.id = "twin".into();
        GmdCodec.export_level(&level, &file).unwrap();

        let result = run(&mut env.system, &[file.clone(), file]).unwrap();
        let ids: Vec<_> = result.affected.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["twin", "twin-0"]);
    }

    #[test]
    fn bad_paths_are_reported() {
        let mut env = TestEnv::new();
        let outside = tempfile::tempdir().unwrap();
        let text = outside.path().join("notes.txt");
        fs::write(&text, "hi").unwrap();

        let result = run(&mut env.system, &[text, outside.path().join("missing.gmd")]).unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(result.messages.len(), 2);
        assert!(result
            .messages
            .iter()
            .all(|m| m.level == MessageLevel::Error));
    }
}
