use super::ItemView;
use crate::codec::ExportCodec;
use crate::error::{Result, SaveError};
use crate::model::ItemKey;
use crate::system::SaveSystem;

pub fn item_view<C: ExportCodec>(system: &SaveSystem<C>, key: ItemKey) -> Result<ItemView> {
    let item = system.item(key).ok_or(SaveError::UnknownItem(key))?;
    Ok(ItemView {
        key,
        id: item.id().to_string(),
        name: item.name().to_string(),
        kind: item.kind(),
        category: system.category_of(key),
        trashed_at: system.trashed_at(key),
    })
}

/// Map user-supplied item IDs to keys. Fails on the first unknown ID.
pub fn resolve_ids<C: ExportCodec, I: AsRef<str>>(
    system: &SaveSystem<C>,
    ids: &[I],
) -> Result<Vec<ItemKey>> {
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            system
                .find(id)
                .ok_or_else(|| SaveError::Api(format!("No item with ID '{}'", id)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryKind;
    use crate::test_utils::{level, TestEnv};

    #[test]
    fn resolves_known_ids() {
        let mut env = TestEnv::new();
        let a = env.system.create(level("Alpha", 1)).unwrap();
        let b = env.system.create(level("Beta", 1)).unwrap();
        assert_eq!(resolve_ids(&env.system, &["beta", "alpha"]).unwrap(), vec![b, a]);
    }

    #[test]
    fn unknown_id_is_an_api_error() {
        let mut env = TestEnv::new();
        env.system.create(level("Alpha", 1)).unwrap();
        let err = resolve_ids(&env.system, &["alpha", "nope"]).unwrap_err();
        assert!(matches!(err, SaveError::Api(ref msg) if msg.contains("nope")));
    }

    #[test]
    fn view_reports_trash_time() {
        let mut env = TestEnv::new();
        let key = env.system.create(level("Alpha", 1)).unwrap();
        assert_eq!(item_view(&env.system, key).unwrap().trashed_at, None);

        env.system.trash(key).unwrap();
        let view = item_view(&env.system, key).unwrap();
        assert_eq!(view.category, Some(CategoryKind::Trashcan));
        assert!(view.trashed_at.is_some());
    }
}
