//! Insert-or-replace of an entry in a sub-collection of a parent resource.

use crate::error::{Result, VwanError};
use crate::models::Named;

/// Insert `new_item` into `collection`, replacing any entry with the same key.
///
/// An absent collection is created empty first. The replaced entry loses its
/// position: `new_item` is always appended at the end.
///
/// # Arguments
/// * `collection` - The parent's list field
/// * `new_item` - The entry to insert
/// * `key_name` - Name of the key field, for messages
/// * `key` - Reads the key field of an entry
/// * `warn` - Log a warning when an existing entry is replaced
///
/// # Returns
/// * `Ok(Some(old))` - The entry that was replaced
/// * `Ok(None)` - Nothing matched
/// * `Err` - If `new_item` has no key
pub fn upsert<T, K>(
    collection: &mut Option<Vec<T>>,
    new_item: T,
    key_name: &str,
    key: K,
    warn: bool,
) -> Result<Option<T>>
where
    K: Fn(&T) -> Option<&str>,
{
    let items = collection.get_or_insert_with(Vec::new);

    let value = key(&new_item).map(str::to_string).ok_or_else(|| {
        VwanError::Configuration(format!(
            "Unable to resolve a value for key '{key_name}' with which to match."
        ))
    })?;

    let replaced = match items.iter().position(|x| key(x) == Some(value.as_str())) {
        Some(i) => {
            if warn {
                log::warn!("Item '{value}' already exists. Replacing with new values.");
            }
            Some(items.remove(i))
        }
        None => None,
    };

    items.push(new_item);
    Ok(replaced)
}

/// [`upsert`] keyed on the ARM `name`.
pub fn upsert_by_name<T: Named>(
    collection: &mut Option<Vec<T>>,
    new_item: T,
    warn: bool,
) -> Result<Option<T>> {
    upsert(collection, new_item, "name", T::name, warn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HubVirtualNetworkConnection;

    fn conn(name: Option<&str>, etag: &str) -> HubVirtualNetworkConnection {
        HubVirtualNetworkConnection {
            name: name.map(str::to_string),
            etag: Some(etag.to_string()),
            ..Default::default()
        }
    }

    fn names(items: &Option<Vec<HubVirtualNetworkConnection>>) -> Vec<&str> {
        items
            .iter()
            .flatten()
            .filter_map(|c| c.name.as_deref())
            .collect()
    }

    #[test]
    fn test_upsert_initializes_absent_collection() {
        let mut items = None;
        let replaced = upsert_by_name(&mut items, conn(Some("a"), "1"), true).expect("upsert");
        assert!(replaced.is_none());
        assert_eq!(names(&items), vec!["a"]);
    }

    #[test]
    fn test_upsert_replaced_item_moves_to_end() {
        let mut items = None;
        upsert_by_name(&mut items, conn(Some("a"), "1"), true).expect("upsert a");
        upsert_by_name(&mut items, conn(Some("b"), "2"), true).expect("upsert b");
        let replaced = upsert_by_name(&mut items, conn(Some("a"), "3"), false).expect("upsert a");

        assert_eq!(replaced.and_then(|c| c.etag).as_deref(), Some("1"));
        assert_eq!(names(&items), vec!["b", "a"]);
        let last = items.as_ref().and_then(|v| v.last()).expect("last");
        assert_eq!(last.etag.as_deref(), Some("3"));
    }

    #[test]
    fn test_upsert_missing_key_is_configuration_error() {
        let mut items = Some(vec![conn(Some("a"), "1")]);
        let err = upsert_by_name(&mut items, conn(None, "2"), true).unwrap_err();
        assert!(err.is_configuration(), "got {err:?}");
        assert!(err.to_string().contains("'name'"));
        assert_eq!(names(&items), vec!["a"]);
    }

    #[test]
    fn test_upsert_custom_key() {
        fn by_etag(c: &HubVirtualNetworkConnection) -> Option<&str> {
            c.etag.as_deref()
        }
        let mut items = None;
        upsert(&mut items, conn(Some("a"), "x"), "etag", by_etag, true).expect("upsert");
        upsert(&mut items, conn(Some("b"), "x"), "etag", by_etag, true).expect("upsert");
        assert_eq!(names(&items), vec!["b"]);
    }
}
