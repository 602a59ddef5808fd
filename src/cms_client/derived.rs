//! Pure post-processing over item lists

use serde_json::Value;

use super::types::CollectionItem;

#[must_use]
pub fn find_by_slug<'a>(items: &'a [CollectionItem], slug: &str) -> Option<&'a CollectionItem> {
    items.iter().find(|item| item.slug() == Some(slug))
}

/// Items that are neither drafts nor archived
#[must_use]
pub fn published(items: &[CollectionItem]) -> Vec<CollectionItem> {
    items.iter().filter(|item| item.is_published()).cloned().collect()
}

/// Case-insensitive substring search over the named string fields
#[must_use]
pub fn search(items: &[CollectionItem], query: &str, fields: &[&str]) -> Vec<CollectionItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                item.field_str(field)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

fn field_values(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Up to `limit` other items sharing a value of `field` with `item`
///
/// Array fields match when they have any element in common.
#[must_use]
pub fn related(
    items: &[CollectionItem],
    item: &CollectionItem,
    field: &str,
    limit: usize,
) -> Vec<CollectionItem> {
    let Some(own) = item.field_data.get(field).map(field_values) else {
        return Vec::new();
    };
    if own.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|candidate| candidate.id != item.id)
        .filter(|candidate| {
            candidate
                .field_data
                .get(field)
                .is_some_and(|value| field_values(value).iter().any(|v| own.contains(v)))
        })
        .take(limit)
        .cloned()
        .collect()
}
