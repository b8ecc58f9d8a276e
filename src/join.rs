//! Parent/child join driver
//!
//! Child tables scope their rows to a parent entity (factors to a user,
//! assigned users to an application). When the caller pins the parent key,
//! a single direct lookup replaces parent enumeration; a missing parent
//! means zero rows, not an error. Without the pin, every parent is listed
//! and children are fetched per parent.

use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::debug;

/// Source of parent entities for a child table
#[async_trait]
pub trait ParentSource: Send + Sync {
    /// Fetch one parent by id; `None` when the vendor reports it missing
    async fn get_by_id(&self, id: &str) -> Result<Option<JsonValue>>;

    /// Enumerate all parents
    async fn list_all(&self) -> Result<Vec<JsonValue>>;
}

/// Resolve the parent set for a child listing.
///
/// With a parent-id qualifier this makes exactly one get call and never
/// touches the enumeration endpoint; a not-found parent resolves to an
/// empty set. Without a qualifier it enumerates every parent.
pub async fn resolve_parents(
    source: &dyn ParentSource,
    parent_id_qual: Option<&str>,
) -> Result<Vec<JsonValue>> {
    match parent_id_qual.filter(|id| !id.is_empty()) {
        Some(id) => match source.get_by_id(id).await? {
            Some(parent) => Ok(vec![parent]),
            None => {
                debug!(parent_id = id, "parent not found, producing zero rows");
                Ok(Vec::new())
            }
        },
        None => source.list_all().await,
    }
}

/// Pull a string-valued key out of a parent record.
pub fn parent_key(record: &JsonValue, key: &str) -> Option<String> {
    match record.get(key) {
        Some(JsonValue::String(s)) => Some(s.clone()),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}
