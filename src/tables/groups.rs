//! Group table

use super::{copy_fields, echo_filter, list_params};
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::page::drive_list;
use crate::query::{FieldMap, QualSet};
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, JsonValue, TableRow};
use tracing::error;

pub(crate) const FILTER_FIELDS: FieldMap = FieldMap(&[
    ("id", "id"),
    ("type", "type"),
    ("last_updated", "lastUpdated"),
    ("last_membership_updated", "lastMembershipUpdated"),
]);

/// Documented per-page maximum for the groups endpoint
const PAGE_CAP: u64 = 10_000;

const COLUMNS: &[(&str, &str)] = &[
    ("name", "profile.name"),
    ("id", "id"),
    ("description", "profile.description"),
    ("created", "created"),
    ("last_updated", "lastUpdated"),
    ("last_membership_updated", "lastMembershipUpdated"),
    ("type", "type"),
    ("object_class", "objectClass"),
    ("profile", "profile"),
];

fn group_row(item: &JsonValue, quals: &QualSet) -> TableRow {
    let mut row = copy_fields(item, COLUMNS);
    echo_filter(&mut row, quals);
    row
}

/// List groups, pushing eligible qualifiers down to the vendor.
pub async fn list_groups(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V1).await.map_err(|e| {
        error!(error = %e, "okta_group list: connect failed");
        e
    })?;

    let params = list_params(quals, &FILTER_FIELDS, PAGE_CAP);
    drive_list(&client, ctx, sink, "/api/v1/groups", params, &mut |item| {
        Some(group_row(&item, quals))
    })
    .await
}

/// Look up one group by id. A missing group produces no row.
pub async fn get_group(sessions: &SessionRegistry, id: &str) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V1).await?;
    match client.get_json(&format!("/api/v1/groups/{id}")).await {
        Ok(item) => Ok(Some(group_row(&item, &QualSet::new()))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_group get failed");
            Err(e)
        }
    }
}
