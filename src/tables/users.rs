//! User account table
//!
//! Supports pushdown on id, login, email, and status equality, timestamp
//! ranges on last_updated, and the raw filter escape hatch.

use super::{copy_fields, echo_filter, list_params};
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::page::drive_list;
use crate::query::{FieldMap, QualSet};
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, JsonValue, TableRow};
use tracing::error;

/// Columns eligible for server-side filtering
pub(crate) const FILTER_FIELDS: FieldMap = FieldMap(&[
    ("id", "id"),
    ("login", "profile.login"),
    ("email", "profile.email"),
    ("status", "status"),
    ("last_updated", "lastUpdated"),
]);

/// Documented per-page maximum for the users endpoint
const PAGE_CAP: u64 = 200;

/// Documented columns copied field-by-field; the profile bag stays opaque
const COLUMNS: &[(&str, &str)] = &[
    ("login", "profile.login"),
    ("id", "id"),
    ("email", "profile.email"),
    ("created", "created"),
    ("activated", "activated"),
    ("last_login", "lastLogin"),
    ("last_updated", "lastUpdated"),
    ("password_changed", "passwordChanged"),
    ("self_link", "_links.self.href"),
    ("status", "status"),
    ("status_changed", "statusChanged"),
    ("transitioning_to_status", "transitioningToStatus"),
    ("profile", "profile"),
    ("type", "type"),
];

fn user_row(item: &JsonValue, quals: &QualSet) -> TableRow {
    let mut row = copy_fields(item, COLUMNS);
    echo_filter(&mut row, quals);
    row
}

/// List user accounts, pushing eligible qualifiers down to the vendor.
pub async fn list_users(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V1).await.map_err(|e| {
        error!(error = %e, "okta_user list: connect failed");
        e
    })?;

    let params = list_params(quals, &FILTER_FIELDS, PAGE_CAP);
    drive_list(&client, ctx, sink, "/api/v1/users", params, &mut |item| {
        Some(user_row(&item, quals))
    })
    .await
}

/// Look up one user by id. A missing user produces no row.
pub async fn get_user(sessions: &SessionRegistry, id: &str) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V1).await?;
    match client.get_json(&format!("/api/v1/users/{id}")).await {
        Ok(item) => Ok(Some(user_row(&item, &QualSet::new()))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_user get failed");
            Err(e)
        }
    }
}
