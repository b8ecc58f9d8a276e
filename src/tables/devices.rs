//! Device table (device management surface)

use super::{copy_fields, list_params};
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::page::drive_list;
use crate::query::{FieldMap, QualSet};
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, JsonValue, TableRow};
use tracing::error;

/// Devices expose no filterable columns; only the raw passthrough applies
const FILTER_FIELDS: FieldMap = FieldMap(&[]);

/// Documented per-page maximum for the devices endpoint
const PAGE_CAP: u64 = 20;

const COLUMNS: &[(&str, &str)] = &[
    ("display_name", "profile.displayName"),
    ("id", "id"),
    ("created", "created"),
    ("last_updated", "lastUpdated"),
    ("resource_id", "resourceId"),
    ("resource_type", "resourceType"),
    ("resource_display_name", "resourceDisplayName"),
    ("status", "status"),
    ("profile", "profile"),
    ("links", "_links"),
    ("embedded", "_embedded"),
];

fn device_row(item: &JsonValue) -> TableRow {
    copy_fields(item, COLUMNS)
}

/// List devices.
pub async fn list_devices(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V3).await.map_err(|e| {
        error!(error = %e, "okta_device list: connect failed");
        e
    })?;

    let params = list_params(quals, &FILTER_FIELDS, PAGE_CAP);
    drive_list(&client, ctx, sink, "/api/v1/devices", params, &mut |item| {
        Some(device_row(&item))
    })
    .await
}

/// Look up one device by id. A missing device produces no row.
pub async fn get_device(sessions: &SessionRegistry, id: &str) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V3).await?;
    match client.get_json(&format!("/api/v1/devices/{id}")).await {
        Ok(item) => Ok(Some(device_row(&item))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_device get failed");
            Err(e)
        }
    }
}
