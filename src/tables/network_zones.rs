//! Network zone table (tagged responses)

use super::list_params;
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::normalize::normalize_zone;
use crate::page::drive_list;
use crate::query::{FieldMap, QualSet};
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, TableRow};
use tracing::error;

/// Zones expose no filterable columns; only the raw passthrough applies
const FILTER_FIELDS: FieldMap = FieldMap(&[]);

/// The endpoint documents no cap; 1000 mirrors the vendor default
const PAGE_CAP: u64 = 1000;

/// List network zones. Items with an unknown concrete variant are skipped,
/// not errors.
pub async fn list_network_zones(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V1).await.map_err(|e| {
        error!(error = %e, "okta_network_zone list: connect failed");
        e
    })?;

    let params = list_params(quals, &FILTER_FIELDS, PAGE_CAP);
    drive_list(&client, ctx, sink, "/api/v1/zones", params, &mut |item| {
        normalize_zone(&item)
    })
    .await
}

/// Look up one network zone by id. A missing zone or unknown variant
/// produces no row.
pub async fn get_network_zone(sessions: &SessionRegistry, id: &str) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V1).await?;
    match client.get_json(&format!("/api/v1/zones/{id}")).await {
        Ok(item) => Ok(normalize_zone(&item)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_network_zone get failed");
            Err(e)
        }
    }
}
