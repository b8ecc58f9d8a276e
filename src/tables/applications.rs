//! Application table, plus the parent source for app-scoped child tables

use super::{copy_fields, echo_filter, list_params};
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::join::ParentSource;
use crate::page::{collect_list, drive_list};
use crate::query::{FieldMap, QualSet};
use crate::session::{OktaClient, SessionRegistry};
use crate::types::{ApiVersion, JsonValue, TableRow};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

pub(crate) const FILTER_FIELDS: FieldMap = FieldMap(&[("name", "name"), ("status", "status")]);

/// Documented per-page maximum for the apps endpoint
const PAGE_CAP: u64 = 200;

const COLUMNS: &[(&str, &str)] = &[
    ("label", "label"),
    ("id", "id"),
    ("name", "name"),
    ("created", "created"),
    ("last_updated", "lastUpdated"),
    ("sign_on_mode", "signOnMode"),
    ("status", "status"),
    ("accessibility", "accessibility"),
    ("credentials", "credentials"),
    ("features", "features"),
    ("licensing", "licensing"),
    ("settings", "settings"),
    ("visibility", "visibility"),
];

fn application_row(item: &JsonValue, quals: &QualSet) -> TableRow {
    let mut row = copy_fields(item, COLUMNS);
    echo_filter(&mut row, quals);
    row
}

/// List applications, pushing eligible qualifiers down to the vendor.
pub async fn list_applications(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V1).await.map_err(|e| {
        error!(error = %e, "okta_application list: connect failed");
        e
    })?;

    let params = list_params(quals, &FILTER_FIELDS, PAGE_CAP);
    drive_list(&client, ctx, sink, "/api/v1/apps", params, &mut |item| {
        Some(application_row(&item, quals))
    })
    .await
}

/// Look up one application by id. A missing application produces no row.
pub async fn get_application(sessions: &SessionRegistry, id: &str) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V1).await?;
    match client.get_json(&format!("/api/v1/apps/{id}")).await {
        Ok(item) => Ok(Some(application_row(&item, &QualSet::new()))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_application get failed");
            Err(e)
        }
    }
}

// ============================================================================
// Parent source
// ============================================================================

/// Applications as parents of app-scoped child tables.
///
/// The list endpoint cannot filter by app id, so a pinned parent goes
/// through the get endpoint instead of enumeration.
pub(crate) struct ApplicationParents<'a> {
    pub client: Arc<OktaClient>,
    pub ctx: &'a QueryContext,
}

#[async_trait]
impl ParentSource for ApplicationParents<'_> {
    async fn get_by_id(&self, id: &str) -> Result<Option<JsonValue>> {
        match self.client.get_json(&format!("/api/v1/apps/{id}")).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_all(&self) -> Result<Vec<JsonValue>> {
        let params = vec![("limit".to_string(), PAGE_CAP.to_string())];
        collect_list(&self.client, self.ctx, "/api/v1/apps", params).await
    }
}
