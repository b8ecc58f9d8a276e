//! Authenticator table (tagged responses)

use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::normalize::normalize_authenticator;
use crate::page::drive_list;
use crate::query::QualSet;
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, TableRow};
use tracing::error;

/// List org authenticators. Items with an unknown concrete variant are
/// skipped, not errors.
pub async fn list_authenticators(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    _quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V5).await.map_err(|e| {
        error!(error = %e, "okta_authenticator list: connect failed");
        e
    })?;

    drive_list(
        &client,
        ctx,
        sink,
        "/api/v1/authenticators",
        vec![],
        &mut |item| normalize_authenticator(&item),
    )
    .await
}

/// Look up one authenticator by id. A missing authenticator or unknown
/// variant produces no row.
pub async fn get_authenticator(
    sessions: &SessionRegistry,
    id: &str,
) -> Result<Option<TableRow>> {
    if id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V5).await?;
    match client.get_json(&format!("/api/v1/authenticators/{id}")).await {
        Ok(item) => Ok(normalize_authenticator(&item)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, id, "okta_authenticator get failed");
            Err(e)
        }
    }
}
