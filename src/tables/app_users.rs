//! Users assigned to an application (child of the application table)

use super::applications::ApplicationParents;
use super::copy_fields;
use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::join::{parent_key, resolve_parents};
use crate::page::drive_list;
use crate::query::{effective_page_size, QualSet};
use crate::session::SessionRegistry;
use crate::types::{ApiVersion, JsonValue, TableRow};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Documented per-page maximum for the app-users endpoint
const PAGE_CAP: u64 = 500;

const COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("user_name", "credentials.userName"),
    ("created", "created"),
    ("status", "status"),
    ("email", "profile.email"),
    ("external_id", "externalId"),
    ("first_name", "profile.given_name"),
    ("last_name", "profile.family_name"),
    ("last_sync", "lastSync"),
    ("last_updated", "lastUpdated"),
    ("password_changed", "passwordChanged"),
    ("scope", "scope"),
    ("status_changed", "statusChanged"),
    ("sync_state", "syncState"),
    ("links", "_links"),
    ("profile", "profile"),
];

fn app_user_row(app_id: &str, item: &JsonValue) -> TableRow {
    let mut row = copy_fields(item, COLUMNS);
    row.insert("app_id".to_string(), json!(app_id));
    row
}

/// List assigned users across applications.
///
/// An `app_id` qualifier pins the parent to one direct lookup; otherwise
/// every application is enumerated and its assignments listed. Budget
/// exhaustion during any parent's listing ends the whole join.
pub async fn list_app_assigned_users(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V1).await.map_err(|e| {
        error!(error = %e, "okta_app_assigned_user list: connect failed");
        e
    })?;

    let parents = resolve_parents(
        &ApplicationParents {
            client: Arc::clone(&client),
            ctx,
        },
        quals.equal("app_id"),
    )
    .await?;

    let limit = effective_page_size(PAGE_CAP, quals.limit());
    for parent in parents {
        let Some(app_id) = parent_key(&parent, "id") else {
            continue;
        };

        let params = vec![("limit".to_string(), limit.to_string())];
        drive_list(
            &client,
            ctx,
            sink,
            &format!("/api/v1/apps/{app_id}/users"),
            params,
            &mut |item| Some(app_user_row(&app_id, &item)),
        )
        .await?;

        if ctx.should_stop() {
            break;
        }
    }
    Ok(())
}

/// Look up one application assignment. Missing app or assignment produces
/// no row.
pub async fn get_app_assigned_user(
    sessions: &SessionRegistry,
    app_id: &str,
    user_id: &str,
) -> Result<Option<TableRow>> {
    if app_id.is_empty() || user_id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V1).await?;
    match client
        .get_json(&format!("/api/v1/apps/{app_id}/users/{user_id}"))
        .await
    {
        Ok(item) => Ok(Some(app_user_row(app_id, &item))),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => {
            error!(error = %e, app_id, user_id, "okta_app_assigned_user get failed");
            Err(e)
        }
    }
}
