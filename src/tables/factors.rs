//! Enrolled factors per user (child of the user table, tagged responses)

use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::join::{parent_key, resolve_parents, ParentSource};
use crate::normalize::normalize_factor;
use crate::page::{collect_list, drive_list};
use crate::query::QualSet;
use crate::session::{OktaClient, SessionRegistry};
use crate::types::{ApiVersion, JsonValue, TableRow};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Page cap of the user enumeration backing the parent side
const USER_PAGE_CAP: u64 = 200;

/// Users as parents of the factor table
struct UserParents<'a> {
    client: Arc<OktaClient>,
    ctx: &'a QueryContext,
}

#[async_trait]
impl ParentSource for UserParents<'_> {
    async fn get_by_id(&self, id: &str) -> Result<Option<JsonValue>> {
        match self.client.get_json(&format!("/api/v1/users/{id}")).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_all(&self) -> Result<Vec<JsonValue>> {
        let params = vec![("limit".to_string(), USER_PAGE_CAP.to_string())];
        collect_list(&self.client, self.ctx, "/api/v1/users", params).await
    }
}

fn tag_user(row: &mut TableRow, user_id: &str, user_name: Option<&str>) {
    row.insert("user_id".to_string(), json!(user_id));
    row.insert("user_name".to_string(), json!(user_name));
}

/// List enrolled factors across users.
///
/// A `user_id` qualifier pins the parent to one direct lookup. Items whose
/// concrete variant is unknown are skipped, not errors.
pub async fn list_factors(
    sessions: &SessionRegistry,
    ctx: &QueryContext,
    quals: &QualSet,
    sink: &mut dyn RowSink,
) -> Result<()> {
    let client = sessions.get_client(ApiVersion::V4).await.map_err(|e| {
        error!(error = %e, "okta_factor list: connect failed");
        e
    })?;

    let parents = resolve_parents(
        &UserParents {
            client: Arc::clone(&client),
            ctx,
        },
        quals.equal("user_id"),
    )
    .await?;

    for parent in parents {
        let Some(user_id) = parent_key(&parent, "id") else {
            continue;
        };
        let user_name = super::lookup_path(&parent, "profile.login")
            .and_then(JsonValue::as_str)
            .map(String::from);

        drive_list(
            &client,
            ctx,
            sink,
            &format!("/api/v1/users/{user_id}/factors"),
            vec![],
            &mut |item| {
                let mut row = normalize_factor(&item)?;
                tag_user(&mut row, &user_id, user_name.as_deref());
                Some(row)
            },
        )
        .await?;

        if ctx.should_stop() {
            break;
        }
    }
    Ok(())
}

/// Look up one factor enrollment. The owning user is resolved first; a
/// missing user, missing factor, or unknown variant produces no row.
pub async fn get_factor(
    sessions: &SessionRegistry,
    user_id: &str,
    factor_id: &str,
) -> Result<Option<TableRow>> {
    if user_id.is_empty() || factor_id.is_empty() {
        return Ok(None);
    }

    let client = sessions.get_client(ApiVersion::V4).await?;

    let user = match client.get_json(&format!("/api/v1/users/{user_id}")).await {
        Ok(item) => item,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => {
            error!(error = %e, user_id, "okta_factor get: user lookup failed");
            return Err(e);
        }
    };
    let user_name = super::lookup_path(&user, "profile.login")
        .and_then(JsonValue::as_str)
        .map(String::from);

    let item = match client
        .get_json(&format!("/api/v1/users/{user_id}/factors/{factor_id}"))
        .await
    {
        Ok(item) => item,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => {
            error!(error = %e, user_id, factor_id, "okta_factor get failed");
            return Err(e);
        }
    };

    Ok(normalize_factor(&item).map(|mut row| {
        tag_user(&mut row, user_id, user_name.as_deref());
        row
    }))
}
