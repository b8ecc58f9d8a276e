//! Pagination primitives and the list-drive loop
//!
//! The vendor paginates with RFC 5988 `Link` headers; `PageCursor` wraps the
//! `rel="next"` URL. `drive_list` is the loop every table List operation
//! runs: fetch, normalize, emit, check the row budget after every emitted
//! row, follow the continuation until pages run out or the host has had
//! enough. Budget exhaustion and cancellation are normal terminations.

use crate::context::{QueryContext, RowSink};
use crate::error::Result;
use crate::session::OktaClient;
use crate::types::{JsonValue, TableRow};
use reqwest::header::HeaderMap;
use tracing::debug;

// ============================================================================
// Page cursor
// ============================================================================

/// Continuation state for a list call, owned by the vendor client
#[derive(Debug, Clone, Default)]
pub struct PageCursor {
    next: Option<String>,
}

impl PageCursor {
    /// A cursor with no continuation
    pub fn none() -> Self {
        Self::default()
    }

    /// Extract the continuation from a response's `Link` header
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let next = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(|header| parse_link_header(header, "next"));
        Self { next }
    }

    /// True when another page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// The absolute URL of the next page, if any
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Parse a Link header and extract the URL for the given rel.
/// Format: `<url>; rel="next", <url>; rel="self"`
fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}

/// One page of a list response
#[derive(Debug)]
pub struct Page {
    /// Raw items from the response body
    pub items: Vec<JsonValue>,
    /// Continuation for the following page
    pub cursor: PageCursor,
}

// ============================================================================
// Drivers
// ============================================================================

/// Drive a list endpoint to completion, emitting normalized rows.
///
/// `normalize` reduces a raw response item to a row; returning `None` skips
/// the item (the empty-variant case), which is not an error. Page fetch
/// failures propagate; rows already emitted stand.
pub async fn drive_list(
    client: &OktaClient,
    ctx: &QueryContext,
    sink: &mut dyn RowSink,
    path: &str,
    params: Vec<(String, String)>,
    normalize: &mut dyn FnMut(JsonValue) -> Option<TableRow>,
) -> Result<()> {
    if ctx.should_stop() {
        return Ok(());
    }

    let mut page = client.list(path, &params).await?;
    loop {
        for item in std::mem::take(&mut page.items) {
            if let Some(row) = normalize(item) {
                sink.emit(row);
                ctx.consume_row();
                if ctx.should_stop() {
                    debug!(path, "stopping list early: budget exhausted or cancelled");
                    return Ok(());
                }
            }
        }

        if !page.cursor.has_next() || ctx.is_cancelled() {
            return Ok(());
        }
        page = client.next_page(&page.cursor).await?;
    }
}

/// Drain a list endpoint into a vector without touching the row budget.
///
/// Used to materialize parent sets for parent/child joins; observes
/// cancellation only.
pub async fn collect_list(
    client: &OktaClient,
    ctx: &QueryContext,
    path: &str,
    params: Vec<(String, String)>,
) -> Result<Vec<JsonValue>> {
    let mut out = Vec::new();
    let mut page = client.list(path, &params).await?;
    loop {
        out.append(&mut page.items);
        if !page.cursor.has_next() || ctx.is_cancelled() {
            return Ok(out);
        }
        page = client.next_page(&page.cursor).await?;
    }
}
