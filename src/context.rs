//! Execution context: row budget, cancellation, and the row sink
//!
//! The host owns one `QueryContext` per table operation. The pagination
//! driver checks the remaining row budget after every emitted row and treats
//! cancellation and budget exhaustion identically: stop cleanly, no error.

use crate::types::TableRow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Destination for rows produced by a list or get operation.
pub trait RowSink: Send {
    /// Emit one row to the host.
    fn emit(&mut self, row: TableRow);
}

/// A `RowSink` that collects rows into a vector. Used in tests and by
/// internal parent-set materialization.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Rows collected so far
    pub rows: Vec<TableRow>,
}

impl RowSink for VecSink {
    fn emit(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

/// Per-operation execution context supplied by the host.
///
/// Not shared across table operations; the budget belongs to exactly one
/// list operation's pagination loop.
#[derive(Debug)]
pub struct QueryContext {
    cancelled: AtomicBool,
    remaining: Option<AtomicU64>,
}

impl QueryContext {
    /// Context with no row limit.
    pub fn unlimited() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            remaining: None,
        }
    }

    /// Context that stops after `limit` rows.
    pub fn with_row_limit(limit: u64) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            remaining: Some(AtomicU64::new(limit)),
        }
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once the host has cancelled the operation.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Rows the host still wants, or `None` for unlimited.
    pub fn rows_remaining(&self) -> Option<u64> {
        self.remaining.as_ref().map(|r| r.load(Ordering::Relaxed))
    }

    /// Account for one emitted row.
    pub fn consume_row(&self) {
        if let Some(remaining) = &self.remaining {
            // Saturating: the driver stops at zero, but a double-decrement
            // must not wrap.
            let _ = remaining.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_sub(1))
            });
        }
    }

    /// True when the operation should stop emitting: budget exhausted or
    /// cancelled. A normal termination condition, never an error.
    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.rows_remaining() == Some(0)
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unlimited_context_never_stops() {
        let ctx = QueryContext::unlimited();
        assert_eq!(ctx.rows_remaining(), None);
        for _ in 0..100 {
            ctx.consume_row();
        }
        assert!(!ctx.should_stop());
    }

    #[test]
    fn test_budget_reaches_zero() {
        let ctx = QueryContext::with_row_limit(2);
        assert_eq!(ctx.rows_remaining(), Some(2));
        ctx.consume_row();
        assert!(!ctx.should_stop());
        ctx.consume_row();
        assert_eq!(ctx.rows_remaining(), Some(0));
        assert!(ctx.should_stop());
    }

    #[test]
    fn test_budget_does_not_wrap() {
        let ctx = QueryContext::with_row_limit(1);
        ctx.consume_row();
        ctx.consume_row();
        assert_eq!(ctx.rows_remaining(), Some(0));
    }

    #[test]
    fn test_cancel_stops_like_exhaustion() {
        let ctx = QueryContext::with_row_limit(100);
        assert!(!ctx.should_stop());
        ctx.cancel();
        assert!(ctx.should_stop());
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink = VecSink::default();
        let mut row = crate::types::TableRow::new();
        row.insert("id".to_string(), json!("u1"));
        sink.emit(row);
        assert_eq!(sink.rows.len(), 1);
        assert_eq!(sink.rows[0]["id"], json!("u1"));
    }
}
