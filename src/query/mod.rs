//! Qualifier translation into vendor filter expressions
//!
//! Tables declare which columns push down as server-side filters via a
//! `FieldMap` (column name → vendor field name). Equality quals become
//! `field eq "value"` clauses, timestamp range quals use the vendor's
//! comparison operators, and everything joins with `" and "`. A raw
//! `filter` qual is an escape hatch that overrides all derived clauses.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Timestamp layout the vendor accepts in filter expressions
pub const FILTER_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// ============================================================================
// Operators
// ============================================================================

/// Comparison operator on a range qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
    Ne,
}

impl CompareOp {
    /// Map a SQL comparison symbol to an operator
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            "<>" => Some(Self::Ne),
            _ => None,
        }
    }

    /// The vendor's spelling of this operator
    pub fn vendor_op(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Ne => "ne",
        }
    }
}

// ============================================================================
// Qualifiers
// ============================================================================

/// A range qualifier on a timestamp-valued column
#[derive(Debug, Clone)]
pub struct RangeQual {
    /// Column the qual constrains
    pub column: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Timestamp bound
    pub value: DateTime<Utc>,
}

/// The caller's declared predicates for one table operation
#[derive(Debug, Clone, Default)]
pub struct QualSet {
    equals: HashMap<String, String>,
    ranges: Vec<RangeQual>,
    raw_filter: Option<String>,
    limit: Option<u64>,
}

impl QualSet {
    /// An empty qual set (list everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality qualifier
    #[must_use]
    pub fn with_equal(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.equals.insert(column.into(), value.into());
        self
    }

    /// Add a timestamp range qualifier
    #[must_use]
    pub fn with_range(
        mut self,
        column: impl Into<String>,
        op: CompareOp,
        value: DateTime<Utc>,
    ) -> Self {
        self.ranges.push(RangeQual {
            column: column.into(),
            op,
            value,
        });
        self
    }

    /// Set the raw filter passthrough. Overrides every derived clause.
    #[must_use]
    pub fn with_raw_filter(mut self, filter: impl Into<String>) -> Self {
        self.raw_filter = Some(filter.into());
        self
    }

    /// Set the caller's row-limit hint
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Equality value for a column, if declared
    pub fn equal(&self, column: &str) -> Option<&str> {
        self.equals.get(column).map(String::as_str)
    }

    /// The raw filter passthrough, if declared and non-empty
    pub fn raw_filter(&self) -> Option<&str> {
        self.raw_filter.as_deref().filter(|s| !s.is_empty())
    }

    /// The caller's row-limit hint
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Declared range qualifiers
    pub fn ranges(&self) -> &[RangeQual] {
        &self.ranges
    }
}

// ============================================================================
// Field maps and filter building
// ============================================================================

/// Ordered column → vendor-field mapping for one table.
///
/// Order fixes the clause order in built filters, keeping output
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap(pub &'static [(&'static str, &'static str)]);

impl FieldMap {
    /// Vendor field for a column, if the column pushes down
    pub fn vendor_field(&self, column: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(col, _)| *col == column)
            .map(|(_, field)| *field)
    }
}

/// Build the vendor filter expression for a qual set.
///
/// A non-empty raw override is returned unmodified and every derived clause
/// is ignored; there is no merging. An empty result means the endpoint
/// lists everything it returns by default.
pub fn build_filter(quals: &QualSet, fields: &FieldMap) -> String {
    if let Some(raw) = quals.raw_filter() {
        return raw.to_string();
    }

    let mut clauses = Vec::new();
    for (column, vendor_field) in fields.0 {
        if let Some(value) = quals.equal(column) {
            clauses.push(format!("{vendor_field} eq \"{value}\""));
        }
    }

    for range in quals.ranges() {
        if let Some(vendor_field) = fields.vendor_field(&range.column) {
            let stamp = range.value.format(FILTER_TIME_FORMAT);
            clauses.push(format!(
                "{vendor_field} {} \"{stamp}\"",
                range.op.vendor_op()
            ));
        }
    }

    clauses.join(" and ")
}

/// Clamp an endpoint's page size to the caller's row-limit hint.
pub fn effective_page_size(endpoint_cap: u64, limit_hint: Option<u64>) -> u64 {
    match limit_hint {
        Some(limit) if limit < endpoint_cap => limit,
        _ => endpoint_cap,
    }
}

#[cfg(test)]
mod tests;
