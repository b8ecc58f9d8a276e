//! # okta-tables
//!
//! An adapter that exposes an Okta org's REST API as queryable relational
//! tables. The host query engine owns SQL planning and row streaming; this
//! crate owns everything between a table operation and the vendor API:
//! credential resolution, versioned client construction, filter pushdown,
//! pagination under a row budget, response normalization, and error
//! classification.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use okta_tables::{ConnectionConfig, QualSet, QueryContext, SessionRegistry, VecSink};
//!
//! #[tokio::main]
//! async fn main() -> okta_tables::Result<()> {
//!     let sessions = SessionRegistry::from_config(&ConnectionConfig {
//!         domain: Some("https://example.okta.com".into()),
//!         token: Some("00a...".into()),
//!         ..Default::default()
//!     })?;
//!
//!     let ctx = QueryContext::with_row_limit(100);
//!     let quals = QualSet::new().with_equal("status", "ACTIVE");
//!     let mut sink = VecSink::default();
//!     okta_tables::tables::list_users(&sessions, &ctx, &quals, &mut sink).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Table operations                           │
//! │   list(quals, sink)                  get(id) → Option<row>      │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌──────────┬───────────┬────────┴──────┬────────────┬─────────────┐
//! │  Config  │  Session  │    Query      │    Page    │  Normalize  │
//! ├──────────┼───────────┼───────────────┼────────────┼─────────────┤
//! │ Env      │ Version   │ Field maps    │ Link-next  │ Tagged      │
//! │ fallback │ registry  │ eq / ranges   │ Row budget │ variants    │
//! │ Defaults │ SSWS/JWT  │ Raw override  │ Cancel     │ Opaque bags │
//! └──────────┴───────────┴───────────────┴────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and vendor error classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connection configuration and credential resolution
pub mod config;

/// Execution context, row budget, and row sink
pub mod context;

/// Auth mode selection and token management
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Session registry and versioned vendor clients
pub mod session;

/// Qualifier translation into vendor filter expressions
pub mod query;

/// Pagination primitives and the list-drive loop
pub mod page;

/// Normalization of polymorphic vendor responses
pub mod normalize;

/// Parent/child join driver
pub mod join;

/// Per-table listing and lookup operations
pub mod tables;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ConnectionConfig, Credentials};
pub use context::{QueryContext, RowSink, VecSink};
pub use error::{classify, Error, ErrorClass, Result};
pub use query::{build_filter, CompareOp, FieldMap, QualSet};
pub use session::{OktaClient, SessionRegistry};
pub use types::{ApiVersion, JsonValue, TableRow};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
