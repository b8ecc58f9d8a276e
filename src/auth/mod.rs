//! Authentication module
//!
//! Selects an auth mode from the resolved credential shape (API token,
//! private-key service app, or ambient discovery) and applies it to
//! outgoing requests. The private-key mode signs a JWT assertion and
//! exchanges it for a scoped access token, cached until expiry.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{scopes_for, AuthMode, CachedToken};

#[cfg(test)]
mod tests;
