//! Normalization of polymorphic vendor responses
//!
//! Some list endpoints return tagged items whose concrete shape depends on
//! a discriminant field. Each family here models that as a serde-tagged sum
//! type, where the tag list is the mapping from discriminant to concrete
//! shape, and reduces the matched variant to a flat row. An unknown or missing
//! discriminant normalizes to `None` and the caller skips the item; that is
//! a normal "no data" case, not an error.
//!
//! Free-form `profile`/`settings` bags are never typed field-by-field; they
//! pass through as one opaque JSON value.

mod authenticator;
mod factor;
mod zone;

pub use authenticator::{normalize_authenticator, AuthenticatorItem};
pub use factor::{normalize_factor, Factor, FactorEnvelope};
pub use zone::{normalize_zone, NetworkZone};

#[cfg(test)]
mod tests;
