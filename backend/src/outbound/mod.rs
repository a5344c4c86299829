//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process document store for listings, profiles, reviews
//!   and suggestions, optionally loaded from a JSON snapshot
//! - **fixtures**: the read-only demo catalogue behind `DataSource::Fixture`
//! - **identity**: local email/password identity provider
//! - **genai**: recommendation engines, hosted over HTTP or scored locally
//!
//! Adapters translate between storage shapes and domain types and hold no
//! business rules.

pub mod fixtures;
pub mod genai;
pub mod identity;
pub mod memory;
