//! Bundled demo catalogue served when a request selects the fixture source.

use super::memory::{MemoryDocumentStore, StoreSnapshot};

const DEMO_CATALOGUE: &str = include_str!("../../fixtures/demo-catalogue.json");

/// Decode the bundled demo catalogue.
pub fn demo_snapshot() -> Result<StoreSnapshot, serde_json::Error> {
    serde_json::from_str(DEMO_CATALOGUE)
}

/// Read-only store holding the demo catalogue.
///
/// # Examples
/// ```
/// use campus_connect::outbound::fixtures::demo_store;
///
/// let store = demo_store().expect("bundled catalogue decodes");
/// # let _ = store;
/// ```
pub fn demo_store() -> Result<MemoryDocumentStore, serde_json::Error> {
    demo_snapshot().map(MemoryDocumentStore::read_only)
}
