//! In-memory document store adapter.
//!
//! Backs every repository port with watch-channel collections. The live
//! store is writable and optionally seeded from a JSON snapshot; the demo
//! catalogue is a read-only instance of the same store.

mod collection;
mod snapshot;
mod store;

pub use snapshot::{SnapshotError, StoreSnapshot, load_snapshot, spawn_snapshot_load};
pub use store::{MemoryDocumentStore, SharedStore};
