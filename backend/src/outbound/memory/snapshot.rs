//! JSON snapshot of the document store.
//!
//! A snapshot file mirrors the hosted collections by name so exports from
//! the hosted store can be loaded as-is. Missing collections default to
//! empty.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::MemoryDocumentStore;
use crate::domain::{
    Error, MessListing, OwnerProfile, Property, Review, StudentProfile, Suggestion,
};

/// Every collection of the document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub properties: Vec<Property>,
    pub mess_listings: Vec<MessListing>,
    pub reviews: Vec<Review>,
    pub students: Vec<StudentProfile>,
    pub property_owners: Vec<OwnerProfile>,
    pub suggestions: Vec<Suggestion>,
}

/// Errors raised while loading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot at {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode the snapshot at `path`.
pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot, SnapshotError> {
    let read_error = |source: std::io::Error| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "snapshot path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    serde_json::from_slice(&payload).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` off the async runtime and publish the result into `store`.
///
/// The store stays loading until the read completes; a failed read marks
/// every collection failed so callers see a transient error instead of an
/// empty catalogue.
pub fn spawn_snapshot_load(store: Arc<MemoryDocumentStore>, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        let source_path = path.display().to_string();
        let loaded = tokio::task::spawn_blocking(move || load_snapshot(&path)).await;
        match loaded {
            Ok(Ok(snapshot)) => {
                info!(path = %source_path, "document store snapshot loaded");
                store.publish(snapshot);
            }
            Ok(Err(error)) => {
                warn!(error = %error, "document store snapshot failed to load");
                store.fail(&Error::service_unavailable("listing data failed to load"));
            }
            Err(join_error) => {
                warn!(error = %join_error, "document store snapshot task aborted");
                store.fail(&Error::service_unavailable("listing data failed to load"));
            }
        }
    })
}
