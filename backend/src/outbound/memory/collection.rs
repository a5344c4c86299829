//! One document collection held in a watch channel.
//!
//! The channel value is the collection itself, so subscribers always observe
//! the latest committed snapshot and writers never block readers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Error, Resource};

pub(super) struct LiveCollection<T> {
    sender: watch::Sender<Resource<Arc<Vec<T>>>>,
}

/// Why a collection could not be read or written.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum CollectionUnavailable {
    Loading,
    Failed(Error),
}

impl std::fmt::Display for CollectionUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => f.write_str("collection is still loading"),
            Self::Failed(error) => write!(f, "collection failed to load: {}", error.message()),
        }
    }
}

impl<T: Clone> LiveCollection<T> {
    pub(super) fn ready(items: Vec<T>) -> Self {
        let (sender, _receiver) = watch::channel(Resource::Ready(Arc::new(items)));
        Self { sender }
    }

    pub(super) fn loading() -> Self {
        let (sender, _receiver) = watch::channel(Resource::Loading);
        Self { sender }
    }

    pub(super) fn subscribe(&self) -> watch::Receiver<Resource<Arc<Vec<T>>>> {
        self.sender.subscribe()
    }

    /// Replace the whole collection state and notify subscribers.
    pub(super) fn publish(&self, state: Resource<Vec<T>>) {
        self.sender.send_replace(state.map(Arc::new));
    }

    pub(super) fn snapshot(&self) -> Result<Arc<Vec<T>>, CollectionUnavailable> {
        match &*self.sender.borrow() {
            Resource::Ready(items) => Ok(Arc::clone(items)),
            Resource::Loading => Err(CollectionUnavailable::Loading),
            Resource::Failed(error) => Err(CollectionUnavailable::Failed(error.clone())),
        }
    }

    pub(super) fn find(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Option<T>, CollectionUnavailable> {
        Ok(self.snapshot()?.iter().find(|item| predicate(item)).cloned())
    }

    pub(super) fn filter(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Vec<T>, CollectionUnavailable> {
        Ok(self
            .snapshot()?
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect())
    }

    /// Apply `change` to a ready collection.
    ///
    /// Subscribers are notified only when `change` returns `Ok`. Snapshots
    /// already handed out are unaffected.
    pub(super) fn update<R, E>(
        &self,
        change: impl FnOnce(&mut Vec<T>) -> Result<R, E>,
    ) -> Result<Result<R, E>, CollectionUnavailable> {
        let mut outcome = None;
        let mut unavailable = None;
        self.sender.send_if_modified(|state| match state {
            Resource::Ready(items) => {
                let mut next = items.as_ref().clone();
                let result = change(&mut next);
                let modified = result.is_ok();
                if modified {
                    *items = Arc::new(next);
                }
                outcome = Some(result);
                modified
            }
            Resource::Loading => {
                unavailable = Some(CollectionUnavailable::Loading);
                false
            }
            Resource::Failed(error) => {
                unavailable = Some(CollectionUnavailable::Failed(error.clone()));
                false
            }
        });
        match (outcome, unavailable) {
            (Some(result), _) => Ok(result),
            (None, Some(reason)) => Err(reason),
            (None, None) => Err(CollectionUnavailable::Loading),
        }
    }
}
