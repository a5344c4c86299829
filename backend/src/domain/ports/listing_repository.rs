//! Driven ports for the `properties` and `messListings` collections.
//!
//! Each repository offers the two data-access flavours the views need: a
//! single-document lookup and a live subscription to the whole collection.
//! Subscriptions start in [`Resource::Loading`] until the store has
//! delivered its first snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::{ListingId, MessListing, Property, RatingAggregate, Rating, Resource, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing store adapters.
    pub enum ListingRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "listing store connection failed: {message}",
        /// A read or write failed once connected.
        Query { message: String } => "listing store query failed: {message}",
        /// A document with this id already exists.
        Duplicate { id: String } => "listing {id} already exists",
        /// The source does not accept writes.
        ReadOnly => "listing source is read-only",
    }
}

/// Live view of a listing collection.
pub type ListingFeed<T> = watch::Receiver<Resource<Arc<Vec<T>>>>;

/// Property collection access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Fetch one property; `None` when the id is unknown.
    async fn find(&self, id: &ListingId) -> Result<Option<Property>, ListingRepositoryError>;

    /// Subscribe to the whole collection in stored order.
    fn subscribe(&self) -> ListingFeed<Property>;

    /// Properties listed by `owner`, in stored order.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Property>, ListingRepositoryError>;

    async fn insert(&self, property: Property) -> Result<(), ListingRepositoryError>;

    /// Fold `rating` into the stored aggregate. `None` when the id is unknown.
    async fn record_rating(
        &self,
        id: &ListingId,
        rating: Rating,
    ) -> Result<Option<RatingAggregate>, ListingRepositoryError>;
}

/// Mess collection access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessRepository: Send + Sync {
    async fn find(&self, id: &ListingId) -> Result<Option<MessListing>, ListingRepositoryError>;

    fn subscribe(&self) -> ListingFeed<MessListing>;

    async fn insert(&self, mess: MessListing) -> Result<(), ListingRepositoryError>;

    async fn record_rating(
        &self,
        id: &ListingId,
        rating: Rating,
    ) -> Result<Option<RatingAggregate>, ListingRepositoryError>;
}

/// Feed that is already ready with `items`; used by static sources and tests.
pub fn ready_feed<T>(items: Vec<T>) -> ListingFeed<T> {
    let (_sender, receiver) = watch::channel(Resource::Ready(Arc::new(items)));
    receiver
}
