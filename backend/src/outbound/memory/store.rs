//! In-process document store implementing the repository ports.
//!
//! Collections mirror the hosted store's layout: `properties`,
//! `messListings`, `reviews`, `students`, `propertyOwners` and per-owner
//! `suggestions`. A store built with [`MemoryDocumentStore::read_only`]
//! rejects every write.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::collection::{CollectionUnavailable, LiveCollection};
use super::snapshot::StoreSnapshot;
use crate::domain::ports::{
    ListingFeed, ListingRepositoryError, MessRepository, ProfileRepository,
    ProfileRepositoryError, PropertyRepository, ReviewRepository, ReviewRepositoryError,
    SuggestionRepository, SuggestionRepositoryError,
};
use crate::domain::{
    Error, ListingId, MessListing, OwnerProfile, Property, Rating, RatingAggregate, Resource,
    Review, ReviewTarget, StudentProfile, Suggestion, UserId, UserProfile, suggestion,
};

/// Document store kept in memory.
pub struct MemoryDocumentStore {
    properties: LiveCollection<Property>,
    messes: LiveCollection<MessListing>,
    reviews: LiveCollection<Review>,
    students: LiveCollection<StudentProfile>,
    owners: LiveCollection<OwnerProfile>,
    suggestions: LiveCollection<Suggestion>,
    writable: bool,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::from_snapshot(StoreSnapshot::default())
    }
}

impl MemoryDocumentStore {
    /// Writable store seeded from `snapshot`.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            properties: LiveCollection::ready(snapshot.properties),
            messes: LiveCollection::ready(snapshot.mess_listings),
            reviews: LiveCollection::ready(snapshot.reviews),
            students: LiveCollection::ready(snapshot.students),
            owners: LiveCollection::ready(snapshot.property_owners),
            suggestions: LiveCollection::ready(snapshot.suggestions),
            writable: true,
        }
    }

    /// Store that rejects writes, used for the demo catalogue.
    pub fn read_only(snapshot: StoreSnapshot) -> Self {
        Self {
            writable: false,
            ..Self::from_snapshot(snapshot)
        }
    }

    /// Writable store whose collections stay loading until
    /// [`MemoryDocumentStore::publish`] or [`MemoryDocumentStore::fail`].
    pub fn loading() -> Self {
        Self {
            properties: LiveCollection::loading(),
            messes: LiveCollection::loading(),
            reviews: LiveCollection::loading(),
            students: LiveCollection::loading(),
            owners: LiveCollection::loading(),
            suggestions: LiveCollection::loading(),
            writable: true,
        }
    }

    /// Replace every collection with the snapshot and wake subscribers.
    pub fn publish(&self, snapshot: StoreSnapshot) {
        debug!(
            properties = snapshot.properties.len(),
            messes = snapshot.mess_listings.len(),
            reviews = snapshot.reviews.len(),
            "publishing store snapshot"
        );
        self.properties.publish(Resource::Ready(snapshot.properties));
        self.messes.publish(Resource::Ready(snapshot.mess_listings));
        self.reviews.publish(Resource::Ready(snapshot.reviews));
        self.students.publish(Resource::Ready(snapshot.students));
        self.owners.publish(Resource::Ready(snapshot.property_owners));
        self.suggestions.publish(Resource::Ready(snapshot.suggestions));
    }

    /// Mark every collection as failed.
    pub fn fail(&self, error: &Error) {
        self.properties.publish(Resource::Failed(error.clone()));
        self.messes.publish(Resource::Failed(error.clone()));
        self.reviews.publish(Resource::Failed(error.clone()));
        self.students.publish(Resource::Failed(error.clone()));
        self.owners.publish(Resource::Failed(error.clone()));
        self.suggestions.publish(Resource::Failed(error.clone()));
    }

    fn listing_unavailable(reason: CollectionUnavailable) -> ListingRepositoryError {
        ListingRepositoryError::connection(reason.to_string())
    }

    fn ensure_listing_writes(&self) -> Result<(), ListingRepositoryError> {
        if self.writable {
            Ok(())
        } else {
            Err(ListingRepositoryError::read_only())
        }
    }
}

/// Insert `item` unless a document with the same id already exists.
fn insert_unique<T>(
    items: &mut Vec<T>,
    item: T,
    id_of: impl Fn(&T) -> &ListingId,
) -> Result<(), ListingRepositoryError> {
    let id = id_of(&item);
    if items.iter().any(|existing| id_of(existing) == id) {
        return Err(ListingRepositoryError::duplicate(id.to_string()));
    }
    items.push(item);
    Ok(())
}

#[async_trait]
impl PropertyRepository for MemoryDocumentStore {
    async fn find(&self, id: &ListingId) -> Result<Option<Property>, ListingRepositoryError> {
        self.properties
            .find(|p| &p.id == id)
            .map_err(Self::listing_unavailable)
    }

    fn subscribe(&self) -> ListingFeed<Property> {
        self.properties.subscribe()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Property>, ListingRepositoryError> {
        self.properties
            .filter(|p| &p.property_owner_id == owner)
            .map_err(Self::listing_unavailable)
    }

    async fn insert(&self, property: Property) -> Result<(), ListingRepositoryError> {
        self.ensure_listing_writes()?;
        self.properties
            .update(|items| insert_unique(items, property, |p| &p.id))
            .map_err(Self::listing_unavailable)?
    }

    async fn record_rating(
        &self,
        id: &ListingId,
        rating: Rating,
    ) -> Result<Option<RatingAggregate>, ListingRepositoryError> {
        self.ensure_listing_writes()?;
        self.properties
            .update(|items| {
                let Some(property) = items.iter_mut().find(|p| &p.id == id) else {
                    return Err(());
                };
                let next = RatingAggregate::new(property.average_rating, property.review_count)
                    .fold(rating.get());
                property.average_rating = Some(next.average);
                property.review_count = Some(next.count);
                Ok(next)
            })
            .map(Result::ok)
            .map_err(Self::listing_unavailable)
    }
}

#[async_trait]
impl MessRepository for MemoryDocumentStore {
    async fn find(&self, id: &ListingId) -> Result<Option<MessListing>, ListingRepositoryError> {
        self.messes
            .find(|m| &m.id == id)
            .map_err(Self::listing_unavailable)
    }

    fn subscribe(&self) -> ListingFeed<MessListing> {
        self.messes.subscribe()
    }

    async fn insert(&self, mess: MessListing) -> Result<(), ListingRepositoryError> {
        self.ensure_listing_writes()?;
        self.messes
            .update(|items| insert_unique(items, mess, |m| &m.id))
            .map_err(Self::listing_unavailable)?
    }

    async fn record_rating(
        &self,
        id: &ListingId,
        rating: Rating,
    ) -> Result<Option<RatingAggregate>, ListingRepositoryError> {
        self.ensure_listing_writes()?;
        self.messes
            .update(|items| {
                let Some(mess) = items.iter_mut().find(|m| &m.id == id) else {
                    return Err(());
                };
                let next = RatingAggregate::new(Some(mess.average_rating), Some(mess.review_count))
                    .fold(rating.get());
                mess.average_rating = next.average;
                mess.review_count = next.count;
                Ok(next)
            })
            .map(Result::ok)
            .map_err(Self::listing_unavailable)
    }
}

#[async_trait]
impl ReviewRepository for MemoryDocumentStore {
    async fn list_for(&self, target: &ReviewTarget) -> Result<Vec<Review>, ReviewRepositoryError> {
        self.reviews
            .filter(|r| &r.target == target)
            .map_err(|reason| ReviewRepositoryError::connection(reason.to_string()))
    }

    async fn append(&self, review: Review) -> Result<(), ReviewRepositoryError> {
        if !self.writable {
            return Err(ReviewRepositoryError::read_only());
        }
        self.reviews
            .update(|items| {
                items.push(review);
                Ok::<_, ReviewRepositoryError>(())
            })
            .map_err(|reason| ReviewRepositoryError::connection(reason.to_string()))?
    }
}

#[async_trait]
impl ProfileRepository for MemoryDocumentStore {
    async fn find_student(
        &self,
        id: &UserId,
    ) -> Result<Option<StudentProfile>, ProfileRepositoryError> {
        self.students
            .find(|s| &s.id == id)
            .map_err(|reason| ProfileRepositoryError::connection(reason.to_string()))
    }

    async fn find_owner(&self, id: &UserId) -> Result<Option<OwnerProfile>, ProfileRepositoryError> {
        self.owners
            .find(|o| &o.id == id)
            .map_err(|reason| ProfileRepositoryError::connection(reason.to_string()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        let outcome = match profile {
            UserProfile::Student(student) => self.students.update(|items| {
                upsert(items, student.clone(), |s| &s.id);
                Ok::<_, ProfileRepositoryError>(())
            }),
            UserProfile::Owner(owner) => self.owners.update(|items| {
                upsert(items, owner.clone(), |o| &o.id);
                Ok::<_, ProfileRepositoryError>(())
            }),
        };
        outcome.map_err(|reason| ProfileRepositoryError::connection(reason.to_string()))?
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &UserId) {
    match items.iter_mut().find(|existing| id_of(existing) == id_of(&item)) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

#[async_trait]
impl SuggestionRepository for MemoryDocumentStore {
    async fn append(&self, entry: Suggestion) -> Result<(), SuggestionRepositoryError> {
        self.suggestions
            .update(|items| {
                items.push(entry);
                Ok::<_, SuggestionRepositoryError>(())
            })
            .map_err(|reason| SuggestionRepositoryError::connection(reason.to_string()))?
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Suggestion>, SuggestionRepositoryError> {
        let mut entries = self
            .suggestions
            .filter(|s| &s.owner_id == owner)
            .map_err(|reason| SuggestionRepositoryError::connection(reason.to_string()))?;
        suggestion::newest_first(&mut entries);
        Ok(entries)
    }
}

/// Shared handle type used when one store backs several ports.
pub type SharedStore = Arc<MemoryDocumentStore>;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
