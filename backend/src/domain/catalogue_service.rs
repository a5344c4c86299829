//! Listing browse and publish use-cases.
//!
//! Reads go through a [`ListingStores`] pair chosen by [`DataSource`]:
//! `Live` reads the document store, `Fixture` reads the bundled demo
//! catalogue. Writes always target the live stores.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::forms::{NewMess, NewProperty};
use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, FeaturedListings, MessDetail, MessRepository, MessResults,
    MessSearchRequest, ProfileRepository, PropertyDetail, PropertyRepository, PropertyResults,
    PropertySearchRequest, ReviewRepository,
};
use crate::domain::{
    DataSource, Error, ListingId, MessFilters, MessListing, MessSortKey, OwnerProfile, Property,
    PropertyFilters, PropertySortKey, Review, ReviewTarget, StarDisplay, UserId, port_errors,
    review, search,
};

/// Number of listings shown on the home page per kind.
pub const FEATURED_LIMIT: usize = 3;

/// Property and mess stores backing one data source.
#[derive(Clone)]
pub struct ListingStores {
    pub properties: Arc<dyn PropertyRepository>,
    pub messes: Arc<dyn MessRepository>,
}

/// Catalogue service implementing [`CatalogueQuery`] and [`CatalogueCommand`].
#[derive(Clone)]
pub struct CatalogueService {
    live: ListingStores,
    fixture: ListingStores,
    reviews: Arc<dyn ReviewRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl CatalogueService {
    /// Service reading from `live` or `fixture` per request.
    pub fn new(
        live: ListingStores,
        fixture: ListingStores,
        reviews: Arc<dyn ReviewRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            live,
            fixture,
            reviews,
            profiles,
        }
    }

    fn stores(&self, source: DataSource) -> &ListingStores {
        match source {
            DataSource::Live => &self.live,
            DataSource::Fixture => &self.fixture,
        }
    }

    async fn reviews_for(&self, target: ReviewTarget) -> Result<Vec<Review>, Error> {
        let mut reviews = self
            .reviews
            .list_for(&target)
            .await
            .map_err(port_errors::review)?;
        review::newest_first(&mut reviews);
        Ok(reviews)
    }

    async fn require_owner(&self, user_id: &UserId) -> Result<OwnerProfile, Error> {
        self.profiles
            .find_owner(user_id)
            .await
            .map_err(port_errors::profile)?
            .ok_or_else(|| Error::forbidden("only property owners can publish listings"))
    }

    fn current_properties(&self, source: DataSource) -> Result<Arc<Vec<Property>>, Error> {
        let snapshot = self.stores(source).properties.subscribe().borrow().clone();
        snapshot.into_result("properties")
    }

    fn current_messes(&self, source: DataSource) -> Result<Arc<Vec<MessListing>>, Error> {
        let snapshot = self.stores(source).messes.subscribe().borrow().clone();
        snapshot.into_result("mess listings")
    }
}

#[async_trait]
impl CatalogueQuery for CatalogueService {
    async fn search_properties(
        &self,
        request: &PropertySearchRequest,
    ) -> Result<PropertyResults, Error> {
        let properties = self.current_properties(request.source)?;
        let matches = search::search_properties(
            &properties,
            &request.query,
            &request.filters,
            request.sort,
        );
        debug!(
            source = ?request.source,
            total = properties.len(),
            matched = matches.len(),
            "property search"
        );
        Ok(matches.into())
    }

    async fn search_messes(&self, request: &MessSearchRequest) -> Result<MessResults, Error> {
        let messes = self.current_messes(request.source)?;
        let matches = search::search_messes(&messes, &request.query, &request.filters, request.sort);
        debug!(
            source = ?request.source,
            total = messes.len(),
            matched = matches.len(),
            "mess search"
        );
        Ok(matches.into())
    }

    async fn property(&self, id: &ListingId, source: DataSource) -> Result<PropertyDetail, Error> {
        let property = self
            .stores(source)
            .properties
            .find(id)
            .await
            .map_err(port_errors::listing)?
            .ok_or_else(|| Error::not_found(format!("property {id} not found")))?;
        let reviews = self.reviews_for(ReviewTarget::Property(id.clone())).await?;
        let stars = StarDisplay::for_rating(property.average_rating.unwrap_or(0.0));
        Ok(PropertyDetail {
            property,
            stars,
            reviews,
        })
    }

    async fn mess(&self, id: &ListingId, source: DataSource) -> Result<MessDetail, Error> {
        let mess = self
            .stores(source)
            .messes
            .find(id)
            .await
            .map_err(port_errors::listing)?
            .ok_or_else(|| Error::not_found(format!("mess {id} not found")))?;
        let reviews = self.reviews_for(ReviewTarget::Mess(id.clone())).await?;
        let stars = StarDisplay::for_rating(mess.average_rating);
        Ok(MessDetail {
            mess,
            stars,
            reviews,
        })
    }

    async fn featured(&self, source: DataSource) -> Result<FeaturedListings, Error> {
        let properties = self.current_properties(source)?;
        let messes = self.current_messes(source)?;
        let mut properties = search::search_properties(
            &properties,
            "",
            &PropertyFilters::unrestricted(),
            PropertySortKey::Popularity,
        );
        let mut messes =
            search::search_messes(&messes, "", &MessFilters::unrestricted(), MessSortKey::Popularity);
        properties.truncate(FEATURED_LIMIT);
        messes.truncate(FEATURED_LIMIT);
        Ok(FeaturedListings { properties, messes })
    }
}

#[async_trait]
impl CatalogueCommand for CatalogueService {
    async fn create_property(
        &self,
        owner: &UserId,
        property: NewProperty,
    ) -> Result<Property, Error> {
        self.require_owner(owner).await?;
        let created = Property {
            id: ListingId::generate(),
            name: property.name,
            college_name: property.college_name,
            address: property.address,
            rent: property.rent,
            room_type: property.room_type,
            facilities: property.facilities,
            image_ids: property.image_urls,
            distance_from_college: property.distance_from_college,
            total_capacity: property.total_capacity,
            current_availability: property.current_availability,
            owner_contact_number: property.contact_number.into(),
            property_owner_id: owner.clone(),
            average_rating: Some(0.0),
            review_count: Some(0),
            description: property.description,
            mess_details: property.mess_details,
        };
        self.live
            .properties
            .insert(created.clone())
            .await
            .map_err(port_errors::listing)?;
        info!(property_id = %created.id, owner_id = %owner, "property listed");
        Ok(created)
    }

    async fn create_mess(&self, owner: &UserId, mess: NewMess) -> Result<MessListing, Error> {
        self.require_owner(owner).await?;
        let created = MessListing {
            id: ListingId::generate(),
            name: mess.name,
            description: mess.description,
            distance_from_college: mess.distance_from_college,
            food_type: mess.food_type,
            pricing: mess.pricing,
            image_ids: mess.image_urls,
            average_rating: 0.0,
            review_count: 0,
            daily_menu: mess.daily_menu,
            address: mess.address,
            contact_number: Some(mess.contact_number.into()),
            owner_id: owner.clone(),
        };
        self.live
            .messes
            .insert(created.clone())
            .await
            .map_err(port_errors::listing)?;
        info!(mess_id = %created.id, owner_id = %owner, "mess listed");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
