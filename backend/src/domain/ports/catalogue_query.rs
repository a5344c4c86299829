//! Driving port for browsing listings.
//!
//! Every read names the [`DataSource`] it runs against; the handler picks it
//! once per request and the service routes to the matching stores.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    DataSource, Error, ListingId, MessFilters, MessListing, MessSortKey, Property,
    PropertyFilters, PropertySortKey, Review, StarDisplay,
};

/// Property search parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySearchRequest {
    pub query: String,
    pub filters: PropertyFilters,
    pub sort: PropertySortKey,
    pub source: DataSource,
}

/// Mess search parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessSearchRequest {
    pub query: String,
    pub filters: MessFilters,
    pub sort: MessSortKey,
    pub source: DataSource,
}

/// Ordered property matches. An empty `items` is the empty state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyResults {
    pub count: usize,
    pub items: Vec<Property>,
}

impl From<Vec<Property>> for PropertyResults {
    fn from(items: Vec<Property>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MessResults {
    pub count: usize,
    pub items: Vec<MessListing>,
}

impl From<Vec<MessListing>> for MessResults {
    fn from(items: Vec<MessListing>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Property detail page payload. Reviews are newest first.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyDetail {
    pub property: Property,
    pub stars: StarDisplay,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MessDetail {
    pub mess: MessListing,
    pub stars: StarDisplay,
    pub reviews: Vec<Review>,
}

/// Home page highlights, most popular first.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FeaturedListings {
    pub properties: Vec<Property>,
    pub messes: Vec<MessListing>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    async fn search_properties(
        &self,
        request: &PropertySearchRequest,
    ) -> Result<PropertyResults, Error>;

    async fn search_messes(&self, request: &MessSearchRequest) -> Result<MessResults, Error>;

    /// Missing ids are reported as `not_found`.
    async fn property(&self, id: &ListingId, source: DataSource) -> Result<PropertyDetail, Error>;

    async fn mess(&self, id: &ListingId, source: DataSource) -> Result<MessDetail, Error>;

    async fn featured(&self, source: DataSource) -> Result<FeaturedListings, Error>;
}
