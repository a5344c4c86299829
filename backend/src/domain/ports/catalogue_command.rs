//! Driving port for owners publishing listings.

use async_trait::async_trait;

use crate::domain::forms::{NewMess, NewProperty};
use crate::domain::{Error, MessListing, Property, UserId};

/// Listing creation. Only owners may publish; new listings start unreviewed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    async fn create_property(&self, owner: &UserId, property: NewProperty)
    -> Result<Property, Error>;

    async fn create_mess(&self, owner: &UserId, mess: NewMess) -> Result<MessListing, Error>;
}
