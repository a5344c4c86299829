//! Listing handlers: search, detail, creation and the featured home page.
//!
//! ```text
//! GET /api/v1/properties?q=hauz&roomType=single&maxRent=12000&facilities=Wi-Fi,Gym&sort=rent-asc
//! GET /api/v1/properties/prop1?source=fixture
//! POST /api/v1/properties
//! GET /api/v1/messes?foodType=veg&maxPrice=4000
//! GET /api/v1/home
//! ```
//!
//! Every read accepts `source=live|fixture`; the handler resolves it once
//! and passes it down.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::forms::{MessForm, PropertyForm};
use crate::domain::ports::{
    FeaturedListings, MessDetail, MessResults, MessSearchRequest, PropertyDetail,
    PropertyResults, PropertySearchRequest,
};
use crate::domain::{
    BudgetRange, DataSource, Error, MessFilters, MessListing, MessSortKey, Property, PropertyFilters,
    PropertySortKey,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    form_error, parse_choice, parse_listing_id, parse_source, split_list,
};

/// Query string for `GET /properties`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyQuery {
    /// Case-insensitive match on name, college or address.
    pub q: Option<String>,
    /// `popularity`, `rent-asc`, `rent-desc`, `rating-desc` or `distance-asc`.
    pub sort: Option<String>,
    /// `single`, `shared` or `studio`.
    pub room_type: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    /// Kilometres from college.
    pub max_distance: Option<f64>,
    /// Comma-separated facilities that must all be present.
    pub facilities: Option<String>,
    /// Only properties with an available mess.
    pub mess: Option<bool>,
    /// `live` or `fixture`.
    pub source: Option<String>,
}

impl PropertyQuery {
    fn into_request(self, default_source: DataSource) -> Result<PropertySearchRequest, Error> {
        let defaults = PropertyFilters::default();
        let filters = PropertyFilters {
            max_distance_km: self.max_distance.unwrap_or(defaults.max_distance_km),
            room_type: parse_choice("roomType", self.room_type.as_deref())?,
            budget: BudgetRange {
                min: self.min_rent.unwrap_or(defaults.budget.min),
                max: self.max_rent.unwrap_or(defaults.budget.max),
            },
            facilities: split_list(self.facilities.as_deref()),
            mess_available: self.mess.unwrap_or(false),
        };
        Ok(PropertySearchRequest {
            query: self.q.unwrap_or_default(),
            filters,
            sort: parse_choice::<PropertySortKey>("sort", self.sort.as_deref())?
                .unwrap_or_default(),
            source: parse_source(self.source.as_deref())?.unwrap_or(default_source),
        })
    }
}

/// Query string for `GET /messes`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MessQuery {
    /// Case-insensitive match on name or address.
    pub q: Option<String>,
    /// `popularity`, `price-asc`, `price-desc`, `rating-desc` or `distance-asc`.
    pub sort: Option<String>,
    /// `veg`, `non-veg` or `both`.
    pub food_type: Option<String>,
    /// Cap on the monthly price.
    pub max_price: Option<f64>,
    pub source: Option<String>,
}

impl MessQuery {
    fn into_request(self, default_source: DataSource) -> Result<MessSearchRequest, Error> {
        let filters = MessFilters {
            max_monthly_price: self
                .max_price
                .unwrap_or(MessFilters::default().max_monthly_price),
            food_type: parse_choice("foodType", self.food_type.as_deref())?,
        };
        Ok(MessSearchRequest {
            query: self.q.unwrap_or_default(),
            filters,
            sort: parse_choice::<MessSortKey>("sort", self.sort.as_deref())?.unwrap_or_default(),
            source: parse_source(self.source.as_deref())?.unwrap_or(default_source),
        })
    }
}

/// `source` on its own, for detail and home reads.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceQuery {
    pub source: Option<String>,
}

impl SourceQuery {
    pub(crate) fn resolve(&self, state: &HttpState) -> Result<DataSource, Error> {
        Ok(state.source_or_default(parse_source(self.source.as_deref())?))
    }
}

/// Search properties.
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Matching properties", body = PropertyResults),
        (status = 400, description = "Unsupported filter value", body = Error),
        (status = 503, description = "Listings still loading", body = Error)
    ),
    tags = ["listings"],
    operation_id = "searchProperties",
    security([])
)]
#[get("/properties")]
pub async fn search_properties(
    state: web::Data<HttpState>,
    query: web::Query<PropertyQuery>,
) -> ApiResult<web::Json<PropertyResults>> {
    let request = query.into_inner().into_request(state.default_source)?;
    Ok(web::Json(state.catalogue.search_properties(&request).await?))
}

/// Property with its reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property id"), SourceQuery),
    responses(
        (status = 200, description = "Property detail", body = PropertyDetail),
        (status = 404, description = "Unknown property", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getProperty",
    security([])
)]
#[get("/properties/{id}")]
pub async fn property_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
) -> ApiResult<web::Json<PropertyDetail>> {
    let id = parse_listing_id(&path)?;
    let source = query.resolve(&state)?;
    Ok(web::Json(state.catalogue.property(&id, source).await?))
}

/// Publish a property. Owners only.
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = PropertyForm,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not a property owner", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createProperty"
)]
#[post("/properties")]
pub async fn create_property(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PropertyForm>,
) -> ApiResult<HttpResponse> {
    let owner = state.require_user(&session)?;
    let property = payload.validate(&state.images).map_err(form_error)?;
    let created = state.listings.create_property(&owner, property).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Search messes.
#[utoipa::path(
    get,
    path = "/api/v1/messes",
    params(MessQuery),
    responses(
        (status = 200, description = "Matching messes", body = MessResults),
        (status = 400, description = "Unsupported filter value", body = Error),
        (status = 503, description = "Listings still loading", body = Error)
    ),
    tags = ["listings"],
    operation_id = "searchMesses",
    security([])
)]
#[get("/messes")]
pub async fn search_messes(
    state: web::Data<HttpState>,
    query: web::Query<MessQuery>,
) -> ApiResult<web::Json<MessResults>> {
    let request = query.into_inner().into_request(state.default_source)?;
    Ok(web::Json(state.catalogue.search_messes(&request).await?))
}

/// Mess with its reviews, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/messes/{id}",
    params(("id" = String, Path, description = "Mess id"), SourceQuery),
    responses(
        (status = 200, description = "Mess detail", body = MessDetail),
        (status = 404, description = "Unknown mess", body = Error)
    ),
    tags = ["listings"],
    operation_id = "getMess",
    security([])
)]
#[get("/messes/{id}")]
pub async fn mess_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
) -> ApiResult<web::Json<MessDetail>> {
    let id = parse_listing_id(&path)?;
    let source = query.resolve(&state)?;
    Ok(web::Json(state.catalogue.mess(&id, source).await?))
}

/// Publish a mess. Owners only.
#[utoipa::path(
    post,
    path = "/api/v1/messes",
    request_body = MessForm,
    responses(
        (status = 201, description = "Mess created", body = MessListing),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not a property owner", body = Error)
    ),
    tags = ["listings"],
    operation_id = "createMess"
)]
#[post("/messes")]
pub async fn create_mess(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MessForm>,
) -> ApiResult<HttpResponse> {
    let owner = state.require_user(&session)?;
    let mess = payload.validate(&state.images).map_err(form_error)?;
    let created = state.listings.create_mess(&owner, mess).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Most popular properties and messes for the landing page.
#[utoipa::path(
    get,
    path = "/api/v1/home",
    params(SourceQuery),
    responses(
        (status = 200, description = "Featured listings", body = FeaturedListings),
        (status = 503, description = "Listings still loading", body = Error)
    ),
    tags = ["listings"],
    operation_id = "home",
    security([])
)]
#[get("/home")]
pub async fn home(
    state: web::Data<HttpState>,
    query: web::Query<SourceQuery>,
) -> ApiResult<web::Json<FeaturedListings>> {
    let source = query.resolve(&state)?;
    Ok(web::Json(state.catalogue.featured(source).await?))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
