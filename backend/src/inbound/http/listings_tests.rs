//! Listing handler tests over mocked driving ports.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::test_fixtures::{OWNER_ID, mess, owner_id, property};
use crate::domain::{Role, RoomType, StarDisplay};
use crate::inbound::http::test_utils::{MockPorts, sign_in, test_app};

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(search_properties)
        .service(create_property)
        .service(property_detail)
        .service(search_messes)
        .service(create_mess)
        .service(mess_detail)
        .service(home);
}

fn property_form() -> Value {
    json!({
        "propertyName": "Green View PG",
        "collegeName": "IIT Delhi",
        "address": "Hauz Khas, New Delhi",
        "distanceFromCollege": 0.8,
        "roomType": "single",
        "rent": 9500,
        "facilities": ["Wi-Fi", "Laundry"],
        "totalCapacity": 10,
        "currentAvailability": 2,
        "description": "Quiet rooms with daily cleaning and hot water.",
        "contactNumber": "9876543210",
        "messAvailable": false,
        "imageUrls": ["https://images.unsplash.com/photo-1"]
    })
}

#[rstest]
#[actix_web::test]
async fn property_search_maps_the_query_string() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_search_properties()
        .withf(|request| {
            request.query == "hauz"
                && request.sort == PropertySortKey::RentAsc
                && request.source == DataSource::Fixture
                && request.filters.room_type == Some(RoomType::Single)
                && request.filters.budget.max == 12_000.0
                && request.filters.facilities == ["Wi-Fi", "Gym"]
                && request.filters.mess_available
        })
        .times(1)
        .returning(|_| Ok(PropertyResults::from(vec![property("prop1", 9_500.0, 3)])));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/properties?q=hauz&sort=rent-asc&roomType=single&maxRent=12000&facilities=Wi-Fi,%20Gym&mess=true&source=fixture")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["id"], "prop1");
}

#[rstest]
#[actix_web::test]
async fn property_search_defaults_to_the_live_source() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_search_properties()
        .withf(|request| request == &PropertySearchRequest::default())
        .times(1)
        .returning(|_| Ok(PropertyResults::from(Vec::new())));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/properties")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["count"], 0);
}

#[rstest]
#[case("/api/v1/properties?roomType=penthouse", "roomType")]
#[case("/api/v1/properties?sort=cheapest", "sort")]
#[case("/api/v1/messes?foodType=vegan", "foodType")]
#[case("/api/v1/home?source=cache", "source")]
#[actix_web::test]
async fn unknown_choices_are_rejected(#[case] uri: &str, #[case] field: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state(), routes)).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn malformed_numbers_are_rejected() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/properties?maxRent=cheap")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "malformed query string");
}

#[rstest]
#[actix_web::test]
async fn mess_search_applies_price_cap() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_search_messes()
        .withf(|request| {
            request.filters.max_monthly_price == 4_000.0
                && request.sort == MessSortKey::PriceAsc
                && request.filters.food_type.is_none()
        })
        .times(1)
        .returning(|_| Ok(MessResults::from(vec![mess("mess1", 2)])));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/messes?maxPrice=4000&sort=price-asc")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["items"][0]["id"], "mess1");
}

#[rstest]
#[actix_web::test]
async fn unknown_property_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_property()
        .withf(|id, source| id.as_ref() == "ghost" && *source == DataSource::Live)
        .times(1)
        .returning(|id, _| Err(Error::not_found(format!("property not found: {id}"))));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/properties/ghost")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn property_detail_reads_the_requested_source() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_property()
        .withf(|_, source| *source == DataSource::Fixture)
        .times(1)
        .returning(|_, _| {
            let property = property("prop1", 9_500.0, 0);
            Ok(PropertyDetail {
                stars: StarDisplay::for_rating(4.0),
                property,
                reviews: Vec::new(),
            })
        });
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/properties/prop1?source=demo")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["property"]["id"], "prop1");
    assert_eq!(body["reviews"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn creating_a_property_requires_a_session() {
    let app = actix_test::init_service(test_app(MockPorts::default().into_state(), routes)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/properties")
        .set_json(property_form())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn invalid_property_forms_report_fields() {
    let mut ports = MockPorts::default();
    ports.listings.expect_create_property().times(0);
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let cookie = sign_in(&app, OWNER_ID, Some(Role::Owner)).await;
    let mut form = property_form();
    form["description"] = json!("Too short");
    form["imageUrls"] = json!(["https://example.com/cat.png"]);
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/properties")
        .cookie(cookie)
        .set_json(form)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let fields = body["details"]["fields"]
        .as_object()
        .expect("field errors");
    assert!(fields.contains_key("description"));
    assert!(fields.contains_key("imageUrls.0"));
}

#[rstest]
#[actix_web::test]
async fn owners_publish_properties() {
    let mut ports = MockPorts::default();
    ports
        .listings
        .expect_create_property()
        .withf(|owner, new| owner == &owner_id() && new.name == "Green View PG")
        .times(1)
        .returning(|_, new| {
            let mut created = property("prop9", new.rent, 0);
            created.name = new.name;
            Ok(created)
        });
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let cookie = sign_in(&app, OWNER_ID, Some(Role::Owner)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/properties")
        .cookie(cookie)
        .set_json(property_form())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], "prop9");
    assert_eq!(body["name"], "Green View PG");
}

#[rstest]
#[actix_web::test]
async fn students_cannot_publish_messes() {
    let mut ports = MockPorts::default();
    ports
        .listings
        .expect_create_mess()
        .times(1)
        .returning(|_, _| Err(Error::forbidden("only property owners can list a mess")));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let cookie = sign_in(&app, OWNER_ID, Some(Role::Student)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/messes")
        .cookie(cookie)
        .set_json(json!({
            "name": "Annapurna Mess",
            "description": "Home style thali served three times a day.",
            "address": "Sector 4",
            "distanceFromCollege": 0.4,
            "foodType": "veg",
            "pricing": {"monthly": 3000},
            "contactNumber": "9876543210",
            "imageUrls": []
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn home_lists_featured_listings() {
    let mut ports = MockPorts::default();
    ports
        .catalogue
        .expect_featured()
        .withf(|source| *source == DataSource::Fixture)
        .times(1)
        .returning(|_| {
            Ok(FeaturedListings {
                properties: vec![property("prop1", 9_500.0, 12)],
                messes: vec![mess("mess1", 4)],
            })
        });
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/home?source=fixture")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["properties"][0]["id"], "prop1");
    assert_eq!(body["messes"][0]["id"], "mess1");
}
