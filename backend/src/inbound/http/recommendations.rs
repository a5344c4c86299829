//! Generated recommendations and property summaries.
//!
//! ```text
//! POST /api/v1/recommendations {"location":"Hauz Khas","maxRent":12000,"desiredAmenities":["Wi-Fi"]}
//! POST /api/v1/properties/prop1/summary?source=live
//! ```

use actix_web::{post, web};

use crate::domain::forms::RecommendationForm;
use crate::domain::ports::PropertySummary;
use crate::domain::{Error, Recommendation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listings::SourceQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{form_error, parse_listing_id};

/// Ranked properties for a location, budget and amenity wish list.
#[utoipa::path(
    post,
    path = "/api/v1/recommendations",
    request_body = RecommendationForm,
    responses(
        (status = 200, description = "Validated recommendations", body = [Recommendation]),
        (status = 400, description = "Validation failed", body = Error),
        (status = 503, description = "Engine unavailable or returned invalid output", body = Error)
    ),
    tags = ["recommendations"],
    operation_id = "recommend",
    security([])
)]
#[post("/recommendations")]
pub async fn recommend(
    state: web::Data<HttpState>,
    payload: web::Json<RecommendationForm>,
) -> ApiResult<web::Json<Vec<Recommendation>>> {
    let request = payload.validate().map_err(form_error)?;
    Ok(web::Json(state.recommendations.recommend(&request).await?))
}

/// Short generated description of one property.
#[utoipa::path(
    post,
    path = "/api/v1/properties/{id}/summary",
    params(("id" = String, Path, description = "Property id"), SourceQuery),
    responses(
        (status = 200, description = "Generated summary", body = PropertySummary),
        (status = 404, description = "Unknown property", body = Error),
        (status = 503, description = "Engine unavailable", body = Error)
    ),
    tags = ["recommendations"],
    operation_id = "summariseProperty",
    security([])
)]
#[post("/properties/{id}/summary")]
pub async fn summarise_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SourceQuery>,
) -> ApiResult<web::Json<PropertySummary>> {
    let id = parse_listing_id(&path)?;
    let source = query.resolve(&state)?;
    Ok(web::Json(state.recommendations.summarise(&id, source).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{DataSource, ListingId};
    use crate::inbound::http::test_utils::{MockPorts, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(recommend).service(summarise_property);
    }

    #[rstest]
    #[actix_web::test]
    async fn recommendations_pass_the_validated_request() {
        let mut ports = MockPorts::default();
        ports
            .recommendations
            .expect_recommend()
            .withf(|request| {
                request.location == "Hauz Khas"
                    && request.max_rent == 12_000.0
                    && request.desired_amenities == ["Wi-Fi"]
            })
            .times(1)
            .returning(|_| {
                Ok(vec![Recommendation {
                    property_id: ListingId::new("prop1").expect("id"),
                    property_name: "Green View PG".into(),
                    rent: 9_500.0,
                    address: "Hauz Khas, New Delhi".into(),
                    amenities: vec!["Wi-Fi".into()],
                    contact_information: "9876543210".into(),
                    match_score: 0.9,
                }])
            });
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(json!({
                "location": " Hauz Khas ",
                "maxRent": 12000,
                "desiredAmenities": ["Wi-Fi", " "]
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body[0]["propertyId"], "prop1");
        assert_eq!(body[0]["matchScore"], 0.9);
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_recommendation_forms_skip_the_engine() {
        let mut ports = MockPorts::default();
        ports.recommendations.expect_recommend().times(0);
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(json!({"location": "", "maxRent": 50}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["fields"]["location"], "Location is required");
        assert_eq!(body["details"]["fields"]["maxRent"], "Rent must be at least 100");
    }

    #[rstest]
    #[actix_web::test]
    async fn engine_failures_are_unavailable() {
        let mut ports = MockPorts::default();
        ports
            .recommendations
            .expect_recommend()
            .returning(|_| Err(Error::service_unavailable("recommendation engine unavailable")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/recommendations")
            .set_json(json!({"location": "Hauz Khas", "maxRent": 12000}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn summaries_use_the_requested_source() {
        let mut ports = MockPorts::default();
        ports
            .recommendations
            .expect_summarise()
            .withf(|id, source| id.as_ref() == "prop1" && *source == DataSource::Fixture)
            .times(1)
            .returning(|id, _| {
                Ok(PropertySummary {
                    property_id: id.clone(),
                    summary: "Bright single rooms near campus.".into(),
                })
            });
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/properties/prop1/summary?source=fixture")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["summary"], "Bright single rooms near campus.");
    }
}
