//! Review handlers for properties and messes.
//!
//! ```text
//! POST /api/v1/properties/prop1/reviews {"rating":4,"comment":"Quiet and clean rooms."}
//! POST /api/v1/messes/mess1/reviews {"rating":5,"comment":"Best rajma in town."}
//! ```

use actix_web::{HttpResponse, post, web};

use crate::domain::forms::ReviewForm;
use crate::domain::{Error, ListingId, Review, ReviewTarget};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{form_error, parse_listing_id};

async fn submit(
    state: &HttpState,
    session: &SessionContext,
    target: fn(ListingId) -> ReviewTarget,
    raw_id: &str,
    form: &ReviewForm,
) -> ApiResult<HttpResponse> {
    let student = state.require_user(session)?;
    let target = target(parse_listing_id(raw_id)?);
    let review = form.validate().map_err(form_error)?;
    let stored = state.feedback.submit_review(&student, target, review).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Review a property. Students only.
#[utoipa::path(
    post,
    path = "/api/v1/properties/{id}/reviews",
    params(("id" = String, Path, description = "Property id")),
    request_body = ReviewForm,
    responses(
        (status = 201, description = "Review stored", body = Review),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not a student", body = Error),
        (status = 404, description = "Unknown property", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "reviewProperty"
)]
#[post("/properties/{id}/reviews")]
pub async fn review_property(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &session, ReviewTarget::Property, &path, &payload).await
}

/// Review a mess. Students only.
#[utoipa::path(
    post,
    path = "/api/v1/messes/{id}/reviews",
    params(("id" = String, Path, description = "Mess id")),
    request_body = ReviewForm,
    responses(
        (status = 201, description = "Review stored", body = Review),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not a student", body = Error),
        (status = 404, description = "Unknown mess", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "reviewMess"
)]
#[post("/messes/{id}/reviews")]
pub async fn review_mess(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewForm>,
) -> ApiResult<HttpResponse> {
    submit(&state, &session, ReviewTarget::Mess, &path, &payload).await
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::test_fixtures::{STUDENT_ID, student_id};
    use crate::domain::{PersonName, Rating, Role};
    use crate::inbound::http::test_utils::{MockPorts, sign_in, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(review_property).service(review_mess);
    }

    fn stored(target: ReviewTarget, rating: Rating, comment: String) -> Review {
        Review {
            id: "rev1".into(),
            target,
            student_id: student_id(),
            student_name: PersonName::new("Asha Verma").expect("name"),
            rating,
            comment,
            created_at: chrono::Utc
                .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[rstest]
    #[case("/api/v1/properties/prop1/reviews", ReviewTarget::Property(ListingId::new("prop1").expect("id")))]
    #[case("/api/v1/messes/mess1/reviews", ReviewTarget::Mess(ListingId::new("mess1").expect("id")))]
    #[actix_web::test]
    async fn students_review_listings(#[case] uri: &str, #[case] expected: ReviewTarget) {
        let mut ports = MockPorts::default();
        let wanted = expected.clone();
        ports
            .feedback
            .expect_submit_review()
            .withf(move |student, target, review| {
                student == &student_id() && target == &wanted && review.rating.get() == 4
            })
            .times(1)
            .returning(|_, target, review| Ok(stored(target, review.rating, review.comment)));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, STUDENT_ID, Some(Role::Student)).await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .cookie(cookie)
            .set_json(json!({"rating": 4, "comment": "Quiet and clean rooms."}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["rating"], 4);
        assert_eq!(body["comment"], "Quiet and clean rooms.");
    }

    #[rstest]
    #[actix_web::test]
    async fn reviews_require_a_session() {
        let app =
            actix_test::init_service(test_app(MockPorts::default().into_state(), routes)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/properties/prop1/reviews")
            .set_json(json!({"rating": 4, "comment": "Quiet and clean rooms."}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn invalid_reviews_are_not_stored() {
        let mut ports = MockPorts::default();
        ports.feedback.expect_submit_review().times(0);
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, STUDENT_ID, Some(Role::Student)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/messes/mess1/reviews")
            .cookie(cookie)
            .set_json(json!({"rating": 7, "comment": "meh"}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        let fields = &body["details"]["fields"];
        assert_eq!(fields["rating"], "Rating must be a whole number from 1 to 5.");
        assert_eq!(fields["comment"], "Comment must be at least 10 characters.");
    }

    #[rstest]
    #[actix_web::test]
    async fn owners_are_refused_by_the_service() {
        let mut ports = MockPorts::default();
        ports
            .feedback
            .expect_submit_review()
            .returning(|_, _, _| Err(Error::forbidden("only students can leave reviews")));
        let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, STUDENT_ID, Some(Role::Owner)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/properties/prop1/reviews")
            .cookie(cookie)
            .set_json(json!({"rating": 3, "comment": "Decent but noisy at night."}))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
