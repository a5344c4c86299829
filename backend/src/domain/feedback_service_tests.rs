//! Tests for review and suggestion submission.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::forms::{NewReview, SuggestionForm};
use crate::domain::ports::{
    MockMessRepository, MockProfileRepository, MockPropertyRepository, MockReviewRepository,
    MockSuggestionRepository, ReviewRepositoryError,
};
use crate::domain::test_fixtures::{
    fixed_clock, fixed_time, mess, owner_id, property, student, student_id,
};
use crate::domain::{ErrorCode, ListingId, Rating, RatingAggregate};

struct Doubles {
    properties: MockPropertyRepository,
    messes: MockMessRepository,
    reviews: MockReviewRepository,
    suggestions: MockSuggestionRepository,
    profiles: MockProfileRepository,
}

impl Doubles {
    fn new() -> Self {
        Self {
            properties: MockPropertyRepository::new(),
            messes: MockMessRepository::new(),
            reviews: MockReviewRepository::new(),
            suggestions: MockSuggestionRepository::new(),
            profiles: MockProfileRepository::new(),
        }
    }

    fn with_student(mut self, booked: Option<&'static str>) -> Self {
        self.profiles
            .expect_find_student()
            .return_once(move |_| Ok(Some(student(booked))));
        self
    }

    fn build(self) -> FeedbackService {
        FeedbackService::new(
            FeedbackPorts {
                properties: Arc::new(self.properties),
                messes: Arc::new(self.messes),
                reviews: Arc::new(self.reviews),
                suggestions: Arc::new(self.suggestions),
                profiles: Arc::new(self.profiles),
            },
            fixed_clock(),
        )
    }
}

fn new_review(rating: u8) -> NewReview {
    NewReview {
        rating: Rating::new(rating).expect("rating"),
        comment: "Food was fresh every single day.".into(),
    }
}

fn message() -> SuggestionMessage {
    SuggestionForm {
        message: "Please fix the geyser on the second floor.".into(),
    }
    .validate()
    .expect("valid message")
}

fn listing(id: &str) -> ListingId {
    ListingId::new(id).expect("listing id")
}

#[rstest]
#[tokio::test]
async fn review_is_stored_and_folded_into_the_aggregate() {
    let mut doubles = Doubles::new().with_student(None);
    doubles
        .messes
        .expect_find()
        .return_once(|_| Ok(Some(mess("m1", 3))));
    doubles
        .reviews
        .expect_append()
        .withf(|review| review.student_name.as_ref() == "Asha Verma")
        .times(1)
        .return_once(|_| Ok(()));
    doubles
        .messes
        .expect_record_rating()
        .withf(|id, rating| id.as_ref() == "m1" && rating.get() == 5)
        .times(1)
        .return_once(|_, _| {
            Ok(Some(RatingAggregate {
                average: 3.875,
                count: 4,
            }))
        });
    let service = doubles.build();

    let review = service
        .submit_review(&student_id(), ReviewTarget::Mess(listing("m1")), new_review(5))
        .await
        .expect("review stored");
    assert_eq!(review.created_at, fixed_time());
    assert_eq!(review.target, ReviewTarget::Mess(listing("m1")));
}

#[rstest]
#[tokio::test]
async fn review_for_missing_listing_is_not_found() {
    let mut doubles = Doubles::new().with_student(None);
    doubles.properties.expect_find().return_once(|_| Ok(None));
    let service = doubles.build();

    let error = service
        .submit_review(
            &student_id(),
            ReviewTarget::Property(listing("ghost")),
            new_review(4),
        )
        .await
        .expect_err("missing listing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owners_cannot_review() {
    let mut doubles = Doubles::new();
    doubles
        .profiles
        .expect_find_student()
        .return_once(|_| Ok(None));
    let service = doubles.build();

    let error = service
        .submit_review(&owner_id(), ReviewTarget::Property(listing("p1")), new_review(3))
        .await
        .expect_err("forbidden");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn failed_review_write_skips_the_aggregate() {
    let mut doubles = Doubles::new().with_student(None);
    doubles
        .properties
        .expect_find()
        .return_once(|_| Ok(Some(property("p1", 6_000.0, 1))));
    doubles
        .reviews
        .expect_append()
        .return_once(|_| Err(ReviewRepositoryError::connection("offline")));
    doubles.properties.expect_record_rating().never();
    let service = doubles.build();

    let error = service
        .submit_review(&student_id(), ReviewTarget::Property(listing("p1")), new_review(2))
        .await
        .expect_err("store offline");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn suggestion_is_routed_to_the_booked_property_owner() {
    let mut doubles = Doubles::new().with_student(Some("p1"));
    doubles
        .properties
        .expect_find()
        .return_once(|_| Ok(Some(property("p1", 6_000.0, 1))));
    doubles
        .suggestions
        .expect_append()
        .withf(|s| s.owner_id == owner_id() && s.status == SuggestionStatus::Open)
        .times(1)
        .return_once(|_| Ok(()));
    let service = doubles.build();

    let suggestion = service
        .submit_suggestion(&student_id(), message())
        .await
        .expect("suggestion sent");
    assert_eq!(suggestion.property_name, "Property p1");
    assert_eq!(suggestion.created_at, fixed_time());
}

#[rstest]
#[tokio::test]
async fn suggestion_without_booking_is_forbidden() {
    let doubles = Doubles::new().with_student(None);
    let service = doubles.build();

    let error = service
        .submit_suggestion(&student_id(), message())
        .await
        .expect_err("no booking");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}
