//! Builders shared by the domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Email, FoodType, ListingId, MessListing, MessPricing, OwnerProfile, PersonName, Property,
    RoomType, StudentProfile, UserId, WeeklyMenu,
};

pub(crate) const STUDENT_ID: &str = "22222222-2222-2222-2222-222222222222";
pub(crate) const OWNER_ID: &str = "11111111-1111-1111-1111-111111111111";

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixedClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock {
        utc_now: fixed_time(),
    })
}

pub(crate) fn student_id() -> UserId {
    UserId::new(STUDENT_ID).expect("student id")
}

pub(crate) fn owner_id() -> UserId {
    UserId::new(OWNER_ID).expect("owner id")
}

pub(crate) fn student(booked: Option<&str>) -> StudentProfile {
    StudentProfile {
        id: student_id(),
        name: PersonName::new("Asha Verma").expect("name"),
        email: Email::new("asha@example.com").expect("email"),
        college_name: "IIT Delhi".into(),
        booked_property_id: booked.map(|id| ListingId::new(id).expect("listing id")),
    }
}

pub(crate) fn owner() -> OwnerProfile {
    OwnerProfile {
        id: owner_id(),
        name: PersonName::new("Ravi Kumar").expect("name"),
        email: Email::new("ravi@example.com").expect("email"),
        contact_number: "9876543210".into(),
    }
}

pub(crate) fn property(id: &str, rent: f64, reviews: u32) -> Property {
    Property {
        id: ListingId::new(id).expect("listing id"),
        name: format!("Property {id}"),
        college_name: "IIT Delhi".into(),
        address: "Hauz Khas, New Delhi".into(),
        rent,
        room_type: RoomType::Single,
        facilities: vec!["Wi-Fi".into()],
        image_ids: Vec::new(),
        distance_from_college: 1.5,
        total_capacity: 4,
        current_availability: 1,
        owner_contact_number: "9876543210".into(),
        property_owner_id: owner_id(),
        average_rating: Some(4.0),
        review_count: Some(reviews),
        description: "Bright rooms a short walk from the main gate.".into(),
        mess_details: None,
    }
}

pub(crate) fn mess(id: &str, reviews: u32) -> MessListing {
    MessListing {
        id: ListingId::new(id).expect("listing id"),
        name: format!("Mess {id}"),
        description: "Home style thali served three times a day.".into(),
        distance_from_college: 0.4,
        food_type: FoodType::Veg,
        pricing: MessPricing {
            monthly: Some(3_000.0),
            quarterly: None,
            per_meal: Some(60.0),
        },
        image_ids: Vec::new(),
        average_rating: 3.5,
        review_count: reviews,
        daily_menu: WeeklyMenu::default(),
        address: "Sector 4".into(),
        contact_number: None,
        owner_id: owner_id(),
    }
}
