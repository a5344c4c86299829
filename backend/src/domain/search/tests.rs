//! Behavioural coverage for the listing search pipeline.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ListingId, MessDetails, MessPricing, PricingModel, UserId, WeeklyMenu};

fn owner() -> UserId {
    UserId::new("11111111-1111-1111-1111-111111111111").expect("owner id")
}

fn property(id: &str, rent: f64) -> Property {
    Property {
        id: ListingId::new(id).expect("listing id"),
        name: format!("Property {id}"),
        college_name: "IIT Delhi".into(),
        address: "Hauz Khas, New Delhi".into(),
        rent,
        room_type: RoomType::Single,
        facilities: Vec::new(),
        image_ids: Vec::new(),
        distance_from_college: 1.0,
        total_capacity: 4,
        current_availability: 1,
        owner_contact_number: "9876543210".into(),
        property_owner_id: owner(),
        average_rating: None,
        review_count: None,
        description: "A comfortable place to stay near campus.".into(),
        mess_details: None,
    }
}

fn mess(id: &str, monthly: Option<f64>) -> MessListing {
    MessListing {
        id: ListingId::new(id).expect("listing id"),
        name: format!("Mess {id}"),
        description: "Fresh meals cooked twice a day.".into(),
        distance_from_college: 0.5,
        food_type: FoodType::Veg,
        pricing: MessPricing {
            monthly,
            quarterly: None,
            per_meal: Some(60.0),
        },
        image_ids: Vec::new(),
        average_rating: 0.0,
        review_count: 0,
        daily_menu: WeeklyMenu::default(),
        address: "Sector 4".into(),
        contact_number: None,
        owner_id: owner(),
    }
}

fn property_ids(items: &[Property]) -> Vec<String> {
    items.iter().map(|p| p.id.to_string()).collect()
}

fn mess_ids(items: &[MessListing]) -> Vec<String> {
    items.iter().map(|m| m.id.to_string()).collect()
}

#[fixture]
fn catalogue() -> Vec<Property> {
    let mut a = property("a", 5_000.0);
    a.facilities = vec!["Wi-Fi".into(), "Laundry".into(), "Gym".into()];
    a.room_type = RoomType::Shared;
    a.review_count = Some(3);
    a.average_rating = Some(4.2);
    a.distance_from_college = 2.5;

    let mut b = property("b", 12_000.0);
    b.facilities = vec!["Wi-Fi".into()];
    b.name = "Skyline Residency".into();
    b.review_count = Some(10);
    b.average_rating = Some(3.9);
    b.distance_from_college = 0.8;
    b.mess_details = Some(MessDetails {
        available: true,
        food_type: FoodType::Both,
        pricing_model: PricingModel::Included,
        price: None,
        meal_plans: vec!["All Meals".into()],
        timings: "8-10am".into(),
        distance_from_room: 0.0,
    });

    let mut c = property("c", 8_000.0);
    c.facilities = vec!["Laundry".into(), "Wi-Fi".into()];
    c.college_name = "Delhi University".into();
    c.review_count = Some(7);
    c.distance_from_college = 6.0;
    c.mess_details = Some(MessDetails {
        available: false,
        food_type: FoodType::Veg,
        pricing_model: PricingModel::Monthly,
        price: Some(3_000.0),
        meal_plans: Vec::new(),
        timings: "1-3pm".into(),
        distance_from_room: 120.0,
    });

    vec![a, b, c]
}

#[rstest]
fn vacuous_filters_return_input_unchanged() {
    let input = vec![
        property("x", 9_000.0),
        property("y", 3_000.0),
        property("z", 6_000.0),
    ];
    let result = search_properties(
        &input,
        "",
        &PropertyFilters::unrestricted(),
        PropertySortKey::Popularity,
    );
    assert_eq!(result, input);
}

#[rstest]
fn empty_collection_yields_empty_result() {
    let result = search_messes(&[], "anything", &MessFilters::default(), MessSortKey::PriceAsc);
    assert!(result.is_empty());
}

#[rstest]
fn facility_filter_is_conjunctive(catalogue: Vec<Property>) {
    let filters = PropertyFilters {
        facilities: vec!["Wi-Fi".into(), "Laundry".into()],
        ..PropertyFilters::unrestricted()
    };
    let result = search_properties(&catalogue, "", &filters, PropertySortKey::RentAsc);
    assert_eq!(property_ids(&result), ["a", "c"]);
    for property in &result {
        for wanted in &filters.facilities {
            assert!(property.facilities.contains(wanted));
        }
    }
}

#[rstest]
#[case(5_000.0, 8_000.0, vec!["a", "c"])]
#[case(8_000.0, 12_000.0, vec!["c", "b"])]
#[case(8_000.0, 8_000.0, vec!["c"])]
fn budget_bounds_are_inclusive(
    catalogue: Vec<Property>,
    #[case] min: f64,
    #[case] max: f64,
    #[case] expected: Vec<&str>,
) {
    let filters = PropertyFilters {
        budget: BudgetRange { min, max },
        ..PropertyFilters::unrestricted()
    };
    let result = search_properties(&catalogue, "", &filters, PropertySortKey::RentAsc);
    assert_eq!(property_ids(&result), expected);
}

#[rstest]
fn budget_scenario_keeps_affordable_properties_in_rent_order() {
    let input = vec![
        property("p5", 5_000.0),
        property("p12", 12_000.0),
        property("p8", 8_000.0),
    ];
    let filters = PropertyFilters {
        budget: BudgetRange {
            min: 0.0,
            max: 10_000.0,
        },
        ..PropertyFilters::unrestricted()
    };
    let result = search_properties(&input, "", &filters, PropertySortKey::RentAsc);
    let rents: Vec<f64> = result.iter().map(|p| p.rent).collect();
    assert_eq!(rents, [5_000.0, 8_000.0]);
}

#[rstest]
fn popularity_orders_by_review_count_descending() {
    let counts = [10, 3, 7];
    let input: Vec<Property> = counts
        .iter()
        .enumerate()
        .map(|(index, count)| {
            let mut p = property(&format!("p{index}"), 1_000.0);
            p.review_count = Some(*count);
            p
        })
        .collect();
    let result = search_properties(
        &input,
        "",
        &PropertyFilters::unrestricted(),
        PropertySortKey::Popularity,
    );
    let ordered: Vec<u32> = result.iter().filter_map(|p| p.review_count).collect();
    assert_eq!(ordered, [10, 7, 3]);
}

#[rstest]
fn rent_desc_reverses_rent_asc_without_ties(catalogue: Vec<Property>) {
    let filters = PropertyFilters::unrestricted();
    let asc = search_properties(&catalogue, "", &filters, PropertySortKey::RentAsc);
    let mut desc = search_properties(&catalogue, "", &filters, PropertySortKey::RentDesc);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[rstest]
fn ties_keep_input_order() {
    let input = vec![
        property("first", 7_000.0),
        property("second", 7_000.0),
        property("third", 7_000.0),
    ];
    let filters = PropertyFilters::unrestricted();
    for sort in [
        PropertySortKey::RentAsc,
        PropertySortKey::RentDesc,
        PropertySortKey::RatingDesc,
        PropertySortKey::DistanceAsc,
        PropertySortKey::Popularity,
    ] {
        let result = search_properties(&input, "", &filters, sort);
        assert_eq!(property_ids(&result), ["first", "second", "third"], "{sort:?}");
    }
}

#[rstest]
#[case("skyline", vec!["b"])]
#[case("DELHI UNIVERSITY", vec!["c"])]
#[case("hauz", vec!["b", "c", "a"])]
#[case("nowhere", vec![])]
#[case(" skyline", vec![])]
#[case("khas, new", vec!["b", "c", "a"])]
fn text_query_matches_name_college_and_address(
    catalogue: Vec<Property>,
    #[case] query: &str,
    #[case] expected: Vec<&str>,
) {
    let result = search_properties(
        &catalogue,
        query,
        &PropertyFilters::unrestricted(),
        PropertySortKey::Popularity,
    );
    assert_eq!(property_ids(&result), expected);
}

#[rstest]
fn default_filters_apply_distance_cap(catalogue: Vec<Property>) {
    let result = search_properties(
        &catalogue,
        "",
        &PropertyFilters::default(),
        PropertySortKey::DistanceAsc,
    );
    assert_eq!(property_ids(&result), ["b", "a"]);
}

#[rstest]
fn room_type_filter_matches_exactly(catalogue: Vec<Property>) {
    let filters = PropertyFilters {
        room_type: Some(RoomType::Shared),
        ..PropertyFilters::unrestricted()
    };
    let result = search_properties(&catalogue, "", &filters, PropertySortKey::Popularity);
    assert_eq!(property_ids(&result), ["a"]);
}

#[rstest]
#[case(true, vec!["b"])]
#[case(false, vec!["b", "c", "a"])]
fn mess_available_flag_only_constrains_when_set(
    catalogue: Vec<Property>,
    #[case] flag: bool,
    #[case] expected: Vec<&str>,
) {
    let filters = PropertyFilters {
        mess_available: flag,
        ..PropertyFilters::unrestricted()
    };
    let result = search_properties(&catalogue, "", &filters, PropertySortKey::Popularity);
    assert_eq!(property_ids(&result), expected);
}

#[rstest]
fn rating_sort_treats_missing_rating_as_zero(catalogue: Vec<Property>) {
    let result = search_properties(
        &catalogue,
        "",
        &PropertyFilters::unrestricted(),
        PropertySortKey::RatingDesc,
    );
    assert_eq!(property_ids(&result), ["a", "b", "c"]);
}

#[rstest]
fn search_does_not_mutate_input(catalogue: Vec<Property>) {
    let before = catalogue.clone();
    let _ = search_properties(
        &catalogue,
        "wi",
        &PropertyFilters::default(),
        PropertySortKey::RentDesc,
    );
    assert_eq!(catalogue, before);
}

#[rstest]
fn repeated_runs_are_identical(catalogue: Vec<Property>) {
    let filters = PropertyFilters::default();
    let first = search_properties(&catalogue, "a", &filters, PropertySortKey::RatingDesc);
    let second = search_properties(&catalogue, "a", &filters, PropertySortKey::RatingDesc);
    assert_eq!(first, second);
}

#[rstest]
fn unpriced_mess_passes_any_price_cap() {
    let input = vec![mess("priced", Some(6_000.0)), mess("unpriced", None)];
    let filters = MessFilters {
        max_monthly_price: 0.0,
        food_type: None,
    };
    let result = search_messes(&input, "", &filters, MessSortKey::Popularity);
    assert_eq!(mess_ids(&result), ["unpriced"]);
}

#[rstest]
fn mess_price_sorts_place_unpriced_at_the_expensive_end_ascending() {
    let input = vec![
        mess("none", None),
        mess("high", Some(4_000.0)),
        mess("low", Some(2_500.0)),
    ];
    let filters = MessFilters::unrestricted();
    let asc = search_messes(&input, "", &filters, MessSortKey::PriceAsc);
    assert_eq!(mess_ids(&asc), ["low", "high", "none"]);
    let desc = search_messes(&input, "", &filters, MessSortKey::PriceDesc);
    assert_eq!(mess_ids(&desc), ["high", "low", "none"]);
}

#[rstest]
fn mess_food_type_filter_and_query() {
    let mut non_veg = mess("nv", Some(3_000.0));
    non_veg.food_type = FoodType::NonVeg;
    non_veg.name = "Spice Route Kitchen".into();
    let input = vec![mess("veg", Some(2_000.0)), non_veg];

    let filters = MessFilters {
        food_type: Some(FoodType::NonVeg),
        ..MessFilters::default()
    };
    let result = search_messes(&input, "", &filters, MessSortKey::Popularity);
    assert_eq!(mess_ids(&result), ["nv"]);

    let by_name = search_messes(&input, "spice", &MessFilters::unrestricted(), MessSortKey::Popularity);
    assert_eq!(mess_ids(&by_name), ["nv"]);
}

#[rstest]
fn mess_popularity_and_rating_sorts() {
    let mut quiet = mess("quiet", None);
    quiet.review_count = 2;
    quiet.average_rating = 4.8;
    let mut busy = mess("busy", None);
    busy.review_count = 40;
    busy.average_rating = 3.5;
    let input = vec![quiet, busy];
    let filters = MessFilters::unrestricted();

    let popular = search_messes(&input, "", &filters, MessSortKey::Popularity);
    assert_eq!(mess_ids(&popular), ["busy", "quiet"]);
    let rated = search_messes(&input, "", &filters, MessSortKey::RatingDesc);
    assert_eq!(mess_ids(&rated), ["quiet", "busy"]);
}

#[rstest]
#[case("popularity", PropertySortKey::Popularity)]
#[case("rent-asc", PropertySortKey::RentAsc)]
#[case("distance-asc", PropertySortKey::DistanceAsc)]
fn property_sort_keys_parse(#[case] raw: &str, #[case] expected: PropertySortKey) {
    assert_eq!(raw.parse::<PropertySortKey>(), Ok(expected));
}

#[rstest]
fn unknown_sort_key_is_rejected() {
    assert!("cheapest".parse::<MessSortKey>().is_err());
}
