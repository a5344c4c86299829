//! Add-property and add-mess forms.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::checks;
use super::{FieldErrors, ImageHostAllowList};
use crate::domain::{
    ContactNumber, FoodType, MessDetails, MessPricing, PricingModel, RoomType, WeeklyMenu,
};

pub const DESCRIPTION_MIN_LEN: usize = 20;

/// Raw add-property submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyForm {
    #[schema(example = "Green View Hostel")]
    pub property_name: String,
    pub college_name: String,
    pub address: String,
    pub distance_from_college: Option<f64>,
    #[schema(example = "single")]
    pub room_type: Option<String>,
    pub rent: Option<f64>,
    pub facilities: Vec<String>,
    pub total_capacity: Option<f64>,
    pub current_availability: Option<f64>,
    pub description: String,
    #[schema(example = "9876543210")]
    pub contact_number: String,
    pub mess_available: bool,
    pub mess_type: Option<String>,
    pub mess_pricing_model: Option<String>,
    pub mess_price: Option<f64>,
    pub meal_plans: Vec<String>,
    pub mess_timings: Option<String>,
    pub mess_distance_from_room: Option<f64>,
    pub image_urls: Vec<String>,
}

/// Validated property content; the catalogue assigns id and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub name: String,
    pub college_name: String,
    pub address: String,
    pub distance_from_college: f64,
    pub room_type: RoomType,
    pub rent: f64,
    pub facilities: Vec<String>,
    pub total_capacity: u32,
    pub current_availability: u32,
    pub description: String,
    pub contact_number: ContactNumber,
    pub mess_details: Option<MessDetails>,
    pub image_urls: Vec<String>,
}

impl PropertyForm {
    /// Validate the whole submission against `images`.
    pub fn validate(&self, images: &ImageHostAllowList) -> Result<NewProperty, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = checks::required(
            &mut errors,
            "propertyName",
            &self.property_name,
            "Property name is required",
        );
        let college_name = checks::required(
            &mut errors,
            "collegeName",
            &self.college_name,
            "College name is required",
        );
        let address = checks::required(&mut errors, "address", &self.address, "Address is required");
        let distance_from_college = checks::number_at_least(
            &mut errors,
            "distanceFromCollege",
            self.distance_from_college,
            0.0,
            "Distance must be a positive number",
        );
        let room_type = checks::parse_choice::<RoomType>(
            &mut errors,
            "roomType",
            self.room_type.as_deref(),
            "Please select a room type.",
        );
        let rent =
            checks::number_at_least(&mut errors, "rent", self.rent, 1.0, "Rent must be at least 1");
        let total_capacity = checks::whole_number_at_least(
            &mut errors,
            "totalCapacity",
            self.total_capacity,
            1,
            "Capacity must be at least 1",
        );
        let current_availability = checks::whole_number_at_least(
            &mut errors,
            "currentAvailability",
            self.current_availability,
            0,
            "Availability cannot be negative",
        );
        let description = checks::min_chars(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MIN_LEN,
            "Description must be at least 20 characters",
        );
        let contact_number = ContactNumber::new(&self.contact_number)
            .map_err(|_| {
                errors.add("contactNumber", "Please enter a valid 10-digit phone number")
            })
            .ok();
        let mess_details = self.validate_mess(&mut errors);
        let image_urls = validate_images(&mut errors, images, &self.image_urls);
        let facilities = checks::string_list(&self.facilities);

        errors.finish(|| {
            Some(NewProperty {
                name: name?,
                college_name: college_name?,
                address: address?,
                distance_from_college: distance_from_college?,
                room_type: room_type?,
                rent: rent?,
                facilities,
                total_capacity: total_capacity?,
                current_availability: current_availability?,
                description: description?,
                contact_number: contact_number?,
                mess_details,
                image_urls,
            })
        })
    }

    /// Mess fields only matter when the toggle is on; the price is required
    /// unless meals are included in the rent.
    fn validate_mess(&self, errors: &mut FieldErrors) -> Option<MessDetails> {
        if !self.mess_available {
            return None;
        }
        let food_type = checks::parse_choice::<FoodType>(
            errors,
            "messType",
            self.mess_type.as_deref(),
            "Please select a mess type.",
        );
        let pricing_model = checks::parse_choice::<PricingModel>(
            errors,
            "messPricingModel",
            self.mess_pricing_model.as_deref(),
            "Please select a pricing model.",
        );
        let timings = checks::required(
            errors,
            "messTimings",
            self.mess_timings.as_deref().unwrap_or_default(),
            "Mess timings are required.",
        );
        let price = match pricing_model {
            Some(PricingModel::Included) | None => None,
            Some(_) => checks::number_at_least(
                errors,
                "messPrice",
                self.mess_price,
                0.0,
                "Mess price must be a positive number",
            ),
        };
        let distance_from_room = match self.mess_distance_from_room {
            Some(metres) if metres.is_finite() && metres >= 0.0 => metres,
            Some(_) => {
                errors.add("messDistanceFromRoom", "Distance must be a positive number");
                0.0
            }
            None => 0.0,
        };
        let pricing_model = pricing_model?;
        if pricing_model != PricingModel::Included && price.is_none() {
            return None;
        }
        Some(MessDetails {
            available: true,
            food_type: food_type?,
            pricing_model,
            price,
            meal_plans: checks::string_list(&self.meal_plans),
            timings: timings?,
            distance_from_room,
        })
    }
}

fn validate_images(
    errors: &mut FieldErrors,
    images: &ImageHostAllowList,
    urls: &[String],
) -> Vec<String> {
    let mut accepted = Vec::with_capacity(urls.len());
    for (index, raw) in urls.iter().enumerate() {
        match images.check(raw) {
            Ok(url) => accepted.push(url.to_string()),
            Err(message) => errors.add(format!("imageUrls.{index}"), message),
        }
    }
    accepted
}

/// Raw mess price points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MessPricingForm {
    pub monthly: Option<f64>,
    pub quarterly: Option<f64>,
    pub per_meal: Option<f64>,
}

/// Raw add-mess submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MessForm {
    #[schema(example = "Annapurna Tiffins")]
    pub name: String,
    pub description: String,
    pub address: String,
    pub distance_from_college: Option<f64>,
    #[schema(example = "veg")]
    pub food_type: Option<String>,
    pub pricing: MessPricingForm,
    pub contact_number: String,
    pub daily_menu: WeeklyMenu,
    pub image_urls: Vec<String>,
}

/// Validated mess content; the catalogue assigns id and owner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMess {
    pub name: String,
    pub description: String,
    pub address: String,
    pub distance_from_college: f64,
    pub food_type: FoodType,
    pub pricing: MessPricing,
    pub contact_number: ContactNumber,
    pub daily_menu: WeeklyMenu,
    pub image_urls: Vec<String>,
}

impl MessForm {
    pub fn validate(&self, images: &ImageHostAllowList) -> Result<NewMess, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = checks::required(&mut errors, "name", &self.name, "Mess name is required");
        let description = checks::min_chars(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MIN_LEN,
            "Description must be at least 20 characters",
        );
        let address = checks::required(&mut errors, "address", &self.address, "Address is required");
        let distance_from_college = checks::number_at_least(
            &mut errors,
            "distanceFromCollege",
            self.distance_from_college,
            0.0,
            "Distance must be a positive number",
        );
        let food_type = checks::parse_choice::<FoodType>(
            &mut errors,
            "foodType",
            self.food_type.as_deref(),
            "Please select a food type.",
        );
        let pricing = MessPricing {
            monthly: optional_price(&mut errors, "pricing.monthly", self.pricing.monthly),
            quarterly: optional_price(&mut errors, "pricing.quarterly", self.pricing.quarterly),
            per_meal: optional_price(&mut errors, "pricing.perMeal", self.pricing.per_meal),
        };
        let contact_number = ContactNumber::new(&self.contact_number)
            .map_err(|_| {
                errors.add("contactNumber", "Please enter a valid 10-digit phone number")
            })
            .ok();
        let daily_menu = trimmed_menu(&self.daily_menu);
        let image_urls = validate_images(&mut errors, images, &self.image_urls);

        errors.finish(|| {
            Some(NewMess {
                name: name?,
                description: description?,
                address: address?,
                distance_from_college: distance_from_college?,
                food_type: food_type?,
                pricing,
                contact_number: contact_number?,
                daily_menu,
                image_urls,
            })
        })
    }
}

fn optional_price(errors: &mut FieldErrors, field: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(price) if price.is_finite() && price >= 0.0 => Some(price),
        Some(_) => {
            errors.add(field, "Price must be a positive number");
            None
        }
        None => None,
    }
}

fn trimmed_menu(menu: &WeeklyMenu) -> WeeklyMenu {
    let mut out = menu.clone();
    for day in [
        &mut out.monday,
        &mut out.tuesday,
        &mut out.wednesday,
        &mut out.thursday,
        &mut out.friday,
        &mut out.saturday,
        &mut out.sunday,
    ] {
        for meal in [&mut day.breakfast, &mut day.lunch, &mut day.dinner] {
            *meal = meal.trim().to_owned();
        }
    }
    out
}
