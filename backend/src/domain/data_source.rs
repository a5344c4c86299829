//! Read strategy for listing data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Demo property the fixture student dashboard shows as the booking.
pub const DEMO_PROPERTY_ID: &str = "prop1";

/// Where reads are served from.
///
/// `Fixture` serves the bundled demo catalogue and is chosen once at the top
/// of a request; nothing below the handler branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Live,
    Fixture,
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "fixture" | "demo" => Ok(Self::Fixture),
            other => Err(format!("unknown data source: {other}")),
        }
    }
}
