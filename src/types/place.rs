use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::GeoPoint;

/// Which kind of place the page is browsing. Exactly one is active at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    #[default]
    Lodging,
    Dining,
}

impl PlaceCategory {
    /// The provider's own type vocabulary for this category.
    pub fn provider_type(&self) -> &'static str {
        match self {
            PlaceCategory::Lodging => "lodging",
            PlaceCategory::Dining => "restaurant",
        }
    }

    /// Plural noun used in user facing copy.
    pub fn plural(&self) -> &'static str {
        match self {
            PlaceCategory::Lodging => "hotels",
            PlaceCategory::Dining => "restaurants",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_type())
    }
}

/// A single provider result. Never mutated once returned; a new query
/// produces a fresh set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub is_open_now: Option<bool>,
    pub phone: Option<String>,
    pub coordinates: Option<GeoPoint>,
}
