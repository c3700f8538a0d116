use serde::{Deserialize, Serialize};

use crate::{
    error::CoordinateError,
    types::{point::GeoPoint, place::PlaceCategory},
    view::{PageView, ViewEffect},
};

/// Raw coordinates as posted by the browser.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLngInput {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<LatLngInput> for GeoPoint {
    type Error = CoordinateError;

    fn try_from(value: LatLngInput) -> Result<Self, Self::Error> {
        GeoPoint::checked(value.lat, value.lng)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct MountRequest {
    /// `None` when the browser denied or lacks geolocation.
    #[serde(default)]
    pub position: Option<LatLngInput>,
}

#[derive(Deserialize, Debug)]
pub struct CategoryRequest {
    pub category: PlaceCategory,
}

#[derive(Serialize, Debug)]
pub struct MountResponse {
    pub id: u64,
    pub view: PageView,
}

#[derive(Serialize, Debug)]
pub struct SelectionResponse {
    pub effects: Vec<ViewEffect>,
    pub view: PageView,
}
