use serde::{Deserialize, Serialize};

use crate::types::{point::GeoPoint, place::Place};

// Shapes returned by the Places nearby search endpoint

#[derive(Serialize, Deserialize, Debug)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub error_message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlaceGeometry {
    pub location: LatLngLiteral,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<PlaceResult> for Place {
    fn from(value: PlaceResult) -> Self {
        Place {
            id: value.place_id,
            name: value.name,
            address: value.vicinity.unwrap_or_default(),
            rating: value.rating,
            is_open_now: value.opening_hours.and_then(|hours| hours.open_now),
            phone: value.formatted_phone_number,
            coordinates: value
                .geometry
                .map(|geometry| GeoPoint::new(geometry.location.lat, geometry.location.lng)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ok_response() {
        let body = r#"{
            "html_attributions": [],
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJa",
                    "name": "Hotel A",
                    "vicinity": "Blue Area, Islamabad",
                    "rating": 4.3,
                    "opening_hours": { "open_now": true },
                    "geometry": { "location": { "lat": 33.71, "lng": 73.06 } },
                    "types": ["lodging", "point_of_interest"]
                },
                { "place_id": "ChIJb", "name": "Hotel B" }
            ]
        }"#;
        let response: NearbySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        let places: Vec<Place> = response.results.into_iter().map(Place::from).collect();
        assert_eq!(places[0].id, "ChIJa");
        assert_eq!(places[0].address, "Blue Area, Islamabad");
        assert_eq!(places[0].is_open_now, Some(true));
        assert_eq!(places[0].coordinates, Some(GeoPoint::new(33.71, 73.06)));
        assert_eq!(places[1].address, "");
        assert_eq!(places[1].rating, None);
        assert_eq!(places[1].coordinates, None);
    }

    #[test]
    fn decodes_error_response_without_results() {
        let body = r#"{ "status": "REQUEST_DENIED", "error_message": "The provided API key is invalid." }"#;
        let response: NearbySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "REQUEST_DENIED");
        assert!(response.results.is_empty());
        assert!(response.error_message.is_some());
    }
}
