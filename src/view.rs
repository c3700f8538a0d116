use serde::Serialize;

use crate::{
    search_state::{SearchState, SearchStatus},
    types::{
        point::GeoPoint,
        place::{Place, PlaceCategory},
    },
};

pub const LOCATION_ADVISORY: &str =
    "Using default location. Enable location services for more accurate results.";

/// Side effects SelectionSync asks the surfaces to perform.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ViewEffect {
    PanTo { center: GeoPoint },
    OpenInfo { place_id: String },
    CloseInfo,
    ScrollListIntoView,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub position: GeoPoint,
}

/// Everything the map surface needs.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MapProps {
    pub center: GeoPoint,
    pub markers: Vec<Marker>,
    pub active_marker: Option<Marker>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub is_open_now: Option<bool>,
    pub phone: Option<String>,
    pub distance_m: Option<f64>,
}

/// Everything the list surface needs. `items` is empty while loading so the
/// list shows its placeholders rather than stale cards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListProps {
    pub heading: String,
    pub summary: String,
    pub items: Vec<ListItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_message: Option<String>,
    pub active_item: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: &'static str,
}

/// Full read-only view of one page.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PageView {
    pub category: PlaceCategory,
    pub tagline: &'static str,
    pub banner: Option<Banner>,
    pub map: MapProps,
    pub list: ListProps,
}

fn marker(place: &Place) -> Option<Marker> {
    place.coordinates.map(|position| Marker {
        id: place.id.clone(),
        name: place.name.clone(),
        position,
    })
}

/// Results are only shown once a search has settled successfully.
fn visible_results(state: &SearchState) -> &[Place] {
    match state.status() {
        SearchStatus::Ready => state.results(),
        _ => &[],
    }
}

impl From<&SearchState> for MapProps {
    fn from(state: &SearchState) -> Self {
        MapProps {
            center: state.center(),
            markers: visible_results(state).iter().filter_map(marker).collect(),
            active_marker: state.selected().and_then(marker),
        }
    }
}

impl From<&SearchState> for ListProps {
    fn from(state: &SearchState) -> Self {
        let category = state.category();
        let center = state.center();
        let loading = matches!(state.status(), SearchStatus::Loading);
        let error = match state.status() {
            SearchStatus::Failed(reason) => Some(reason.clone()),
            _ => None,
        };
        let items: Vec<ListItem> = visible_results(state)
            .iter()
            .map(|place| ListItem {
                id: place.id.clone(),
                name: place.name.clone(),
                address: place.address.clone(),
                rating: place.rating,
                is_open_now: place.is_open_now,
                phone: place.phone.clone(),
                distance_m: place.coordinates.map(|point| center.distance_to(&point)),
            })
            .collect();
        let summary = if loading {
            "Loading...".to_string()
        } else {
            format!("{} places found", items.len())
        };
        let empty_message = (!loading && items.is_empty())
            .then(|| format!("No {} found in this area", category.plural()));
        ListProps {
            heading: match category {
                PlaceCategory::Lodging => "Nearby Hotels".to_string(),
                PlaceCategory::Dining => "Nearby Restaurants".to_string(),
            },
            summary,
            items,
            loading,
            error,
            empty_message,
            active_item: state.selected().map(|place| place.id.clone()),
        }
    }
}

impl From<&SearchState> for PageView {
    fn from(state: &SearchState) -> Self {
        PageView {
            category: state.category(),
            tagline: match state.category() {
                PlaceCategory::Lodging => "Find the best hotels in your area",
                PlaceCategory::Dining => "Explore delicious dining options nearby",
            },
            banner: state.location_denied().then_some(Banner {
                message: LOCATION_ADVISORY,
            }),
            map: state.into(),
            list: state.into(),
        }
    }
}
