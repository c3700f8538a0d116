use async_trait::async_trait;
use futures::TryFutureExt;
use tracing::{debug, instrument, warn};

use crate::{
    error::ProviderError,
    types::{
        dto::places::NearbySearchResponse,
        point::GeoPoint,
        place::{Place, PlaceCategory},
    },
};

/// Every nearby search covers 10 km around the center.
pub const SEARCH_RADIUS_M: u32 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub location: GeoPoint,
    pub radius_m: u32,
    pub kind: &'static str,
}

impl NearbyQuery {
    pub fn new(location: GeoPoint, category: PlaceCategory) -> Self {
        Self {
            location,
            radius_m: SEARCH_RADIUS_M,
            kind: category.provider_type(),
        }
    }
}

/// Third-party places search.
#[async_trait]
pub trait PlacesProvider {
    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<Place>, ProviderError>;
}

/// Google Places nearby search over plain HTTP.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<Place>, ProviderError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                (
                    "location",
                    format!("{},{}", query.location.latitude, query.location.longitude),
                ),
                ("radius", query.radius_m.to_string()),
                ("type", query.kind.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .and_then(|r| async move { r.error_for_status()?.json::<NearbySearchResponse>().await })
            .await
            .map_err(|err| {
                let err = err.without_url();
                warn!("places request failed: {err}");
                ProviderError::from(err)
            })?;
        into_places(response)
    }
}

fn into_places(response: NearbySearchResponse) -> Result<Vec<Place>, ProviderError> {
    if response.status != "OK" {
        if let Some(message) = &response.error_message {
            warn!("places provider returned {}: {message}", response.status);
        }
        return Err(ProviderError::Status(response.status));
    }
    debug!("places provider returned {} results", response.results.len());
    Ok(response.results.into_iter().map(Place::from).collect())
}
