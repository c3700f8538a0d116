use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ProviderError, SelectionError},
    location::{LocationResolver, LocationService},
    places::{NearbyQuery, PlacesProvider},
    search_state::{Completion, SearchState},
    types::{point::GeoPoint, place::PlaceCategory},
    view::{PageView, ViewEffect},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Timeouts {
    pub search: Option<Duration>,
    pub location: Option<Duration>,
}

/// Page level coordinator for nearby discovery. Sole writer of the
/// [`SearchState`]; the map and list only receive projections and report
/// events back through these methods.
pub struct NearbyPage<P, L> {
    provider: P,
    resolver: LocationResolver<L>,
    search_timeout: Option<Duration>,
    state: Mutex<SearchState>,
}

impl<P, L> NearbyPage<P, L>
where
    P: PlacesProvider + Send + Sync,
    L: LocationService + Send + Sync,
{
    pub fn new(provider: P, location: Option<L>, default_center: GeoPoint, timeouts: Timeouts) -> Self {
        Self {
            provider,
            resolver: LocationResolver::new(location, default_center).with_timeout(timeouts.location),
            search_timeout: timeouts.search,
            state: Mutex::new(SearchState::new(default_center)),
        }
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> PageView {
        PageView::from(&*self.state.lock().await)
    }

    /// The map surface is live: find out where we are, then search there.
    /// Searches stay parked until the center is known.
    #[instrument(skip(self))]
    pub async fn map_ready(&self) {
        let fix = self.resolver.resolve().await;
        info!(denied = fix.denied, "resolved center {:?}", fix.point);
        {
            let mut state = self.state.lock().await;
            state.apply_location(fix);
            state.mark_map_ready();
        }
        self.search().await;
    }

    /// Switch tabs and search the new category around the current center.
    #[instrument(skip(self))]
    pub async fn set_category(&self, category: PlaceCategory) {
        let should_search = {
            let mut state = self.state.lock().await;
            state.switch_category(category) && state.map_ready()
        };
        if should_search {
            self.search().await;
        }
    }

    /// The page reported a new center.
    #[instrument(skip(self))]
    pub async fn set_center(&self, center: GeoPoint) {
        let should_search = {
            let mut state = self.state.lock().await;
            state.set_center(center);
            state.map_ready()
        };
        if should_search {
            self.search().await;
        }
    }

    /// Query the provider for the current center and category. A response
    /// that arrives after a newer search was issued is dropped.
    pub async fn search(&self) {
        let ticket = self.state.lock().await.begin_search();
        let query = NearbyQuery::new(ticket.center, ticket.category);
        let outcome = match self.search_timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.nearby_search(&query))
                .await
                .unwrap_or(Err(ProviderError::TimedOut)),
            None => self.provider.nearby_search(&query).await,
        };
        if let Err(err) = &outcome {
            warn!("nearby search for {} failed: {err}", ticket.category);
        }
        match self.state.lock().await.complete(ticket, outcome) {
            Completion::Applied => debug!("applied {} search", ticket.category),
            Completion::Stale => debug!("discarded stale {} response", ticket.category),
        }
    }

    /// A marker or list card was clicked.
    #[instrument(skip(self))]
    pub async fn select(&self, place_id: &str) -> Result<Vec<ViewEffect>, SelectionError> {
        let mut state = self.state.lock().await;
        let place = state.select(place_id)?;
        let mut effects = Vec::with_capacity(3);
        if let Some(center) = place.coordinates {
            effects.push(ViewEffect::PanTo { center });
            effects.push(ViewEffect::OpenInfo {
                place_id: place.id.clone(),
            });
        }
        effects.push(ViewEffect::ScrollListIntoView);
        Ok(effects)
    }

    /// The map's info window was dismissed.
    pub async fn deselect(&self) -> Vec<ViewEffect> {
        self.state.lock().await.deselect();
        vec![ViewEffect::CloseInfo]
    }
}
