use crate::{
    error::{ProviderError, SelectionError},
    location::LocationFix,
    types::{
        point::GeoPoint,
        place::{Place, PlaceCategory},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one issued search. Only the ticket matching the latest epoch may
/// write results back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchTicket {
    epoch: u64,
    pub center: GeoPoint,
    pub category: PlaceCategory,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Single source of truth for the nearby page. Map and list only ever see
/// projections of this.
///
/// Invariants kept by every transition:
/// - `selected` names a place in `results`
/// - `Failed` always comes with empty `results`
/// - only the most recently issued ticket can complete
#[derive(Debug, Clone)]
pub struct SearchState {
    category: PlaceCategory,
    center: GeoPoint,
    results: Vec<Place>,
    selected: Option<String>,
    status: SearchStatus,
    location_denied: bool,
    map_ready: bool,
    epoch: u64,
}

impl SearchState {
    pub fn new(default_center: GeoPoint) -> Self {
        Self {
            category: PlaceCategory::default(),
            center: default_center,
            results: Vec::new(),
            selected: None,
            status: SearchStatus::Idle,
            location_denied: false,
            map_ready: false,
            epoch: 0,
        }
    }

    pub fn category(&self) -> PlaceCategory {
        self.category
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn location_denied(&self) -> bool {
        self.location_denied
    }

    pub fn map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn selected(&self) -> Option<&Place> {
        let id = self.selected.as_deref()?;
        self.results.iter().find(|place| place.id == id)
    }

    pub fn mark_map_ready(&mut self) {
        self.map_ready = true;
    }

    pub fn apply_location(&mut self, fix: LocationFix) {
        self.center = fix.point;
        self.location_denied = fix.denied;
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
    }

    /// Switch tabs. Returns false when `category` is already active.
    pub fn switch_category(&mut self, category: PlaceCategory) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        self.status = SearchStatus::Loading;
        self.results.clear();
        self.selected = None;
        true
    }

    /// Start a search for the current center and category, superseding any
    /// search still in flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.epoch += 1;
        self.status = SearchStatus::Loading;
        self.selected = None;
        SearchTicket {
            epoch: self.epoch,
            center: self.center,
            category: self.category,
        }
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Write a provider outcome back, unless a newer search was issued since.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<Place>, ProviderError>,
    ) -> Completion {
        if !self.is_current(&ticket) {
            return Completion::Stale;
        }
        self.selected = None;
        match outcome {
            Ok(places) => {
                self.results = places;
                self.status = SearchStatus::Ready;
            }
            Err(err) => {
                self.results.clear();
                self.status = SearchStatus::Failed(err.reason());
            }
        }
        Completion::Applied
    }

    /// Selection is only possible among ready results.
    pub fn select(&mut self, place_id: &str) -> Result<&Place, SelectionError> {
        if self.status != SearchStatus::Ready {
            return Err(SelectionError::UnknownPlace(place_id.to_string()));
        }
        let place = self
            .results
            .iter()
            .find(|place| place.id == place_id)
            .ok_or_else(|| SelectionError::UnknownPlace(place_id.to_string()))?;
        self.selected = Some(place.id.clone());
        Ok(place)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const DEFAULT: GeoPoint = GeoPoint::new(33.6844, 73.0479);

    pub(crate) fn place(id: &str, name: &str) -> Place {
        Place {
            id: id.to_string(),
            name: name.to_string(),
            address: format!("{name} street"),
            rating: Some(4.0),
            is_open_now: Some(true),
            phone: None,
            coordinates: Some(GeoPoint::new(33.7, 73.05)),
        }
    }

    fn ready_with(ids: &[&str]) -> SearchState {
        let mut state = SearchState::new(DEFAULT);
        let ticket = state.begin_search();
        let places = ids.iter().map(|id| place(id, id)).collect();
        assert_eq!(state.complete(ticket, Ok(places)), Completion::Applied);
        state
    }

    #[test]
    fn starts_idle_at_default_center() {
        let state = SearchState::new(DEFAULT);
        assert_eq!(state.status(), &SearchStatus::Idle);
        assert_eq!(state.center(), DEFAULT);
        assert_eq!(state.category(), PlaceCategory::Lodging);
        assert!(state.results().is_empty());
        assert!(state.selected().is_none());
    }

    #[test]
    fn success_replaces_results_in_order() {
        let mut state = ready_with(&["old"]);
        let ticket = state.begin_search();
        assert_eq!(state.status(), &SearchStatus::Loading);
        state.complete(ticket, Ok(vec![place("a", "Hotel A"), place("b", "Hotel B")]));
        let ids: Vec<&str> = state.results().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(state.status(), &SearchStatus::Ready);
    }

    #[test]
    fn failure_clears_results() {
        let mut state = ready_with(&["a", "b"]);
        state.select("a").unwrap();
        let ticket = state.begin_search();
        state.complete(ticket, Err(ProviderError::Status("INVALID_REQUEST".into())));
        assert!(state.results().is_empty());
        assert!(state.selected().is_none());
        assert_eq!(
            state.status(),
            &SearchStatus::Failed("Failed to load places: INVALID_REQUEST".into())
        );
    }

    #[test]
    fn stale_ticket_is_discarded_in_either_order() {
        let mut state = SearchState::new(DEFAULT);
        let first = state.begin_search();
        let second = state.begin_search();
        assert_eq!(
            state.complete(first, Ok(vec![place("a", "A")])),
            Completion::Stale
        );
        assert_eq!(state.status(), &SearchStatus::Loading);
        assert_eq!(
            state.complete(second, Ok(vec![place("b", "B")])),
            Completion::Applied
        );
        assert_eq!(state.results()[0].id, "b");

        let mut state = SearchState::new(DEFAULT);
        let first = state.begin_search();
        let second = state.begin_search();
        state.complete(second, Ok(vec![place("b", "B")]));
        assert_eq!(
            state.complete(first, Err(ProviderError::Status("UNKNOWN_ERROR".into()))),
            Completion::Stale
        );
        assert_eq!(state.status(), &SearchStatus::Ready);
        assert_eq!(state.results()[0].id, "b");
    }

    #[test]
    fn switching_category_clears_selection_and_results() {
        let mut state = ready_with(&["a", "b"]);
        state.select("b").unwrap();
        assert!(state.switch_category(PlaceCategory::Dining));
        assert_eq!(state.category(), PlaceCategory::Dining);
        assert_eq!(state.status(), &SearchStatus::Loading);
        assert!(state.results().is_empty());
        assert!(state.selected().is_none());
    }

    #[test]
    fn switching_to_active_category_is_a_no_op() {
        let mut state = ready_with(&["a"]);
        state.select("a").unwrap();
        assert!(!state.switch_category(PlaceCategory::Lodging));
        assert_eq!(state.selected().map(|p| p.id.as_str()), Some("a"));
        assert_eq!(state.status(), &SearchStatus::Ready);
    }

    #[test]
    fn selection_must_reference_a_result() {
        let mut state = ready_with(&["a", "b"]);
        assert_eq!(
            state.select("zzz").unwrap_err(),
            SelectionError::UnknownPlace("zzz".into())
        );
        assert!(state.selected().is_none());
        assert_eq!(state.select("b").unwrap().id, "b");
        state.deselect();
        assert!(state.selected().is_none());
    }

    #[test]
    fn nothing_is_selectable_while_loading() {
        let mut state = ready_with(&["a"]);
        state.begin_search();
        assert!(state.select("a").is_err());
    }

    #[test]
    fn selection_never_dangles_across_event_sequences() {
        let mut state = ready_with(&["a", "b"]);
        let steps: Vec<Box<dyn Fn(&mut SearchState)>> = vec![
            Box::new(|s| {
                let _ = s.select("a");
            }),
            Box::new(|s| {
                s.switch_category(PlaceCategory::Dining);
            }),
            Box::new(|s| {
                let t = s.begin_search();
                s.complete(t, Ok(vec![place("c", "C")]));
            }),
            Box::new(|s| {
                let _ = s.select("c");
            }),
            Box::new(|s| {
                let t = s.begin_search();
                s.complete(t, Err(ProviderError::Status("OVER_QUERY_LIMIT".into())));
            }),
            Box::new(|s| {
                let _ = s.select("c");
            }),
        ];
        for step in steps {
            step(&mut state);
            if let Some(selected) = &state.selected {
                assert!(state.results().iter().any(|p| &p.id == selected));
            }
            if matches!(state.status(), SearchStatus::Failed(_)) {
                assert!(state.results().is_empty());
            }
        }
    }
}
