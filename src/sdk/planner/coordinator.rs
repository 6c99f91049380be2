//! Waypoint and route state machine.
//!
//! The coordinator is synchronous: handling an event may yield a [`Request`]
//! that the caller performs asynchronously, then feeds back through
//! [`RouteCoordinator::on_route_resolved`] or
//! [`RouteCoordinator::on_address_resolved`] together with the request's
//! token. Outcomes whose token has been superseded are dropped.

use super::adapters::Adapters;
use super::events::PlannerEvent;
use super::waypoint::{Role, WaypointStore};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::Address;
use crate::sdk::routing::route::{Coord, RouteRequest, RouteResult};
use serde::Serialize;
use std::fmt;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const ROUTE_ERROR_MESSAGE: &str = "There was a problem calculating the route";
pub const ADDRESS_ERROR_MESSAGE: &str = "Address not found, please choose a different place";
pub const NO_RESULTS_MESSAGE: &str = "No results found";
pub const FIT_PADDING: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteState {
    /// No waypoint set.
    Empty,
    /// Exactly one waypoint set.
    Partial,
    /// A route request is in flight.
    Loading,
    /// A route is drawn.
    Success,
    /// The last route request or address lookup failed.
    Failed,
}

/// Identifies one issued request. Tokens increase monotonically across
/// both request kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Work the caller must perform on the coordinator's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Route {
        token: RequestToken,
        request: RouteRequest,
    },
    ReverseGeocode {
        token: RequestToken,
        coord: Coord,
    },
}

impl Request {
    pub fn token(&self) -> RequestToken {
        match self {
            Request::Route { token, .. } | Request::ReverseGeocode { token, .. } => *token,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingDrag {
    token: RequestToken,
    role: Role,
    coord: Coord,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannerSnapshot {
    pub state: RouteState,
    pub waypoints: WaypointStore,
    pub route_in_flight: bool,
    pub lookup_in_flight: bool,
}

pub struct RouteCoordinator {
    store: WaypointStore,
    state: RouteState,
    adapters: Adapters,
    /// Where each role's marker currently sits, as far as we know.
    markers: [Option<Coord>; 2],
    /// Route endpoints for the current waypoints, while that route is drawn.
    snapped: Option<(Coord, Coord)>,
    next_token: u64,
    pending_route: Option<(RequestToken, RouteRequest)>,
    pending_drag: Option<PendingDrag>,
}

impl RouteCoordinator {
    pub fn new(adapters: Adapters) -> Self {
        Self {
            store: WaypointStore::new(),
            state: RouteState::Empty,
            adapters,
            markers: [None; 2],
            snapped: None,
            next_token: 0,
            pending_route: None,
            pending_drag: None,
        }
    }

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    /// The route request currently awaited, if any.
    pub fn pending_route(&self) -> Option<RouteRequest> {
        self.pending_route.map(|(_, request)| request)
    }

    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            state: self.state,
            waypoints: self.store.clone(),
            route_in_flight: self.pending_route.is_some(),
            lookup_in_flight: self.pending_drag.is_some(),
        }
    }

    pub fn handle(&mut self, event: PlannerEvent) -> Option<Request> {
        log::debug!("Handling {:?} in state {:?}", event, self.state);
        match event {
            PlannerEvent::WaypointSet { role, coord } => self.set_waypoint(role, coord),
            PlannerEvent::PresetSelected(preset) => {
                log::info!("{} selected as start", preset);
                self.set_waypoint(Role::Start, preset.coordinate())
            }
            PlannerEvent::WaypointCleared(role) => {
                self.clear_waypoint(role);
                None
            }
            PlannerEvent::DragReposition { role, coord } => self.begin_drag(role, coord),
            PlannerEvent::NothingFound(role) => {
                log::info!("Search for {} returned no candidates", role);
                self.adapters.presenter.error(NO_RESULTS_MESSAGE);
                None
            }
        }
    }

    pub fn on_route_resolved(
        &mut self,
        token: RequestToken,
        outcome: Result<RouteResult, RoutingError>,
    ) {
        match self.pending_route {
            Some((current, _)) if current == token => self.pending_route = None,
            _ => {
                log::debug!("Discarding stale route response {}", token);
                return;
            }
        }
        match outcome {
            Ok(result) => self.route_succeeded(result),
            Err(e) => {
                log::warn!("Route computation {} failed: {}", token, e);
                self.route_failed();
            }
        }
    }

    /// Completes a drag. A usable address turns the drag into a normal
    /// waypoint update, which may in turn yield a route request.
    pub fn on_address_resolved(
        &mut self,
        token: RequestToken,
        outcome: Result<Option<Address>, RoutingError>,
    ) -> Option<Request> {
        let drag = match self.pending_drag {
            Some(drag) if drag.token == token => drag,
            _ => {
                log::debug!("Discarding stale address response {}", token);
                return None;
            }
        };
        self.pending_drag = None;

        let address = match outcome {
            Ok(address) => address.filter(Address::is_usable),
            Err(e) => {
                log::warn!("Reverse geocode {} failed: {}", token, e);
                None
            }
        };
        match address {
            Some(address) => {
                log::info!("{} moved to {:?}", drag.role, address.freeform);
                self.adapters
                    .search
                    .show_address(drag.role, &address.freeform);
                self.set_waypoint(drag.role, address.position.unwrap_or(drag.coord))
            }
            None => {
                self.drag_rejected(drag.role);
                None
            }
        }
    }

    fn set_waypoint(&mut self, role: Role, coord: Coord) -> Option<Request> {
        self.store.set(role, coord);
        self.snapped = None;
        self.supersede_route();
        if self.pending_drag.is_some_and(|d| d.role == role) {
            self.pending_drag = None;
        }
        self.reconcile_markers();

        match self.store.route_request() {
            Some(request) => {
                let token = self.issue_token();
                log::info!(
                    "Requesting route {} from {:?} to {:?}",
                    token,
                    request.start,
                    request.finish
                );
                self.adapters.presenter.hide_error();
                self.adapters.presenter.loading(LOADING_MESSAGE);
                self.pending_route = Some((token, request));
                self.set_state(RouteState::Loading);
                Some(Request::Route { token, request })
            }
            None => {
                self.adapters.map.recenter(coord);
                self.set_state(RouteState::Partial);
                None
            }
        }
    }

    fn clear_waypoint(&mut self, role: Role) {
        self.store.clear(role);
        self.snapped = None;
        self.supersede_route();
        if self.pending_drag.is_some_and(|d| d.role == role) {
            self.pending_drag = None;
        }
        self.reconcile_markers();

        self.adapters.presenter.hide_loading();
        self.adapters.presenter.hide_error();
        self.adapters.presenter.empty();
        match self.store.get(role.other()) {
            Some(remaining) => {
                self.adapters.map.clear_route();
                self.adapters.map.recenter(remaining);
                self.set_state(RouteState::Partial);
            }
            None => self.set_state(RouteState::Empty),
        }
    }

    fn begin_drag(&mut self, role: Role, coord: Coord) -> Option<Request> {
        if self.store.get(role).is_none() {
            log::warn!("Ignoring drag of {} marker without a waypoint", role);
            return None;
        }
        // The marker already sits where the user dropped it.
        self.markers[role.index()] = Some(coord);

        let token = self.issue_token();
        if let Some(previous) = self.pending_drag.replace(PendingDrag { token, role, coord }) {
            log::debug!("Address lookup {} superseded by {}", previous.token, token);
        }
        log::info!("Looking up address {} for {} at {:?}", token, role, coord);
        Some(Request::ReverseGeocode { token, coord })
    }

    fn route_succeeded(&mut self, result: RouteResult) {
        let (Some(endpoints), Some(bounds)) = (result.endpoints(), result.bounds()) else {
            log::warn!("Route response carried no geometry");
            self.route_failed();
            return;
        };
        log::info!(
            "Route found: {:.1} km, {:.2} hrs",
            result.summary.distance_km(),
            result.summary.duration_hours()
        );

        self.adapters.map.clear_route();
        self.adapters.map.draw_route(&result.geometry);
        self.snapped = Some(endpoints);
        self.reconcile_markers();
        self.adapters.map.fit_bounds(bounds, FIT_PADDING);
        self.adapters.presenter.success(&result.summary);
        self.adapters.presenter.hide_loading();
        self.set_state(RouteState::Success);
    }

    fn route_failed(&mut self) {
        self.adapters.map.clear_route();
        self.snapped = None;
        self.reconcile_markers();
        self.adapters.presenter.not_found();
        self.adapters.presenter.error(ROUTE_ERROR_MESSAGE);
        self.adapters.presenter.hide_loading();
        self.set_state(RouteState::Failed);
    }

    fn drag_rejected(&mut self, role: Role) {
        log::info!("No address for dragged {} marker, keeping previous waypoint", role);
        self.supersede_route();
        self.adapters.presenter.hide_loading();
        self.adapters.map.clear_route();
        self.snapped = None;
        // Puts the dragged marker back on the stored waypoint.
        self.reconcile_markers();
        self.adapters.presenter.not_found();
        self.adapters.presenter.error(ADDRESS_ERROR_MESSAGE);
        self.set_state(RouteState::Failed);
    }

    /// Brings every marker in line with the store: present iff its waypoint
    /// is set, on the route endpoint while a route is drawn, else on the
    /// waypoint itself.
    fn reconcile_markers(&mut self) {
        for role in Role::ALL {
            let target = self.store.get(role).map(|coord| match (self.snapped, role) {
                (Some((start, _)), Role::Start) => start,
                (Some((_, finish)), Role::Finish) => finish,
                (None, _) => coord,
            });
            let placed = &mut self.markers[role.index()];
            match target {
                Some(coord) if *placed != Some(coord) => {
                    self.adapters.markers.ensure(role, coord);
                    *placed = Some(coord);
                }
                None if placed.is_some() => {
                    self.adapters.markers.remove(role);
                    *placed = None;
                }
                _ => {}
            }
        }
    }

    fn supersede_route(&mut self) {
        if let Some((token, _)) = self.pending_route.take() {
            log::debug!("Route request {} superseded", token);
        }
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    fn set_state(&mut self, state: RouteState) {
        if self.state != state {
            log::debug!("Route state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::planner::adapters::PresentationState;
    use crate::sdk::planner::headless::{HeadlessSurface, SurfaceCall};
    use crate::sdk::routing::route::RouteSummary;

    const START: Coord = (106.845, -6.215);
    const FINISH: Coord = (106.90, -6.20);

    fn coordinator() -> (RouteCoordinator, HeadlessSurface) {
        let surface = HeadlessSurface::new();
        (RouteCoordinator::new(surface.adapters()), surface)
    }

    fn route() -> RouteResult {
        RouteResult {
            geometry: vec![(106.8451, -6.2149), (106.87, -6.21), (106.8999, -6.2001)],
            summary: RouteSummary {
                distance_meters: 8_123.0,
                travel_time_seconds: 1_260.0,
                arrival_time: None,
            },
        }
    }

    fn set(c: &mut RouteCoordinator, role: Role, coord: Coord) -> Option<Request> {
        c.handle(PlannerEvent::WaypointSet { role, coord })
    }

    fn route_token(request: Option<Request>) -> RequestToken {
        match request {
            Some(Request::Route { token, .. }) => token,
            other => panic!("expected a route request, got {:?}", other),
        }
    }

    fn address(text: &str, position: Option<Coord>) -> Address {
        Address {
            freeform: text.to_string(),
            position,
        }
    }

    #[test]
    fn one_waypoint_recenters_without_requesting() {
        let (mut c, surface) = coordinator();
        assert!(set(&mut c, Role::Start, START).is_none());
        assert_eq!(c.state(), RouteState::Partial);

        let model = surface.model();
        assert_eq!(model.marker(Role::Start), Some(START));
        assert_eq!(model.marker(Role::Finish), None);
        assert_eq!(model.center, Some(START));
    }

    #[test]
    fn both_waypoints_issue_exactly_one_request() {
        let (mut c, surface) = coordinator();
        assert!(set(&mut c, Role::Start, START).is_none());
        let request = set(&mut c, Role::Finish, FINISH);
        match request {
            Some(Request::Route { request, .. }) => {
                assert_eq!(request, RouteRequest { start: START, finish: FINISH });
            }
            other => panic!("expected a route request, got {:?}", other),
        }
        assert_eq!(c.state(), RouteState::Loading);
        assert_eq!(
            surface.model().panel,
            PresentationState::Loading {
                message: LOADING_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn success_draws_route_and_moves_markers_to_endpoints() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(token, Ok(route()));

        assert_eq!(c.state(), RouteState::Success);
        let model = surface.model();
        assert_eq!(model.route_layers.len(), 1);
        assert_eq!(model.marker(Role::Start), Some((106.8451, -6.2149)));
        assert_eq!(model.marker(Role::Finish), Some((106.8999, -6.2001)));
        let (bounds, padding) = model.bounds.unwrap();
        assert_eq!(padding, FIT_PADDING);
        assert_eq!(bounds.min().x_y(), (106.8451, -6.2149));
        assert!(matches!(model.panel, PresentationState::Success { .. }));
        assert!(model.loading_hint.is_none());
        // store keeps what the user picked
        assert_eq!(c.store().get(Role::Start), Some(START));
    }

    #[test]
    fn success_side_effects_run_in_order() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        surface.take_journal();
        c.on_route_resolved(token, Ok(route()));

        let calls = surface.take_journal();
        let kinds: Vec<&str> = calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::ClearRoute => Some("clear"),
                SurfaceCall::DrawRoute(_) => Some("draw"),
                SurfaceCall::EnsureMarker(..) => Some("marker"),
                SurfaceCall::FitBounds(..) => Some("fit"),
                SurfaceCall::Success(_) => Some("success"),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, ["clear", "draw", "marker", "marker", "fit", "success"]);
    }

    #[test]
    fn second_success_replaces_the_route_layer() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let first = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(first, Ok(route()));
        let second = route_token(set(&mut c, Role::Finish, (106.91, -6.19)));
        c.on_route_resolved(second, Ok(route()));

        assert_eq!(surface.model().route_layers.len(), 1);
    }

    #[test]
    fn failure_clears_route_and_reports() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(token, Err(RoutingError::UnroutablePoint));

        assert_eq!(c.state(), RouteState::Failed);
        let model = surface.model();
        assert!(model.route_layers.is_empty());
        assert_eq!(model.panel, PresentationState::NotFound);
        assert_eq!(model.error_hint.as_deref(), Some(ROUTE_ERROR_MESSAGE));
        // markers stay on the waypoints
        assert_eq!(model.marker(Role::Start), Some(START));
        assert_eq!(model.marker(Role::Finish), Some(FINISH));
    }

    #[test]
    fn empty_geometry_counts_as_failure() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        let mut result = route();
        result.geometry.clear();
        c.on_route_resolved(token, Ok(result));

        assert_eq!(c.state(), RouteState::Failed);
        assert_eq!(surface.model().panel, PresentationState::NotFound);
    }

    #[test]
    fn stale_route_response_is_ignored() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let old = route_token(set(&mut c, Role::Finish, FINISH));
        let new = route_token(set(&mut c, Role::Finish, (106.91, -6.19)));
        assert!(new > old);

        c.on_route_resolved(new, Err(RoutingError::UnroutablePoint));
        c.on_route_resolved(old, Ok(route()));

        assert_eq!(c.state(), RouteState::Failed);
        assert!(surface.model().route_layers.is_empty());
    }

    #[test]
    fn clearing_one_of_two_recenters_on_the_other() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(token, Ok(route()));

        assert!(c.handle(PlannerEvent::WaypointCleared(Role::Finish)).is_none());
        assert_eq!(c.state(), RouteState::Partial);
        let model = surface.model();
        assert_eq!(model.marker(Role::Finish), None);
        // back on the waypoint now that no route is drawn
        assert_eq!(model.marker(Role::Start), Some(START));
        assert!(model.route_layers.is_empty());
        assert_eq!(model.center, Some(START));
        assert_eq!(model.panel, PresentationState::Empty);
    }

    #[test]
    fn clearing_while_loading_abandons_the_request() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.handle(PlannerEvent::WaypointCleared(Role::Start));
        assert!(c.pending_route().is_none());

        c.on_route_resolved(token, Ok(route()));
        assert_eq!(c.state(), RouteState::Partial);
        assert!(surface.model().route_layers.is_empty());
    }

    #[test]
    fn clearing_the_only_waypoint_empties_everything() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        c.handle(PlannerEvent::WaypointCleared(Role::Start));

        assert_eq!(c.state(), RouteState::Empty);
        let model = surface.model();
        assert_eq!(model.marker(Role::Start), None);
        assert_eq!(model.panel, PresentationState::Empty);
    }

    #[test]
    fn preset_sets_the_start() {
        let (mut c, _surface) = coordinator();
        c.handle(PlannerEvent::PresetSelected(
            crate::sdk::planner::presets::PresetPoint::B,
        ));
        assert_eq!(c.store().get(Role::Start), Some((106.84513, -6.21462)));
    }

    #[test]
    fn drag_with_address_updates_waypoint_and_search_box() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        set(&mut c, Role::Finish, FINISH);

        let dropped = (106.95, -6.25);
        let request = c.handle(PlannerEvent::DragReposition {
            role: Role::Finish,
            coord: dropped,
        });
        let token = match request {
            Some(Request::ReverseGeocode { token, coord }) => {
                assert_eq!(coord, dropped);
                token
            }
            other => panic!("expected a lookup, got {:?}", other),
        };

        let snapped = (106.9501, -6.2502);
        let next = c.on_address_resolved(token, Ok(Some(address("Jalan Casablanca", Some(snapped)))));
        match next {
            Some(Request::Route { request, .. }) => assert_eq!(request.finish, snapped),
            other => panic!("expected a route request, got {:?}", other),
        }
        assert_eq!(c.store().get(Role::Finish), Some(snapped));
        assert_eq!(surface.model().search_input(Role::Finish), "Jalan Casablanca");
    }

    #[test]
    fn drag_address_without_position_uses_dropped_coordinate() {
        let (mut c, _surface) = coordinator();
        set(&mut c, Role::Start, START);
        let dropped = (106.85, -6.22);
        let token = c
            .handle(PlannerEvent::DragReposition {
                role: Role::Start,
                coord: dropped,
            })
            .unwrap()
            .token();
        assert!(c
            .on_address_resolved(token, Ok(Some(address("Kuningan", None))))
            .is_none());
        assert_eq!(c.store().get(Role::Start), Some(dropped));
        assert_eq!(c.state(), RouteState::Partial);
    }

    #[test]
    fn drag_without_address_is_rejected() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(token, Ok(route()));

        let lookup = c
            .handle(PlannerEvent::DragReposition {
                role: Role::Finish,
                coord: (0.0, 0.0),
            })
            .unwrap()
            .token();
        assert!(c
            .on_address_resolved(lookup, Ok(Some(address("", Some((0.0, 0.0))))))
            .is_none());

        assert_eq!(c.state(), RouteState::Failed);
        assert_eq!(c.store().get(Role::Finish), Some(FINISH));
        let model = surface.model();
        assert_eq!(model.panel, PresentationState::NotFound);
        assert_eq!(model.error_hint.as_deref(), Some(ADDRESS_ERROR_MESSAGE));
        assert!(model.route_layers.is_empty());
        assert_eq!(model.marker(Role::Finish), Some(FINISH));
    }

    #[test]
    fn failed_lookup_is_treated_like_missing_address() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = c
            .handle(PlannerEvent::DragReposition {
                role: Role::Start,
                coord: (1.0, 1.0),
            })
            .unwrap()
            .token();
        c.on_address_resolved(token, Err(RoutingError::Generic("offline".into())));

        assert_eq!(c.state(), RouteState::Failed);
        assert_eq!(c.store().get(Role::Start), Some(START));
        assert_eq!(surface.model().error_hint.as_deref(), Some(ADDRESS_ERROR_MESSAGE));
    }

    #[test]
    fn newer_drag_supersedes_older_lookup() {
        let (mut c, _surface) = coordinator();
        set(&mut c, Role::Start, START);
        let drag = |c: &mut RouteCoordinator, coord| {
            c.handle(PlannerEvent::DragReposition {
                role: Role::Start,
                coord,
            })
            .unwrap()
            .token()
        };
        let old = drag(&mut c, (1.0, 1.0));
        let new = drag(&mut c, (2.0, 2.0));

        assert!(c
            .on_address_resolved(new, Ok(Some(address("Newer", Some((2.0, 2.0))))))
            .is_none());
        c.on_address_resolved(old, Ok(Some(address("Older", Some((1.0, 1.0))))));
        assert_eq!(c.store().get(Role::Start), Some((2.0, 2.0)));
    }

    #[test]
    fn setting_a_role_drops_its_pending_lookup() {
        let (mut c, _surface) = coordinator();
        set(&mut c, Role::Start, START);
        let lookup = c
            .handle(PlannerEvent::DragReposition {
                role: Role::Start,
                coord: (1.0, 1.0),
            })
            .unwrap()
            .token();
        set(&mut c, Role::Start, (3.0, 3.0));

        assert!(c.on_address_resolved(lookup, Ok(None)).is_none());
        assert_eq!(c.state(), RouteState::Partial);
        assert_eq!(c.store().get(Role::Start), Some((3.0, 3.0)));
        assert!(!c.snapshot().lookup_in_flight);
    }

    #[test]
    fn clearing_a_role_drops_its_pending_lookup() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let lookup = c
            .handle(PlannerEvent::DragReposition {
                role: Role::Start,
                coord: (1.0, 1.0),
            })
            .unwrap()
            .token();
        c.handle(PlannerEvent::WaypointCleared(Role::Start));

        let late = address("Somewhere", Some((1.0, 1.0)));
        assert!(c.on_address_resolved(lookup, Ok(Some(late))).is_none());
        assert_eq!(c.state(), RouteState::Empty);
        assert_eq!(c.store().get(Role::Start), None);
        assert_eq!(surface.model().marker(Role::Start), None);
    }

    #[test]
    fn clearing_after_a_failed_route_hides_the_error() {
        let (mut c, surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        c.on_route_resolved(token, Err(RoutingError::UnroutablePoint));
        assert_eq!(surface.model().error_hint.as_deref(), Some(ROUTE_ERROR_MESSAGE));

        c.handle(PlannerEvent::WaypointCleared(Role::Finish));
        assert!(surface.model().error_hint.is_none());
        c.handle(PlannerEvent::WaypointCleared(Role::Start));
        let model = surface.model();
        assert!(model.error_hint.is_none());
        assert_eq!(model.panel, PresentationState::Empty);
    }

    #[test]
    fn drag_of_unset_role_is_ignored() {
        let (mut c, _surface) = coordinator();
        assert!(c
            .handle(PlannerEvent::DragReposition {
                role: Role::Finish,
                coord: FINISH,
            })
            .is_none());
    }

    #[test]
    fn nothing_found_shows_error_hint() {
        let (mut c, surface) = coordinator();
        c.handle(PlannerEvent::NothingFound(Role::Start));
        assert_eq!(surface.model().error_hint.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert_eq!(c.state(), RouteState::Empty);
    }

    #[test]
    fn loading_state_tracks_the_pending_request() {
        let (mut c, _surface) = coordinator();
        set(&mut c, Role::Start, START);
        let token = route_token(set(&mut c, Role::Finish, FINISH));
        assert!(c.snapshot().route_in_flight);
        c.on_route_resolved(token, Ok(route()));
        let snapshot = c.snapshot();
        assert!(!snapshot.route_in_flight);
        assert_eq!(snapshot.state, RouteState::Success);
    }
}
