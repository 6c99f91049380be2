//! In-memory rendering surface.
//!
//! Keeps the state a real map and panel would show (markers, drawn route
//! layers, panel mode, hints, search inputs) plus a journal of every call.
//! The CLI renders from it and the tests assert against it.

use super::adapters::{Adapters, MapView, MarkerAdapter, PresentationState, ResultsPresenter, SearchDisplay};
use super::waypoint::Role;
use crate::sdk::routing::route::{BoundingBox, Coord, RouteSummary};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    EnsureMarker(Role, Coord),
    RemoveMarker(Role),
    Recenter(Coord),
    FitBounds(BoundingBox, u32),
    DrawRoute(Vec<Coord>),
    ClearRoute,
    Empty,
    Loading(String),
    Success(RouteSummary),
    NotFound,
    HideLoading,
    Error(String),
    HideError,
    ShowAddress(Role, String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceModel {
    pub start_marker: Option<Coord>,
    pub finish_marker: Option<Coord>,
    pub center: Option<Coord>,
    pub bounds: Option<(BoundingBox, u32)>,
    pub route_layers: Vec<Vec<Coord>>,
    pub panel: PresentationState,
    pub loading_hint: Option<String>,
    pub error_hint: Option<String>,
    pub start_input: String,
    pub finish_input: String,
    #[serde(skip)]
    pub journal: Vec<SurfaceCall>,
}

impl Default for SurfaceModel {
    fn default() -> Self {
        Self {
            start_marker: None,
            finish_marker: None,
            center: None,
            bounds: None,
            route_layers: Vec::new(),
            panel: PresentationState::Empty,
            loading_hint: None,
            error_hint: None,
            start_input: String::new(),
            finish_input: String::new(),
            journal: Vec::new(),
        }
    }
}

impl SurfaceModel {
    pub fn marker(&self, role: Role) -> Option<Coord> {
        match role {
            Role::Start => self.start_marker,
            Role::Finish => self.finish_marker,
        }
    }

    pub fn search_input(&self, role: Role) -> &str {
        match role {
            Role::Start => &self.start_input,
            Role::Finish => &self.finish_input,
        }
    }

    fn marker_mut(&mut self, role: Role) -> &mut Option<Coord> {
        match role {
            Role::Start => &mut self.start_marker,
            Role::Finish => &mut self.finish_marker,
        }
    }
}

/// Shared handle; every adapter handed out writes into the same model.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    model: Rc<RefCell<SurfaceModel>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapters(&self) -> Adapters {
        Adapters::new(self.clone(), self.clone(), self.clone(), self.clone())
    }

    /// A copy of the current model.
    pub fn model(&self) -> SurfaceModel {
        self.model.borrow().clone()
    }

    pub fn take_journal(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.model.borrow_mut().journal)
    }

    fn apply(&self, call: SurfaceCall) {
        log::debug!("[SURFACE] {:?}", call);
        let mut model = self.model.borrow_mut();
        match &call {
            SurfaceCall::EnsureMarker(role, coord) => *model.marker_mut(*role) = Some(*coord),
            SurfaceCall::RemoveMarker(role) => *model.marker_mut(*role) = None,
            SurfaceCall::Recenter(coord) => model.center = Some(*coord),
            SurfaceCall::FitBounds(bounds, padding) => model.bounds = Some((*bounds, *padding)),
            SurfaceCall::DrawRoute(geometry) => model.route_layers.push(geometry.clone()),
            SurfaceCall::ClearRoute => model.route_layers.clear(),
            SurfaceCall::Empty => model.panel = PresentationState::Empty,
            SurfaceCall::Loading(message) => {
                model.panel = PresentationState::Loading {
                    message: message.clone(),
                };
                model.loading_hint = Some(message.clone());
            }
            SurfaceCall::Success(summary) => {
                model.panel = PresentationState::Success {
                    summary: summary.clone(),
                }
            }
            SurfaceCall::NotFound => model.panel = PresentationState::NotFound,
            SurfaceCall::HideLoading => model.loading_hint = None,
            SurfaceCall::Error(message) => model.error_hint = Some(message.clone()),
            SurfaceCall::HideError => model.error_hint = None,
            SurfaceCall::ShowAddress(Role::Start, text) => model.start_input = text.clone(),
            SurfaceCall::ShowAddress(Role::Finish, text) => model.finish_input = text.clone(),
        }
        model.journal.push(call);
    }
}

impl MarkerAdapter for HeadlessSurface {
    fn ensure(&mut self, role: Role, coord: Coord) {
        self.apply(SurfaceCall::EnsureMarker(role, coord));
    }

    fn remove(&mut self, role: Role) {
        self.apply(SurfaceCall::RemoveMarker(role));
    }
}

impl MapView for HeadlessSurface {
    fn recenter(&mut self, coord: Coord) {
        self.apply(SurfaceCall::Recenter(coord));
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32) {
        self.apply(SurfaceCall::FitBounds(bounds, padding));
    }

    fn draw_route(&mut self, geometry: &[Coord]) {
        self.apply(SurfaceCall::DrawRoute(geometry.to_vec()));
    }

    fn clear_route(&mut self) {
        self.apply(SurfaceCall::ClearRoute);
    }
}

impl ResultsPresenter for HeadlessSurface {
    fn empty(&mut self) {
        self.apply(SurfaceCall::Empty);
    }

    fn loading(&mut self, message: &str) {
        self.apply(SurfaceCall::Loading(message.to_string()));
    }

    fn success(&mut self, summary: &RouteSummary) {
        self.apply(SurfaceCall::Success(summary.clone()));
    }

    fn not_found(&mut self) {
        self.apply(SurfaceCall::NotFound);
    }

    fn hide_loading(&mut self) {
        self.apply(SurfaceCall::HideLoading);
    }

    fn error(&mut self, message: &str) {
        self.apply(SurfaceCall::Error(message.to_string()));
    }

    fn hide_error(&mut self) {
        self.apply(SurfaceCall::HideError);
    }
}

impl SearchDisplay for HeadlessSurface {
    fn show_address(&mut self, role: Role, address: &str) {
        self.apply(SurfaceCall::ShowAddress(role, address.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapters_share_one_model() {
        let surface = HeadlessSurface::new();
        let mut adapters = surface.adapters();
        adapters.markers.ensure(Role::Start, (1.0, 2.0));
        adapters.map.draw_route(&[(1.0, 2.0), (3.0, 4.0)]);
        adapters.presenter.error("boom");
        adapters.search.show_address(Role::Finish, "Kota Tua");

        let model = surface.model();
        assert_eq!(model.marker(Role::Start), Some((1.0, 2.0)));
        assert_eq!(model.route_layers.len(), 1);
        assert_eq!(model.error_hint.as_deref(), Some("boom"));
        assert_eq!(model.search_input(Role::Finish), "Kota Tua");
        assert_eq!(surface.take_journal().len(), 4);
        assert!(surface.model().journal.is_empty());
    }

    #[test]
    fn clearing_without_a_route_is_harmless() {
        let surface = HeadlessSurface::new();
        let mut adapters = surface.adapters();
        adapters.map.clear_route();
        adapters.markers.remove(Role::Finish);
        let model = surface.model();
        assert!(model.route_layers.is_empty());
        assert_eq!(model.marker(Role::Finish), None);
    }
}
