//! Seams between the coordinator and whatever draws the map and panels.
//!
//! The coordinator never touches rendering primitives; it only calls these
//! traits. Implementations are expected to be cheap and infallible, since
//! they run inline on the event loop.

use super::waypoint::Role;
use crate::sdk::routing::route::{BoundingBox, Coord, RouteSummary};
use serde::Serialize;

/// Draggable pins, one per role.
pub trait MarkerAdapter {
    /// Creates the marker for `role` if missing, otherwise moves it.
    fn ensure(&mut self, role: Role, coord: Coord);

    /// Detaches and discards the marker for `role`.
    fn remove(&mut self, role: Role);
}

pub trait MapView {
    fn recenter(&mut self, coord: Coord);
    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32);
    fn draw_route(&mut self, geometry: &[Coord]);
    /// Must be a no-op when no route is drawn.
    fn clear_route(&mut self);
}

/// The results panel plus the loading and error hints around it.
pub trait ResultsPresenter {
    fn empty(&mut self);
    fn loading(&mut self, message: &str);
    fn success(&mut self, summary: &RouteSummary);
    fn not_found(&mut self);
    fn hide_loading(&mut self);
    fn error(&mut self, message: &str);
    fn hide_error(&mut self);
}

/// The text inputs of the search boxes.
pub trait SearchDisplay {
    fn show_address(&mut self, role: Role, address: &str);
}

/// Mode of the results panel. Errors are not a panel mode of their own:
/// the error hint is shown on top of `NotFound`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresentationState {
    Empty,
    Loading { message: String },
    Success { summary: RouteSummary },
    NotFound,
}

/// The rendering side the coordinator drives.
pub struct Adapters {
    pub markers: Box<dyn MarkerAdapter>,
    pub map: Box<dyn MapView>,
    pub presenter: Box<dyn ResultsPresenter>,
    pub search: Box<dyn SearchDisplay>,
}

impl Adapters {
    pub fn new(
        markers: impl MarkerAdapter + 'static,
        map: impl MapView + 'static,
        presenter: impl ResultsPresenter + 'static,
        search: impl SearchDisplay + 'static,
    ) -> Self {
        Self {
            markers: Box::new(markers),
            map: Box::new(map),
            presenter: Box::new(presenter),
            search: Box::new(search),
        }
    }
}
