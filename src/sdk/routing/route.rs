use chrono::{DateTime, FixedOffset};
use geo::{BoundingRect, LineString, Rect};
use serde::Serialize;

/// A geographic position as `(longitude, latitude)`.
pub type Coord = (f64, f64);

/// The pair of coordinates a route is computed between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteRequest {
    pub start: Coord,
    pub finish: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub travel_time_seconds: f64,
    pub arrival_time: Option<DateTime<FixedOffset>>,
}

impl RouteSummary {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_hours(&self) -> f64 {
        self.travel_time_seconds / 3600.0
    }
}

/// Geometry plus summary of the first path returned by the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub geometry: Vec<Coord>,
    pub summary: RouteSummary,
}

impl RouteResult {
    /// First and last point of the geometry, i.e. where the service snapped
    /// the start and finish onto the road network.
    pub fn endpoints(&self) -> Option<(Coord, Coord)> {
        Some((*self.geometry.first()?, *self.geometry.last()?))
    }

    /// Smallest rectangle holding the whole geometry; `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        LineString::from(self.geometry.clone()).bounding_rect()
    }
}

/// Map extent in `(longitude, latitude)` degrees.
pub type BoundingBox = Rect<f64>;

/// Fixed request parameters sent with every route computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    pub travel_mode: &'static str,
    pub vehicle_width_m: f64,
    pub vehicle_length_m: f64,
    pub vehicle_height_m: f64,
    pub vehicle_max_speed_kmh: u32,
    pub route_type: &'static str,
    pub traffic: bool,
    pub compute_travel_time_for: &'static str,
    pub max_alternatives: u32,
}

impl Default for RouteOptions {
    /// A van-sized vehicle, shortest route, traffic aware, no alternatives.
    fn default() -> Self {
        Self {
            travel_mode: "van",
            vehicle_width_m: 3.0,
            vehicle_length_m: 7.0,
            vehicle_height_m: 3.0,
            vehicle_max_speed_kmh: 100,
            route_type: "shortest",
            traffic: true,
            compute_travel_time_for: "all",
            max_alternatives: 0,
        }
    }
}

impl RouteOptions {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("travelMode", self.travel_mode.to_string()),
            ("vehicleWidth", self.vehicle_width_m.to_string()),
            ("vehicleLength", self.vehicle_length_m.to_string()),
            ("vehicleHeight", self.vehicle_height_m.to_string()),
            ("vehicleMaxSpeed", self.vehicle_max_speed_kmh.to_string()),
            ("routeType", self.route_type.to_string()),
            ("traffic", self.traffic.to_string()),
            ("computeTravelTimeFor", self.compute_travel_time_for.to_string()),
            ("maxAlternatives", self.max_alternatives.to_string()),
        ]
    }
}
