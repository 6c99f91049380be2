pub mod sdk;

pub use sdk::config::ServiceConfig;
pub use sdk::planner::{
    PlannerEvent, PlannerSession, PresetPoint, Role, RouteCoordinator, RouteState, SearchEvent,
    WaypointStore,
};
pub use sdk::routing::{RouteOptions, RouteRequest, RouteResult, RouteSummary, RoutingError, RoutingProvider, TomTomProvider};
