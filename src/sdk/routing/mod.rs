pub mod error;
pub mod geocode;
pub mod provider;
pub mod route;
pub mod service;

pub use error::RoutingError;
pub use geocode::{Address, SearchResult};
pub use provider::TomTomProvider;
pub use route::{BoundingBox, Coord, RouteOptions, RouteRequest, RouteResult, RouteSummary};
pub use service::RoutingProvider;
