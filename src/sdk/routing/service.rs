use super::error::RoutingError;
use super::geocode::{Address, SearchResult};
use super::route::{Coord, RouteRequest, RouteResult};
use async_trait::async_trait;

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Free-text search, best candidates first.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, RoutingError>;

    /// Looks up the address at a coordinate. `Ok(None)` means the service
    /// answered but had no usable address.
    async fn reverse_geocode(&self, coord: Coord) -> Result<Option<Address>, RoutingError>;

    /// Computes a route between the two points of the request.
    async fn compute_route(&self, request: RouteRequest) -> Result<RouteResult, RoutingError>;
}
