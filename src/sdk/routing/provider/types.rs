use chrono::DateTime;
use serde::Deserialize;

use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::{parse_lat_lon, Address, SearchResult};
use crate::sdk::routing::route::{RouteResult, RouteSummary};

// --- Data Structures for parsing TomTom responses ---

#[derive(Deserialize)]
pub struct CalculateRouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Deserialize)]
pub struct Route {
    pub summary: WireSummary,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSummary {
    pub length_in_meters: f64,
    pub travel_time_in_seconds: f64,
    pub arrival_time: Option<String>,
}

#[derive(Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub points: Vec<LatLng>,
}

#[derive(Deserialize, Clone, Copy)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub addresses: Vec<ReverseGeocodeCandidate>,
}

#[derive(Deserialize)]
pub struct ReverseGeocodeCandidate {
    pub address: WireAddress,
    pub position: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAddress {
    pub freeform_address: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Deserialize)]
pub struct SearchHit {
    pub address: WireAddress,
    pub position: LatLon,
}

#[derive(Deserialize, Clone, Copy)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl CalculateRouteResponse {
    /// Keeps only the first route and flattens its legs into one geometry.
    pub fn into_first_route(self) -> Result<RouteResult, RoutingError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::Generic("No route found in success response".to_string()))?;

        let geometry: Vec<_> = route
            .legs
            .iter()
            .flat_map(|leg| leg.points.iter())
            .map(|p| (p.longitude, p.latitude))
            .collect();
        if geometry.is_empty() {
            return Err(RoutingError::EmptyRoute);
        }

        let arrival_time = route.summary.arrival_time.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map_err(|e| log::warn!("Ignoring unparseable arrival time {:?}: {}", raw, e))
                .ok()
        });

        Ok(RouteResult {
            geometry,
            summary: RouteSummary {
                distance_meters: route.summary.length_in_meters,
                travel_time_seconds: route.summary.travel_time_in_seconds,
                arrival_time,
            },
        })
    }
}

impl ReverseGeocodeResponse {
    pub fn into_addresses(self) -> impl Iterator<Item = Address> {
        self.addresses.into_iter().map(|candidate| Address {
            freeform: candidate.address.freeform_address.unwrap_or_default(),
            position: candidate.position.as_deref().and_then(parse_lat_lon),
        })
    }
}

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
            .into_iter()
            .map(|hit| SearchResult {
                label: hit.address.freeform_address.unwrap_or_default(),
                position: (hit.position.lon, hit.position.lat),
            })
            .collect()
    }
}
