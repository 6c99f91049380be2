use super::route::Coord;
use serde::Serialize;

/// A reverse geocoded address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub freeform: String,
    /// Position the service attached to the address, which may differ
    /// slightly from the coordinate that was looked up.
    pub position: Option<Coord>,
}

impl Address {
    pub fn is_usable(&self) -> bool {
        !self.freeform.trim().is_empty()
    }
}

/// One candidate returned by a forward search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub label: String,
    pub position: Coord,
}

/// Only the first candidate counts; if its free-form address is empty the
/// lookup is treated as "not found" rather than falling through to others.
pub fn first_usable_address<I>(candidates: I) -> Option<Address>
where
    I: IntoIterator<Item = Address>,
{
    candidates.into_iter().next().filter(Address::is_usable)
}

/// Parses TomTom's `"lat,lon"` position string into a `(lng, lat)` coordinate.
pub fn parse_lat_lon(position: &str) -> Option<Coord> {
    let (lat, lon) = position.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Some((lon, lat))
}
