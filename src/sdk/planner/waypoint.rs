use super::error::PlannerError;
use crate::sdk::routing::route::{Coord, RouteRequest};
use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Start,
    Finish,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Start, Role::Finish];

    pub fn other(self) -> Role {
        match self {
            Role::Start => Role::Finish,
            Role::Finish => Role::Start,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Start => "start",
            Role::Finish => "finish",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Role::Start => 0,
            Role::Finish => 1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "from" => Ok(Role::Start),
            "finish" | "to" => Ok(Role::Finish),
            _ => Err(PlannerError::UnknownRole(s.to_string())),
        }
    }
}

/// Parses `"lng,lat"` into a coordinate. Only the syntax is checked; range
/// checks belong to whoever produced the value.
pub fn parse_coord(s: &str) -> Result<Coord, PlannerError> {
    let invalid = || PlannerError::InvalidCoordinate(s.to_string());
    let (lng, lat) = s.split_once(',').ok_or_else(invalid)?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    if !lng.is_finite() || !lat.is_finite() {
        return Err(invalid());
    }
    Ok((lng, lat))
}

/// Current coordinate, if any, of each waypoint role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaypointStore {
    start: Option<Coord>,
    finish: Option<Coord>,
}

impl WaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, role: Role, coord: Coord) {
        *self.slot_mut(role) = Some(coord);
    }

    /// Unsets the role, returning what it held.
    pub fn clear(&mut self, role: Role) -> Option<Coord> {
        self.slot_mut(role).take()
    }

    pub fn get(&self, role: Role) -> Option<Coord> {
        match role {
            Role::Start => self.start,
            Role::Finish => self.finish,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.finish.is_some()
    }

    /// The route request these waypoints describe, once both are set.
    pub fn route_request(&self) -> Option<RouteRequest> {
        Some(RouteRequest {
            start: self.start?,
            finish: self.finish?,
        })
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<Coord> {
        match role {
            Role::Start => &mut self.start,
            Role::Finish => &mut self.finish,
        }
    }
}
