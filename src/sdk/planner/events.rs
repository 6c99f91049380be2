use super::presets::PresetPoint;
use super::waypoint::Role;
use crate::sdk::routing::geocode::SearchResult;
use crate::sdk::routing::route::Coord;

/// Everything the coordinator reacts to on the user's side.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerEvent {
    WaypointSet { role: Role, coord: Coord },
    WaypointCleared(Role),
    /// A marker was dropped at a new position and needs an address first.
    DragReposition { role: Role, coord: Coord },
    PresetSelected(PresetPoint),
    /// A confirmed search produced no candidates.
    NothingFound(Role),
}

/// What a search box for one role reports.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    ResultsCleared(Role),
    ResultsFound {
        role: Role,
        candidates: Vec<SearchResult>,
        /// The user pressed enter instead of picking a candidate.
        confirmed: bool,
    },
    ResultSelected { role: Role, result: SearchResult },
}

impl SearchEvent {
    /// Translates a search box event. Unconfirmed result lists only feed
    /// the dropdown and produce nothing.
    pub fn into_planner_event(self) -> Option<PlannerEvent> {
        match self {
            SearchEvent::ResultsCleared(role) => Some(PlannerEvent::WaypointCleared(role)),
            SearchEvent::ResultsFound {
                confirmed: false, ..
            } => None,
            SearchEvent::ResultsFound {
                role, candidates, ..
            } => Some(match candidates.first() {
                Some(first) => PlannerEvent::WaypointSet {
                    role,
                    coord: first.position,
                },
                None => PlannerEvent::NothingFound(role),
            }),
            SearchEvent::ResultSelected { role, result } => Some(PlannerEvent::WaypointSet {
                role,
                coord: result.position,
            }),
        }
    }
}

impl From<PresetPoint> for PlannerEvent {
    fn from(preset: PresetPoint) -> Self {
        PlannerEvent::PresetSelected(preset)
    }
}
