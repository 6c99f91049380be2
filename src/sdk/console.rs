//! Line commands and text rendering for the interactive CLI.

use crate::sdk::planner::{
    parse_coord, HeadlessSurface, PlannerError, PlannerEvent, PlannerSession, PresentationState,
    PresetPoint, Role, SearchEvent,
};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::SearchResult;
use crate::sdk::routing::route::{Coord, RouteSummary};
use chrono::{DateTime, FixedOffset};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

pub const HELP: &str = "\
commands:
  search <start|finish> <text>   search and take the first match
  set <start|finish> <lng,lat>   place a waypoint
  drag <start|finish> <lng,lat>  drop a marker somewhere else
  clear <start|finish>           clear a waypoint
  preset <A|B|C|D>               use a preset start point
  show                           print the results panel
  help                           this text
  quit                           leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { role: Role, query: String },
    Set { role: Role, coord: Coord },
    Drag { role: Role, coord: Coord },
    Clear(Role),
    Preset(PresetPoint),
    Show,
    Help,
    Quit,
}

/// A forward search started from the command line.
pub type SearchCall = BoxFuture<'static, (Role, Result<Vec<SearchResult>, RoutingError>)>;

/// What a finished search means for the planner. A confirmed search takes
/// its first hit; a failed one is reported like an empty one.
pub fn search_event(
    role: Role,
    result: Result<Vec<SearchResult>, RoutingError>,
) -> Option<PlannerEvent> {
    match result {
        Ok(candidates) => SearchEvent::ResultsFound {
            role,
            candidates,
            confirmed: true,
        }
        .into_planner_event(),
        Err(e) => {
            log::warn!("Search for {} failed: {}", role, e);
            Some(PlannerEvent::NothingFound(role))
        }
    }
}

/// Runs every outstanding search and provider call to completion once input
/// has ended, so the final state reflects them.
pub async fn drain(session: &mut PlannerSession, searches: &mut FuturesUnordered<SearchCall>) {
    while let Some((role, result)) = searches.next().await {
        if let Some(event) = search_event(role, result) {
            session.dispatch(event);
        }
    }
    if session.in_flight() > 0 {
        log::debug!("Input closed, waiting for {} pending call(s)", session.in_flight());
    }
    session.settle().await;
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, PlannerError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let mut role = || -> Result<Role, PlannerError> {
        words.next().ok_or(PlannerError::MissingArgument("role"))?.parse()
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "search" => {
            let role = role()?;
            let query = words.collect::<Vec<_>>().join(" ");
            if query.is_empty() {
                return Err(PlannerError::MissingArgument("search text"));
            }
            Command::Search { role, query }
        }
        "set" => {
            let role = role()?;
            Command::Set {
                role,
                coord: coord_argument(words)?,
            }
        }
        "drag" => {
            let role = role()?;
            Command::Drag {
                role,
                coord: coord_argument(words)?,
            }
        }
        "clear" => Command::Clear(role()?),
        "preset" => Command::Preset(
            words
                .next()
                .ok_or(PlannerError::MissingArgument("preset name"))?
                .parse()?,
        ),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(PlannerError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

/// Accepts `lng,lat`, `lng, lat` and `lng lat`.
fn coord_argument<'a>(words: impl Iterator<Item = &'a str>) -> Result<Coord, PlannerError> {
    let parts: Vec<&str> = words.collect();
    if parts.is_empty() {
        return Err(PlannerError::MissingArgument("coordinate"));
    }
    let joined = parts.join(" ");
    if joined.contains(',') {
        parse_coord(&joined)
    } else {
        parse_coord(&parts.join(","))
    }
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

pub fn format_arrival(arrival: &DateTime<FixedOffset>) -> String {
    arrival.format("%a %d %b %Y, %H:%M").to_string()
}

pub fn format_summary(summary: &RouteSummary) -> String {
    let arrival = summary
        .arrival_time
        .as_ref()
        .map(format_arrival)
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "Route summary\n  Leave now\n  Distance: {}\n  Arrive: {}",
        format_distance(summary.distance_meters),
        arrival
    )
}

/// Renders the panel and hints the way the results panel would show them.
pub fn render_panel(surface: &HeadlessSurface) -> String {
    let model = surface.model();
    let mut lines = Vec::new();
    if let Some(message) = &model.loading_hint {
        lines.push(format!("[..] {}", message));
    }
    if let Some(message) = &model.error_hint {
        lines.push(format!("[!!] {}", message));
    }
    lines.push(match &model.panel {
        PresentationState::Empty => "Choose a start and a destination".to_string(),
        PresentationState::Loading { message } => message.clone(),
        PresentationState::Success { summary } => format_summary(summary),
        PresentationState::NotFound => "No route found".to_string(),
    });
    for role in Role::ALL {
        let input = model.search_input(role);
        if !input.is_empty() {
            lines.push(format!("  {}: {}", role, input));
        }
    }
    lines.join("\n")
}
