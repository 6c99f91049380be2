use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Unknown waypoint role {0:?} (expected \"start\" or \"finish\")")]
    UnknownRole(String),

    #[error("Unknown preset point {0:?} (expected one of A, B, C, D)")]
    UnknownPreset(String),

    #[error("Invalid coordinate {0:?} (expected \"lng,lat\")")]
    InvalidCoordinate(String),

    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),
}
