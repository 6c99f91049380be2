use super::error::PlannerError;
use crate::sdk::routing::route::Coord;
use std::{fmt, str::FromStr};

/// Named start points offered by the preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetPoint {
    A,
    B,
    C,
    D,
}

impl PresetPoint {
    pub const ALL: [PresetPoint; 4] = [PresetPoint::A, PresetPoint::B, PresetPoint::C, PresetPoint::D];

    // All four currently share the depot location in central Jakarta.
    pub fn coordinate(self) -> Coord {
        match self {
            PresetPoint::A => (106.84513, -6.21462),
            PresetPoint::B => (106.84513, -6.21462),
            PresetPoint::C => (106.84513, -6.21462),
            PresetPoint::D => (106.84513, -6.21462),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PresetPoint::A => "A",
            PresetPoint::B => "B",
            PresetPoint::C => "C",
            PresetPoint::D => "D",
        }
    }
}

impl fmt::Display for PresetPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {}", self.name())
    }
}

impl FromStr for PresetPoint {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name
            .strip_prefix("Point ")
            .or_else(|| name.strip_prefix("point "))
            .unwrap_or(name);
        PresetPoint::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| PlannerError::UnknownPreset(s.to_string()))
    }
}
