//! Compass directions for split routes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical travel direction.
///
/// Split routes are always described by a pair of opposite directions,
/// and the direction's name doubles as the rider-facing headsign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// The opposite compass direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Headsign shown to riders for a trip travelling this way.
    pub fn headsign(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headsign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    #[test]
    fn opposite_is_an_involution() {
        for d in ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn headsign() {
        assert_eq!(Direction::East.headsign(), "East");
        assert_eq!(Direction::North.to_string(), "North");
    }

    #[test]
    fn serde_uses_upper_case_names() {
        assert_eq!(serde_json::to_string(&Direction::South).unwrap(), "\"SOUTH\"");
        let d: Direction = serde_json::from_str("\"EAST\"").unwrap();
        assert_eq!(d, Direction::East);
    }
}
