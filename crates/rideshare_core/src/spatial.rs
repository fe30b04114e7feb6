//! Spatial primitives: integer grid locations and the Manhattan metric.
//!
//! The city is modelled as a grid of (row, column) intersections. All travel
//! distances are Manhattan distances on that grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An intersection on the city grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub column: i32,
}

impl Location {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

/// Errors produced when parsing a `row,col` location string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationParseError {
    #[error("expected `row,col`, got `{0}`")]
    Malformed(String),
    #[error("invalid coordinate `{0}`")]
    InvalidCoordinate(String),
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| LocationParseError::Malformed(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| LocationParseError::InvalidCoordinate(part.to_string()))
        };
        Ok(Location::new(parse(row)?, parse(column)?))
    }
}

/// Sum of absolute row and column differences. Coordinates are `i32`, so the
/// sum always fits.
pub fn manhattan_distance(origin: Location, destination: Location) -> u64 {
    u64::from(origin.row.abs_diff(destination.row))
        + u64::from(origin.column.abs_diff(destination.column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let p = Location::new(0, 0);
        let q = Location::new(5, 6);
        assert_eq!(manhattan_distance(p, q), 11);
        assert_eq!(manhattan_distance(q, p), 11);
        assert_eq!(manhattan_distance(q, q), 0);
    }

    #[test]
    fn distance_handles_negative_coordinates() {
        let p = Location::new(-3, 4);
        let q = Location::new(2, -1);
        assert_eq!(manhattan_distance(p, q), 10);
    }

    #[test]
    fn distance_between_grid_extremes_does_not_overflow() {
        let p = Location::new(i32::MIN, i32::MIN);
        let q = Location::new(i32::MAX, i32::MAX);
        assert_eq!(manhattan_distance(p, q), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn renders_as_row_column_pair() {
        assert_eq!(Location::new(3, 2).to_string(), "(3,2)");
    }

    #[test]
    fn parses_row_column_strings() {
        assert_eq!("5,6".parse::<Location>(), Ok(Location::new(5, 6)));
        assert_eq!(" 1 , -2 ".parse::<Location>(), Ok(Location::new(1, -2)));
        assert_eq!(
            "56".parse::<Location>(),
            Err(LocationParseError::Malformed("56".to_string()))
        );
        assert_eq!(
            "5,x".parse::<Location>(),
            Err(LocationParseError::InvalidCoordinate("x".to_string()))
        );
        assert_eq!(
            "9223372036854775807,0".parse::<Location>(),
            Err(LocationParseError::InvalidCoordinate(
                "9223372036854775807".to_string()
            ))
        );
    }
}
