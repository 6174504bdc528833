//! Grid coordinates.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (row, column) position on the field. Compared and hashed by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    /// Create a location from unsigned components.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a location from possibly-negative components, as received
    /// from external callers (CLI arguments, view code).
    pub fn from_signed(row: i64, col: i64) -> Result<Self, SimError> {
        if row < 0 || col < 0 {
            return Err(SimError::InvalidCoordinate { row, col });
        }
        Ok(Self {
            row: row as usize,
            col: col as usize,
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_value() {
        assert_eq!(Location::new(3, 7), Location::new(3, 7));
        assert_ne!(Location::new(3, 7), Location::new(7, 3));

        let mut set = HashSet::new();
        set.insert(Location::new(1, 2));
        set.insert(Location::new(1, 2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_signed_rejects_negative() {
        assert!(Location::from_signed(0, 0).is_ok());
        assert_eq!(
            Location::from_signed(-1, 4),
            Err(SimError::InvalidCoordinate { row: -1, col: 4 })
        );
        assert_eq!(
            Location::from_signed(2, -9),
            Err(SimError::InvalidCoordinate { row: 2, col: -9 })
        );
    }
}
