//! Engine error taxonomy.
//!
//! All variants indicate that a collaborator violated the engine's
//! contract. They are fatal: the engine never retries and there is no
//! partial-failure mode inside a step.

use crate::location::Location;
use thiserror::Error;

/// Errors raised by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A coordinate component was negative.
    #[error("invalid coordinate ({row}, {col}): row and column must be non-negative")]
    InvalidCoordinate { row: i64, col: i64 },

    /// A location lies outside the field extent.
    #[error("location {location} is outside the {height}x{width} field")]
    OutOfBounds {
        location: Location,
        height: usize,
        width: usize,
    },

    /// An attempt to place an animal on a cell that is still occupied.
    /// Movers must clear their old cell first; dead animals clear their
    /// cell in `set_dead`.
    #[error("cell {location} is already occupied")]
    IllegalPlacement { location: Location },
}
