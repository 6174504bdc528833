//! The occupancy grid shared by all animals in one run.
//!
//! The field is a pure spatial index: it records which animal slot sits
//! on which cell and answers adjacency queries. It knows nothing about
//! species behavior and never owns animal lifetime.

use crate::animal::AnimalId;
use crate::error::SimError;
use crate::location::Location;
use rand::seq::SliceRandom;
use rand::Rng;

/// Bounded rectangular grid with at most one occupant per cell.
#[derive(Clone, Debug)]
pub struct Field {
    height: usize,
    width: usize,
    /// cells[row * width + col] holds the occupant's slot, if any.
    cells: Vec<Option<AnimalId>>,
}

impl Field {
    /// Create an empty field. Dimensions are fixed for the whole run.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![None; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether a location lies inside the field extent.
    pub fn in_bounds(&self, location: Location) -> bool {
        location.row < self.height && location.col < self.width
    }

    fn index(&self, location: Location) -> Option<usize> {
        if self.in_bounds(location) {
            Some(location.row * self.width + location.col)
        } else {
            None
        }
    }

    /// Record an animal at a location. The cell must be empty: movers are
    /// responsible for clearing their old cell first, and dead animals
    /// clear their cell when they die.
    pub fn place(&mut self, id: AnimalId, location: Location) -> Result<(), SimError> {
        let Some(i) = self.index(location) else {
            return Err(SimError::OutOfBounds {
                location,
                height: self.height,
                width: self.width,
            });
        };
        if self.cells[i].is_some() {
            return Err(SimError::IllegalPlacement { location });
        }
        self.cells[i] = Some(id);
        Ok(())
    }

    /// Remove any occupant at a location. No-op when the cell is already
    /// empty or the location is out of bounds.
    pub fn clear(&mut self, location: Location) {
        if let Some(i) = self.index(location) {
            self.cells[i] = None;
        }
    }

    /// Empty every cell. Used when occupancy is republished after the
    /// dead are removed at the end of a step.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// The occupant of a cell, if any.
    pub fn animal_at(&self, location: Location) -> Option<AnimalId> {
        self.index(location).and_then(|i| self.cells[i])
    }

    /// Whether a cell is in bounds and unoccupied.
    pub fn is_free(&self, location: Location) -> bool {
        matches!(self.index(location), Some(i) if self.cells[i].is_none())
    }

    /// The up-to-8 in-bounds neighbors of a location, in an order
    /// re-shuffled through the shared RNG on every call. The shuffle is a
    /// fairness contract: movement and prey selection must not favor any
    /// direction, and routing it through the seeded RNG keeps full runs
    /// reproducible.
    pub fn adjacent_locations<R: Rng>(&self, location: Location, rng: &mut R) -> Vec<Location> {
        let mut adjacent = Vec::with_capacity(8);
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let row = location.row as i64 + dr;
                let col = location.col as i64 + dc;
                if row < 0 || col < 0 {
                    continue;
                }
                let neighbor = Location::new(row as usize, col as usize);
                if self.in_bounds(neighbor) {
                    adjacent.push(neighbor);
                }
            }
        }
        adjacent.shuffle(rng);
        adjacent
    }

    /// The unoccupied subset of the adjacent locations, same randomized
    /// order contract as `adjacent_locations`.
    pub fn free_adjacent_locations<R: Rng>(&self, location: Location, rng: &mut R) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|&loc| self.is_free(loc))
            .collect()
    }

    /// The first free neighbor, or `None` when every neighbor is occupied.
    /// `None` is the overcrowding signal.
    pub fn free_adjacent_location<R: Rng>(
        &self,
        location: Location,
        rng: &mut R,
    ) -> Option<Location> {
        self.free_adjacent_locations(location, rng).into_iter().next()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
