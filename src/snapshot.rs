//! Read-only field snapshots for views.
//!
//! A snapshot is a lightweight copy of occupancy at one instant, decoupled
//! from the live simulation state so views can render without touching the
//! engine.

use crate::animal::Species;
use crate::location::Location;
use crate::simulator::Simulator;
use serde::{Deserialize, Serialize};

/// Occupancy of the whole field at one step: one species tag per cell,
/// flattened row-major.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub time: u64,
    pub height: usize,
    pub width: usize,
    pub cells: Vec<Option<Species>>,
}

impl FieldSnapshot {
    /// Capture the current occupancy of a simulator.
    pub fn from_simulator(sim: &Simulator) -> Self {
        let height = sim.field.height();
        let width = sim.field.width();
        let mut cells = vec![None; height * width];

        for row in 0..height {
            for col in 0..width {
                let location = Location::new(row, col);
                cells[row * width + col] =
                    sim.animal_at(location).map(|animal| animal.species);
            }
        }

        Self {
            time: sim.time,
            height,
            width,
            cells,
        }
    }

    /// The species occupying a cell, if any. Out-of-range locations read
    /// as empty.
    pub fn species_at(&self, location: Location) -> Option<Species> {
        if location.row < self.height && location.col < self.width {
            self.cells[location.row * self.width + location.col]
        } else {
            None
        }
    }

    /// Count cells occupied by one species.
    pub fn count(&self, species: Species) -> usize {
        self.cells.iter().filter(|c| **c == Some(species)).count()
    }

    /// ASCII rendering, one character per cell: `R`, `F`, `W`, or `.`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[row * self.width + col];
                out.push(cell.map_or('.', Species::symbol));
            }
            out.push('\n');
        }
        out
    }
}
