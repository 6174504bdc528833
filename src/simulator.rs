//! Step scheduler - advances the whole population one step at a time.
//!
//! The simulator owns the field, the animal table, and the seeded RNG.
//! One step is a sequential, uninterruptible pass over a snapshot of the
//! live animals: each acts exactly once, newborns are placed immediately
//! but never act in the step they are born, and the dead are dropped and
//! occupancy republished after the pass.

use crate::animal::{Animal, AnimalId, Species};
use crate::config::{Config, SpeciesConfig};
use crate::error::SimError;
use crate::field::Field;
use crate::location::Location;
use crate::snapshot::FieldSnapshot;
use crate::stats::{Stats, StatsHistory};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// The simulation engine.
pub struct Simulator {
    /// All animals, live and (until the end of the current step) dead.
    /// Each animal's `id` is its slot here.
    pub animals: Vec<Animal>,

    /// Occupancy grid.
    pub field: Field,

    /// Steps completed.
    pub time: u64,

    /// Configuration
    pub config: Config,

    /// Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,

    births_this_step: usize,
    deaths_this_step: usize,
}

impl Simulator {
    /// Create a simulator with a randomly drawn seed and the configured
    /// initial population.
    pub fn new(config: Config) -> Result<Self, SimError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a simulator with a specific seed for reproducibility. Seeds
    /// the initial population cell by cell from the configured creation
    /// probabilities (wolf, then fox, then rabbit precedence per cell),
    /// with random ages and hunger levels.
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, SimError> {
        let mut sim = Self::empty(config, seed);
        sim.populate()?;
        sim.update_stats();
        Ok(sim)
    }

    /// Create a simulator with no animals. Callers seed the population
    /// through [`Simulator::insert`].
    pub fn empty(config: Config, seed: u64) -> Self {
        let field = Field::new(config.field.height, config.field.width);
        let stats_history = StatsHistory::new(config.logging.stats_interval);

        Self {
            animals: Vec::new(),
            field,
            time: 0,
            config,
            stats: Stats::new(),
            stats_history,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            births_this_step: 0,
            deaths_this_step: 0,
        }
    }

    fn populate(&mut self) -> Result<(), SimError> {
        for row in 0..self.field.height() {
            for col in 0..self.field.width() {
                let location = Location::new(row, col);
                let species = if self.rng.gen::<f64>() <= self.config.population.wolf_probability {
                    Some(Species::Wolf)
                } else if self.rng.gen::<f64>() <= self.config.population.fox_probability {
                    Some(Species::Fox)
                } else if self.rng.gen::<f64>() <= self.config.population.rabbit_probability {
                    Some(Species::Rabbit)
                } else {
                    None
                };

                if let Some(species) = species {
                    let id = self.animals.len();
                    let params = *self.config.species(species);
                    let mut animal = Animal::with_random_age(id, species, &params, &mut self.rng);
                    animal.set_location(&mut self.field, location)?;
                    self.animals.push(animal);
                }
            }
        }
        Ok(())
    }

    /// Place a newborn-state animal at a location. Used for driver-level
    /// population seeding and scenario setup.
    pub fn insert(&mut self, species: Species, location: Location) -> Result<AnimalId, SimError> {
        let id = self.animals.len();
        let params = *self.config.species(species);
        let mut animal = Animal::newborn(id, species, &params);
        animal.set_location(&mut self.field, location)?;
        self.animals.push(animal);
        Ok(id)
    }

    /// Advance the whole population by one step.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.births_this_step = 0;

        // Snapshot of the live set: newborns spawned during the pass are
        // placed in the field at once but must not act until next step.
        let live: Vec<AnimalId> = self
            .animals
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| a.id)
            .collect();

        for id in live {
            // An animal may have been eaten earlier in the same pass.
            if self.animals[id].is_alive() {
                self.act(id)?;
            }
        }

        self.remove_dead()?;
        self.time += 1;
        self.update_stats();
        Ok(())
    }

    /// One animal's behavior for this step: age (and hunger, for
    /// predators - starvation is checked before any chance to eat), then
    /// breed into free neighboring cells, then hunt or move, dying of
    /// overcrowding when neither prey nor a free cell exists.
    fn act(&mut self, id: AnimalId) -> Result<(), SimError> {
        let species = self.animals[id].species;
        let params = *self.config.species(species);

        self.animals[id].increment_age(&params, &mut self.field);
        if species.is_predator() {
            self.animals[id].increment_hunger(&mut self.field);
        }
        if !self.animals[id].is_alive() {
            return Ok(());
        }

        self.give_birth(id, &params)?;

        let Some(location) = self.animals[id].location() else {
            return Ok(());
        };

        let destination = if species.is_predator() {
            match self.find_food(id, location, &params) {
                Some(dest) => Some(dest),
                None => self.field.free_adjacent_location(location, &mut self.rng),
            }
        } else {
            self.field.free_adjacent_location(location, &mut self.rng)
        };

        match destination {
            Some(dest) => self.animals[id].set_location(&mut self.field, dest)?,
            // Overcrowding.
            None => self.animals[id].set_dead(&mut self.field),
        }
        Ok(())
    }

    /// Spawn this animal's litter into distinct free neighboring cells.
    /// Litter beyond the available free cells is discarded.
    fn give_birth(&mut self, id: AnimalId, params: &SpeciesConfig) -> Result<(), SimError> {
        let Some(location) = self.animals[id].location() else {
            return Ok(());
        };
        let species = self.animals[id].species;

        let free = self.field.free_adjacent_locations(location, &mut self.rng);
        let births = self.animals[id].breed(params, &mut self.rng);

        for birth_location in free.into_iter().take(births as usize) {
            self.insert(species, birth_location)?;
            self.births_this_step += 1;
        }
        Ok(())
    }

    /// Scan neighboring cells in randomized order for the first live
    /// animal of an acceptable prey species. On a hit the prey dies, the
    /// hunter's food level resets to its species' food value, and the
    /// vacated cell is returned as the move target. The first-match
    /// tie-break between prey species is intentional: the randomized
    /// adjacency order is the only priority.
    fn find_food(
        &mut self,
        id: AnimalId,
        location: Location,
        params: &SpeciesConfig,
    ) -> Option<Location> {
        let hunter = self.animals[id].species;
        let adjacent = self.field.adjacent_locations(location, &mut self.rng);

        for spot in adjacent {
            let Some(occupant) = self.field.animal_at(spot) else {
                continue;
            };
            let prey = &self.animals[occupant];
            if prey.is_alive() && hunter.prey().contains(&prey.species) {
                self.animals[occupant].set_dead(&mut self.field);
                self.animals[id].food_level = params.food_value;
                return Some(spot);
            }
        }
        None
    }

    /// Drop dead animals, compact slots, and republish field occupancy
    /// from the surviving animals' recorded locations.
    fn remove_dead(&mut self) -> Result<(), SimError> {
        let before = self.animals.len();
        self.animals.retain(|a| a.is_alive());
        self.deaths_this_step = before - self.animals.len();

        self.field.clear_all();
        for slot in 0..self.animals.len() {
            self.animals[slot].id = slot;
            if let Some(location) = self.animals[slot].location() {
                self.field.place(slot, location)?;
            }
        }
        Ok(())
    }

    fn update_stats(&mut self) {
        self.stats.time = self.time;
        self.stats.births = self.births_this_step;
        self.stats.deaths = self.deaths_this_step;
        self.stats.update(&self.animals);

        if self.time % self.config.logging.stats_interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run the simulation for the given number of steps.
    pub fn run(&mut self, steps: u64) -> Result<(), SimError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Run with a per-step callback (progress reporting, rendering).
    pub fn run_with_callback<F>(&mut self, steps: u64, mut callback: F) -> Result<(), SimError>
    where
        F: FnMut(&Simulator, u64),
    {
        for i in 0..steps {
            self.step()?;
            callback(self, i);
        }
        Ok(())
    }

    /// Current live population count.
    pub fn population(&self) -> usize {
        self.animals.iter().filter(|a| a.is_alive()).count()
    }

    /// Live count for one species.
    pub fn count(&self, species: Species) -> usize {
        self.animals
            .iter()
            .filter(|a| a.is_alive() && a.species == species)
            .count()
    }

    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    /// The live animal occupying a cell, if any. Read-only.
    pub fn animal_at(&self, location: Location) -> Option<&Animal> {
        self.field
            .animal_at(location)
            .and_then(|id| self.animals.get(id))
            .filter(|a| a.is_alive())
    }

    /// Read-only occupancy snapshot for views.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::from_simulator(self)
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(height: usize, width: usize) -> Config {
        let mut config = Config::default();
        config.field.height = height;
        config.field.width = width;
        config
    }

    #[test]
    fn test_seeded_population() {
        let sim = Simulator::new_with_seed(Config::default(), 42).unwrap();

        assert!(sim.population() > 0);
        assert_eq!(
            sim.population(),
            sim.count(Species::Rabbit) + sim.count(Species::Fox) + sim.count(Species::Wolf)
        );
        // One cell per live animal.
        assert_eq!(sim.field.occupied_count(), sim.population());
        assert_eq!(sim.time, 0);
    }

    #[test]
    fn test_step_advances_time() {
        let mut sim = Simulator::new_with_seed(small_config(20, 20), 1).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.time, 1);
        sim.run(9).unwrap();
        assert_eq!(sim.time, 10);
    }

    #[test]
    fn test_overcrowded_animal_dies() {
        // Fill a 3x3 field with rabbits. The first to act has no free
        // neighbor and must die of overcrowding; everyone after it finds
        // the cell its predecessor vacated.
        let mut sim = Simulator::empty(small_config(3, 3), 5);
        for row in 0..3 {
            for col in 0..3 {
                sim.insert(Species::Rabbit, Location::new(row, col)).unwrap();
            }
        }

        sim.step().unwrap();
        assert_eq!(sim.population(), 8);
        assert_eq!(sim.stats.deaths, 1);
    }

    #[test]
    fn test_fox_eats_adjacent_rabbit() {
        let mut sim = Simulator::empty(small_config(3, 3), 9);
        sim.insert(Species::Rabbit, Location::new(0, 0)).unwrap();
        let fox = sim.insert(Species::Fox, Location::new(1, 1)).unwrap();
        let food_before = sim.animals[fox].food_level;

        // In a 3x3 field the center fox is adjacent to every cell, so the
        // rabbit cannot escape by moving first.
        sim.step().unwrap();

        assert_eq!(sim.count(Species::Rabbit), 0);
        assert_eq!(sim.count(Species::Fox), 1);
        let fox = &sim.animals[0];
        assert!(fox.is_alive());
        assert_eq!(
            fox.food_level,
            sim.config.fox.food_value,
            "food level resets on a kill (was {})",
            food_before
        );
    }

    #[test]
    fn test_wolf_eats_foxes_too() {
        let mut sim = Simulator::empty(small_config(3, 3), 11);
        sim.insert(Species::Fox, Location::new(0, 1)).unwrap();
        sim.insert(Species::Wolf, Location::new(1, 1)).unwrap();

        sim.step().unwrap();

        assert_eq!(sim.count(Species::Fox), 0);
        assert_eq!(sim.count(Species::Wolf), 1);
        assert_eq!(sim.animals[0].food_level, sim.config.wolf.food_value);
    }

    #[test]
    fn test_newborns_do_not_act_in_birth_step() {
        let mut config = small_config(5, 5);
        config.rabbit.breeding_age = 1;
        config.rabbit.breeding_probability = 1.0;

        let mut sim = Simulator::empty(config, 3);
        sim.insert(Species::Rabbit, Location::new(2, 2)).unwrap();
        sim.step().unwrap();

        assert!(sim.stats.births >= 1);
        // Anything still at age 0 was born this step and has not acted.
        let newborns = sim
            .animals
            .iter()
            .filter(|a| a.is_alive() && a.age == 0)
            .count();
        assert_eq!(newborns, sim.stats.births);
    }

    #[test]
    fn test_litter_capped_by_free_cells() {
        // Corner rabbit has 3 neighbors; with a guaranteed litter of 4,
        // only 3 newborns fit and the extra is discarded.
        let mut config = small_config(4, 4);
        config.rabbit.breeding_age = 1;
        config.rabbit.breeding_probability = 1.0;
        config.rabbit.max_litter_size = 4;

        // Different seeds exercise different litter draws; none may
        // exceed the 3 free corner neighbors.
        for seed in 0..20 {
            let mut sim = Simulator::empty(config.clone(), seed);
            sim.insert(Species::Rabbit, Location::new(0, 0)).unwrap();
            sim.step().unwrap();
            assert!(
                sim.stats.births <= 3,
                "corner litter cannot exceed 3 free cells, got {}",
                sim.stats.births
            );
        }
    }

    #[test]
    fn test_determinism_same_seed() {
        let config = small_config(20, 20);
        let mut a = Simulator::new_with_seed(config.clone(), 77).unwrap();
        let mut b = Simulator::new_with_seed(config, 77).unwrap();

        for _ in 0..25 {
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.snapshot().cells, b.snapshot().cells);
            assert_eq!(a.stats.births, b.stats.births);
            assert_eq!(a.stats.deaths, b.stats.deaths);
        }
    }
}
