//! Animal state and the shared lifecycle state machine.
//!
//! Species-specific behavior is dispatched on the [`Species`] tag by the
//! simulator; this module holds everything common to all animals: aging,
//! hunger, death, placement, and the breeding draw.

use crate::config::SpeciesConfig;
use crate::error::SimError;
use crate::field::Field;
use crate::location::Location;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Slot of an animal in the simulator's animal table. Stable within one
/// step; reassigned when the table is compacted between steps.
pub type AnimalId = usize;

/// Species tag. Prey relations are fixed at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Rabbit,
    Fox,
    Wolf,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Rabbit, Species::Fox, Species::Wolf];

    /// The species this one hunts. Empty for prey-only species.
    pub fn prey(self) -> &'static [Species] {
        match self {
            Species::Rabbit => &[],
            Species::Fox => &[Species::Rabbit],
            Species::Wolf => &[Species::Rabbit, Species::Fox],
        }
    }

    pub fn is_predator(self) -> bool {
        !self.prey().is_empty()
    }

    /// One-character symbol for console rendering.
    pub fn symbol(self) -> char {
        match self {
            Species::Rabbit => 'R',
            Species::Fox => 'F',
            Species::Wolf => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Fox => "fox",
            Species::Wolf => "wolf",
        }
    }
}

/// A single animal. Lifecycle is a two-state machine: alive, then dead.
/// Dead is terminal; a dead animal keeps no location and is dropped from
/// the simulator's table at the end of the step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Animal {
    /// Current slot in the simulator's animal table.
    pub id: AnimalId,
    pub species: Species,
    pub age: u32,
    /// Steps left before starvation. Predators only; 0 and unused for prey.
    pub food_level: u32,
    alive: bool,
    location: Option<Location>,
}

impl Animal {
    /// A newborn: age zero, full food level, not yet placed.
    pub fn newborn(id: AnimalId, species: Species, params: &SpeciesConfig) -> Self {
        Self {
            id,
            species,
            age: 0,
            food_level: if species.is_predator() { params.food_value } else { 0 },
            alive: true,
            location: None,
        }
    }

    /// An initial-population animal with random age and hunger, so the
    /// first generation does not age and breed in lockstep.
    pub fn with_random_age<R: Rng>(
        id: AnimalId,
        species: Species,
        params: &SpeciesConfig,
        rng: &mut R,
    ) -> Self {
        let mut animal = Self::newborn(id, species, params);
        animal.age = rng.gen_range(0..params.max_age);
        if species.is_predator() && params.food_value > 0 {
            animal.food_level = rng.gen_range(0..params.food_value);
        }
        animal
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Age by one step; dying of old age past the species maximum.
    /// An animal at exactly `max_age` stays alive; `max_age + 1` dies.
    pub fn increment_age(&mut self, params: &SpeciesConfig, field: &mut Field) {
        self.age += 1;
        if self.age > params.max_age {
            self.set_dead(field);
        }
    }

    /// Make this animal hungrier; starvation kills at zero. Called before
    /// any feeding opportunity in the predator step rule, so a predator
    /// on its last food point dies even with prey adjacent.
    pub fn increment_hunger(&mut self, field: &mut Field) {
        self.food_level = self.food_level.saturating_sub(1);
        if self.food_level == 0 {
            self.set_dead(field);
        }
    }

    /// Transition to the terminal dead state, clearing the field cell.
    /// Idempotent: calling on an already-dead animal does nothing.
    pub fn set_dead(&mut self, field: &mut Field) {
        self.alive = false;
        if let Some(location) = self.location.take() {
            field.clear(location);
        }
    }

    /// Move to a new cell, clearing the old one first. The ordering
    /// matters: clearing after placing would leave a transient double
    /// occupancy and trip the field's placement contract.
    pub fn set_location(&mut self, field: &mut Field, new_location: Location) -> Result<(), SimError> {
        if let Some(old) = self.location.take() {
            field.clear(old);
        }
        field.place(self.id, new_location)?;
        self.location = Some(new_location);
        Ok(())
    }

    /// Whether this animal has reached its species' breeding age.
    pub fn can_breed(&self, params: &SpeciesConfig) -> bool {
        self.age >= params.breeding_age
    }

    /// Number of offspring for this step. Zero before breeding age;
    /// otherwise one uniform draw gates breeding and, on success, a
    /// second draw picks the litter size in `[1, max_litter_size]`. The
    /// draws short-circuit so a fixed seed replays identically.
    pub fn breed<R: Rng>(&self, params: &SpeciesConfig, rng: &mut R) -> u32 {
        if self.can_breed(params) && rng.gen::<f64>() <= params.breeding_probability {
            rng.gen_range(1..=params.max_litter_size)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rabbit_params() -> SpeciesConfig {
        Config::default().rabbit
    }

    fn placed_rabbit(field: &mut Field) -> Animal {
        let mut animal = Animal::newborn(0, Species::Rabbit, &rabbit_params());
        animal.set_location(field, Location::new(1, 1)).unwrap();
        animal
    }

    #[test]
    fn test_newborn_state() {
        let params = Config::default().wolf;
        let wolf = Animal::newborn(3, Species::Wolf, &params);
        assert_eq!(wolf.age, 0);
        assert_eq!(wolf.food_level, params.food_value);
        assert!(wolf.is_alive());
        assert_eq!(wolf.location(), None);

        let rabbit = Animal::newborn(4, Species::Rabbit, &rabbit_params());
        assert_eq!(rabbit.food_level, 0);
    }

    #[test]
    fn test_max_age_boundary() {
        let params = rabbit_params();
        let mut field = Field::new(3, 3);
        let mut rabbit = placed_rabbit(&mut field);

        rabbit.age = params.max_age - 1;
        rabbit.increment_age(&params, &mut field);
        assert!(rabbit.is_alive(), "age == max_age must stay alive");

        rabbit.increment_age(&params, &mut field);
        assert!(!rabbit.is_alive(), "age == max_age + 1 must die");
        assert_eq!(rabbit.location(), None);
        assert_eq!(field.animal_at(Location::new(1, 1)), None);
    }

    #[test]
    fn test_starvation_at_zero() {
        let params = Config::default().fox;
        let mut field = Field::new(3, 3);
        let mut fox = Animal::newborn(0, Species::Fox, &params);
        fox.set_location(&mut field, Location::new(0, 0)).unwrap();

        fox.food_level = 2;
        fox.increment_hunger(&mut field);
        assert!(fox.is_alive());
        fox.increment_hunger(&mut field);
        assert!(!fox.is_alive());
    }

    #[test]
    fn test_set_dead_is_idempotent() {
        let mut field = Field::new(3, 3);
        let mut rabbit = placed_rabbit(&mut field);

        rabbit.set_dead(&mut field);
        let after_first = (rabbit.is_alive(), rabbit.location());

        rabbit.set_dead(&mut field);
        assert_eq!((rabbit.is_alive(), rabbit.location()), after_first);
        assert_eq!(field.animal_at(Location::new(1, 1)), None);
    }

    #[test]
    fn test_set_location_clears_old_cell() {
        let mut field = Field::new(3, 3);
        let mut rabbit = placed_rabbit(&mut field);

        rabbit.set_location(&mut field, Location::new(2, 2)).unwrap();
        assert_eq!(field.animal_at(Location::new(1, 1)), None);
        assert_eq!(field.animal_at(Location::new(2, 2)), Some(0));
        assert_eq!(rabbit.location(), Some(Location::new(2, 2)));
        assert_eq!(field.occupied_count(), 1);
    }

    #[test]
    fn test_breed_zero_probability_never_breeds() {
        let mut params = rabbit_params();
        params.breeding_probability = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut rabbit = Animal::newborn(0, Species::Rabbit, &params);
        rabbit.age = params.breeding_age + 10;
        for _ in 0..100 {
            assert_eq!(rabbit.breed(&params, &mut rng), 0);
        }
    }

    #[test]
    fn test_breed_certain_probability_single_litter() {
        let mut params = rabbit_params();
        params.breeding_probability = 1.0;
        params.max_litter_size = 1;
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let mut rabbit = Animal::newborn(0, Species::Rabbit, &params);
        rabbit.age = params.breeding_age - 1;
        assert_eq!(rabbit.breed(&params, &mut rng), 0, "below breeding age");

        rabbit.age = params.breeding_age;
        for _ in 0..100 {
            assert_eq!(rabbit.breed(&params, &mut rng), 1);
        }
    }

    #[test]
    fn test_breed_litter_within_bounds() {
        let mut params = rabbit_params();
        params.breeding_probability = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut rabbit = Animal::newborn(0, Species::Rabbit, &params);
        rabbit.age = params.breeding_age;
        for _ in 0..200 {
            let births = rabbit.breed(&params, &mut rng);
            assert!(births >= 1 && births <= params.max_litter_size);
        }
    }

    #[test]
    fn test_prey_relations() {
        assert!(Species::Rabbit.prey().is_empty());
        assert_eq!(Species::Fox.prey(), &[Species::Rabbit]);
        assert_eq!(Species::Wolf.prey(), &[Species::Rabbit, Species::Fox]);
        assert!(!Species::Rabbit.is_predator());
        assert!(Species::Wolf.is_predator());
    }
}
