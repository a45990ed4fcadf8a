// --- File: environment.rs ---
use crate::config::{PopulationEntry, SimulationConfig, SpeciesConfig};
use crate::constants::{
    DEFAULT_WATER_QUALITY, INITIAL_TIME_SCALE, MAX_TIME_SCALE, MIN_TIME_SCALE,
    TIME_SCALE_ADJUST_FACTOR,
};
use crate::creature::{Creature, CreatureId, CreatureSnapshot, InitialState, Peers, TickContext};
use crate::error::ConfigError;
use crate::food::{Food, FoodSnapshot};
use crate::physiology::{self, DeathCause};
use crate::tank::Tank;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type SimRng = StdRng;

// --- Tick Reporting ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Death {
    pub id: CreatureId,
    pub species: String,
    pub cause: DeathCause,
}

/// What happened during one call to [`Environment::advance`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick number after the advance. Unchanged when the call was a no-op.
    pub tick: u64,
    /// Simulated seconds actually applied (after time scaling). Zero for a no-op.
    pub dt: f32,
    pub deaths: Vec<Death>,
    pub food_eaten: u64,
    pub food_expired: usize,
}

impl TickReport {
    fn idle(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.dt == 0.0
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    pub tick: u64,
    pub elapsed_secs: f64,
    pub water_quality: f32,
    pub tank: Tank,
    pub creatures: Vec<CreatureSnapshot>,
    pub foods: Vec<FoodSnapshot>,
}

// --- Environment ---

/// Owns the tank, every creature and every food pellet, and drives ticks.
pub struct Environment {
    tank: Tank,
    creatures: Vec<Creature>,
    foods: Vec<Food>,
    water_quality: f32,
    species: Vec<Arc<SpeciesConfig>>,
    population: Vec<PopulationEntry>,
    rng: SimRng,
    next_id: u64,
    tick: u64,
    elapsed: f64,
    time_scale: f32,
    is_paused: bool,
}

impl Environment {
    /// Build the tank from `config` and seed its population.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::build(config, SimRng::from_entropy())
    }

    /// Like [`Environment::new`] with a fixed random seed.
    pub fn with_seed(config: &SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, SimRng::seed_from_u64(seed))
    }

    /// An empty tank with no species registered and clean water.
    pub fn empty(tank: Tank, seed: u64) -> Self {
        Self {
            tank,
            creatures: Vec::new(),
            foods: Vec::new(),
            water_quality: DEFAULT_WATER_QUALITY,
            species: Vec::new(),
            population: Vec::new(),
            rng: SimRng::seed_from_u64(seed),
            next_id: 1,
            tick: 0,
            elapsed: 0.0,
            time_scale: INITIAL_TIME_SCALE,
            is_paused: false,
        }
    }

    fn build(config: &SimulationConfig, rng: SimRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let tank = Tank::from_config(&config.tank)?;
        let mut env = Self {
            tank,
            creatures: Vec::new(),
            foods: Vec::new(),
            water_quality: config.water_quality,
            species: config.shared_species(),
            population: config.population.clone(),
            rng,
            next_id: 1,
            tick: 0,
            elapsed: 0.0,
            time_scale: INITIAL_TIME_SCALE,
            is_paused: false,
        };
        let population = env.population.clone();
        env.seed_population(&population)?;
        Ok(env)
    }

    /// Spawn `count` creatures at random positions for each entry. Species are
    /// looked up by name among the registered ones.
    pub fn seed_population(&mut self, population: &[PopulationEntry]) -> Result<usize, ConfigError> {
        let mut spawned = 0;
        for entry in population {
            let species = self
                .species_named(&entry.species)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownSpecies(entry.species.clone()))?;
            for _ in 0..entry.count {
                self.spawn_creature(Arc::clone(&species), None)?;
                spawned += 1;
            }
        }
        log::info!(
            "Seeded {} creatures ({} total in tank)",
            spawned,
            self.creatures.len()
        );
        Ok(spawned)
    }

    /// Drop every creature and pellet and re-seed the configured population.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        log::info!("Restarting simulation...");
        self.creatures.clear();
        self.foods.clear();
        self.tick = 0;
        self.elapsed = 0.0;
        self.time_scale = INITIAL_TIME_SCALE;
        self.is_paused = false;
        let population = self.population.clone();
        self.seed_population(&population)?;
        Ok(())
    }

    // --- Tick ---

    /// Advance the simulation by `delta_time` wall-clock seconds, scaled by the
    /// current time scale.
    ///
    /// Creatures update in collection order against the live collections, so a
    /// creature sees the already-moved state of every creature before it. Dead
    /// creatures and eaten or expired food are removed once everything has
    /// updated.
    pub fn advance(&mut self, delta_time: f32) -> TickReport {
        if self.is_paused {
            return TickReport::idle(self.tick);
        }
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::warn!("Ignoring invalid tick delta {}", delta_time);
            return TickReport::idle(self.tick);
        }
        let dt = delta_time * self.time_scale;
        if dt <= 0.0 {
            return TickReport::idle(self.tick);
        }

        self.tick += 1;
        self.elapsed += dt as f64;
        let mut report = TickReport {
            tick: self.tick,
            dt,
            ..TickReport::default()
        };

        // --- Creature Pass ---
        for index in 0..self.creatures.len() {
            let (before, rest) = self.creatures.split_at_mut(index);
            let Some((creature, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = TickContext {
                tank: &self.tank,
                peers: Peers::new(before, after),
                foods: &mut self.foods,
                water_quality: self.water_quality,
            };
            let eaten_before = creature.food_eaten();
            creature.update(dt, &mut ctx, &mut self.rng);
            report.food_eaten += creature.food_eaten() - eaten_before;
        }

        // --- Food Pass ---
        for food in self.foods.iter_mut().filter(|food| !food.is_consumed()) {
            food.update(dt, &self.tank);
        }

        // --- Removals ---
        let before_foods = self.foods.len();
        let consumed = self.foods.iter().filter(|food| food.is_consumed()).count();
        self.foods.retain(|food| !food.is_gone());
        report.food_expired = before_foods - self.foods.len() - consumed;

        let tick = self.tick;
        let deaths = &mut report.deaths;
        self.creatures.retain(|creature| match creature.death_cause() {
            None => true,
            Some(cause) => {
                log::info!(
                    "Tick {}: {} {} died ({:?}) after eating {} food",
                    tick,
                    creature.species().name,
                    creature.id(),
                    cause,
                    creature.food_eaten()
                );
                deaths.push(Death {
                    id: creature.id(),
                    species: creature.species().name.clone(),
                    cause,
                });
                false
            }
        });

        log::debug!(
            "Tick {} (dt {:.4}s): {} creatures, {} food, {} eaten, {} expired, {} died",
            report.tick,
            report.dt,
            self.creatures.len(),
            self.foods.len(),
            report.food_eaten,
            report.food_expired,
            report.deaths.len()
        );
        report
    }

    // --- Spawning ---

    /// Add a creature at `position` (clamped into the water), or at a random
    /// spot when `None`.
    pub fn spawn_creature(
        &mut self,
        species: Arc<SpeciesConfig>,
        position: Option<Vec2>,
    ) -> Result<CreatureId, ConfigError> {
        self.spawn_creature_with(species, position, InitialState::default())
    }

    pub fn spawn_creature_with(
        &mut self,
        species: Arc<SpeciesConfig>,
        position: Option<Vec2>,
        initial: InitialState,
    ) -> Result<CreatureId, ConfigError> {
        let position = match position {
            Some(position) => self.clamp_spawn(position, "creature"),
            None => {
                let size = physiology::grown_size(
                    species.min_size,
                    species.max_size,
                    initial.food_eaten,
                    species.food_required,
                );
                self.tank.random_position(&mut self.rng, size)
            }
        };
        let id = CreatureId(self.next_id);
        let creature = Creature::new(id, species, position, initial)?;
        self.next_id += 1;
        log::debug!(
            "Spawned {} {} at {:?}",
            creature.species().name,
            id,
            position
        );
        self.creatures.push(creature);
        Ok(id)
    }

    pub fn spawn_creature_named(
        &mut self,
        name: &str,
        position: Option<Vec2>,
    ) -> Result<CreatureId, ConfigError> {
        let species = self
            .species_named(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownSpecies(name.to_string()))?;
        self.spawn_creature(species, position)
    }

    /// Drop a food pellet at `position` (clamped into the water).
    pub fn spawn_food(&mut self, position: Vec2) {
        let position = self.clamp_spawn(position, "food");
        self.foods.push(Food::new(position));
    }

    fn clamp_spawn(&self, position: Vec2, what: &str) -> Vec2 {
        if !position.is_finite() {
            log::warn!(
                "Non-finite {} spawn position {:?}, using tank centre",
                what,
                position
            );
            return Vec2::new(self.tank.width(), self.tank.sand_line()) / 2.0;
        }
        if self.tank.contains(position) {
            return position;
        }
        let clamped = self.tank.clamp_point(position);
        log::warn!(
            "{} spawn position {:?} is outside the tank, clamped to {:?}",
            what,
            position,
            clamped
        );
        clamped
    }

    // --- Accessors ---

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.id() == id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|creature| creature.id() == id)
    }

    pub fn species(&self) -> &[Arc<SpeciesConfig>] {
        &self.species
    }

    pub fn species_named(&self, name: &str) -> Option<&Arc<SpeciesConfig>> {
        self.species.iter().find(|species| species.name == name)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since start or restart.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn water_quality(&self) -> f32 {
        self.water_quality
    }

    pub fn set_water_quality(&mut self, quality: f32) {
        if !quality.is_finite() {
            log::warn!("Ignoring non-finite water quality {}", quality);
            return;
        }
        let clamped = quality.clamp(0.0, 1.0);
        if clamped != quality {
            log::warn!("Water quality {} clamped to {}", quality, clamped);
        }
        self.water_quality = clamped;
    }

    // --- Clock Controls ---

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        if !scale.is_finite() {
            log::warn!("Ignoring non-finite time scale {}", scale);
            return;
        }
        self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }

    /// Double or halve the time scale.
    pub fn adjust_speed(&mut self, increase: bool) {
        self.time_scale = if increase {
            if self.time_scale <= 0.0 {
                INITIAL_TIME_SCALE
            } else {
                (self.time_scale * TIME_SCALE_ADJUST_FACTOR).min(MAX_TIME_SCALE)
            }
        } else {
            (self.time_scale / TIME_SCALE_ADJUST_FACTOR).max(MIN_TIME_SCALE)
        };
        log::info!("Time scale: {:.3}", self.time_scale);
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        log::info!(
            "Simulation {}",
            if self.is_paused { "paused" } else { "resumed" }
        );
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    // --- Snapshots ---

    pub fn creature_snapshots(&self) -> Vec<CreatureSnapshot> {
        self.creatures.iter().map(Creature::snapshot).collect()
    }

    pub fn food_snapshots(&self) -> Vec<FoodSnapshot> {
        self.foods.iter().map(Food::snapshot).collect()
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            tick: self.tick,
            elapsed_secs: self.elapsed,
            water_quality: self.water_quality,
            tank: self.tank,
            creatures: self.creature_snapshots(),
            foods: self.food_snapshots(),
        }
    }

    /// Living creatures per species name.
    pub fn census(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for creature in &self.creatures {
            *counts.entry(creature.species().name.clone()).or_insert(0) += 1;
        }
        counts
    }
}
// --- End of File: environment.rs ---
