// --- File: lib.rs ---
// Aquarium fish simulation core.
//
// A tick-driven model of fish that swim, feed, school, age and die in a
// bounded tank. The caller owns the clock and calls
// `Environment::advance` with the elapsed time; rendering reads snapshots.

pub mod behavior;
pub mod config;
pub mod constants;
pub mod creature;
pub mod environment;
pub mod error;
pub mod food;
pub mod physiology;
pub mod steering;
pub mod tank;
pub mod vector;

pub use behavior::{Behavior, CohesionTarget, FlockingGains, Territory};
pub use config::{BodySize, PopulationEntry, SimulationConfig, SpeciesConfig, SpriteRect, TankConfig};
pub use creature::{Creature, CreatureId, CreatureSnapshot, InitialState};
pub use environment::{Death, Environment, EnvironmentSnapshot, SimRng, TickReport};
pub use error::ConfigError;
pub use food::{Food, FoodSnapshot};
pub use physiology::{DeathCause, Physiology};
pub use tank::Tank;
// --- End of File: lib.rs ---
