// --- File: behavior.rs ---
use crate::creature::{Creature, Peers};
use crate::error::ConfigError;
use crate::steering;
use crate::tank::Tank;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where cohesion steers a schooling creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohesionTarget {
    /// Towards the nearest visible ally, the same one separation and alignment use.
    #[default]
    NearestNeighbour,
    /// Towards the centroid of every visible ally.
    LocalCentroid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockingGains {
    pub separation_distance: f32,
    pub kp_separation: f32,
    pub kp_alignment: f32,
    pub kp_cohesion: f32,
    #[serde(default)]
    pub cohesion_target: CohesionTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub min: Vec2,
    pub max: Vec2,
}

impl Territory {
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Steering strategy a species is configured with.
///
/// Every variant goes through the same per-tick order: food seeking, then
/// default locomotion when no food pulled, then threat escape. Only the
/// default-locomotion step is variant specific.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// Separation, alignment and cohesion with same-species neighbours, plus cruising.
    Schooling(FlockingGains),
    /// Cruises alone, pulled back home when it strays out of its territory.
    Solitary { territory: Territory, kp_territory: f32 },
    /// Cruises while holding a fixed clearance above the sand.
    BottomDwelling { ground_clearance: f32, kp_ground: f32 },
    /// Chases the nearest smaller creature of another species in range.
    Predatory { attack_range: f32, kp_pursuit: f32 },
    /// Slow horizontal drift without vertical jitter.
    Drifting { drift_speed: f32 },
    /// Holds station at a preferred point.
    Stationary { preferred_position: Vec2, kp_station: f32 },
}

impl Behavior {
    pub fn label(&self) -> &'static str {
        match self {
            Behavior::Schooling(_) => "schooling",
            Behavior::Solitary { .. } => "solitary",
            Behavior::BottomDwelling { .. } => "bottom_dwelling",
            Behavior::Predatory { .. } => "predatory",
            Behavior::Drifting { .. } => "drifting",
            Behavior::Stationary { .. } => "stationary",
        }
    }

    pub fn validate(&self, species: &str) -> Result<(), ConfigError> {
        let gains: Vec<(&'static str, f32)> = match self {
            Behavior::Schooling(gains) => vec![
                ("separation_distance", gains.separation_distance),
                ("kp_separation", gains.kp_separation),
                ("kp_alignment", gains.kp_alignment),
                ("kp_cohesion", gains.kp_cohesion),
            ],
            Behavior::Solitary { kp_territory, .. } => vec![("kp_territory", *kp_territory)],
            Behavior::BottomDwelling {
                ground_clearance,
                kp_ground,
            } => vec![
                ("ground_clearance", *ground_clearance),
                ("kp_ground", *kp_ground),
            ],
            Behavior::Predatory {
                attack_range,
                kp_pursuit,
            } => vec![("attack_range", *attack_range), ("kp_pursuit", *kp_pursuit)],
            Behavior::Drifting { drift_speed } => vec![("drift_speed", *drift_speed)],
            Behavior::Stationary { kp_station, .. } => vec![("kp_station", *kp_station)],
        };
        for (field, value) in gains {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative {
                    species: species.to_string(),
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }

    /// Default locomotion force, used on ticks where food seeking produced nothing.
    pub fn locomotion<R: Rng + ?Sized>(
        &self,
        creature: &Creature,
        peers: Peers<'_>,
        tank: &Tank,
        rng: &mut R,
    ) -> Vec2 {
        let species = creature.species();
        let health = creature.physiology.health as f32;
        let head = creature.head();
        let cruise = |rng: &mut R| {
            steering::cruise(
                creature.velocity,
                creature.facing_right(),
                species.cruising_speed,
                species.kp_cruising,
                rng,
            )
        };

        match *self {
            Behavior::Schooling(gains) => {
                let mut force = Vec2::ZERO;
                if let Some(ally) = peers.nearest_ally(creature) {
                    force += steering::separation(
                        head,
                        ally.position,
                        gains.separation_distance,
                        gains.kp_separation,
                        health,
                    );
                    force +=
                        steering::alignment(creature.velocity, ally.velocity, gains.kp_alignment, health);
                    let target = match gains.cohesion_target {
                        CohesionTarget::NearestNeighbour => ally.position,
                        CohesionTarget::LocalCentroid => {
                            peers.ally_centroid(creature).unwrap_or(ally.position)
                        }
                    };
                    force += steering::cohesion(head, target, gains.kp_cohesion, health);
                }
                force + cruise(rng)
            }
            Behavior::Solitary {
                territory,
                kp_territory,
            } => {
                let mut force = cruise(rng);
                if !territory.contains(creature.position) {
                    force += steering::seek(creature.position, territory.center(), kp_territory);
                }
                force
            }
            Behavior::BottomDwelling {
                ground_clearance,
                kp_ground,
            } => {
                let floor = tank.sand_line() - ground_clearance - creature.size().height / 2.0;
                let mut force = cruise(rng);
                // Replace the vertical part of cruising with depth keeping.
                force.y = (floor - creature.position.y) * kp_ground - creature.velocity.y;
                force
            }
            Behavior::Predatory {
                attack_range,
                kp_pursuit,
            } => match peers.nearest_prey(creature, attack_range) {
                Some(prey) => steering::seek(head, prey.head(), kp_pursuit * health),
                None => cruise(rng),
            },
            Behavior::Drifting { drift_speed } => steering::drift(
                creature.velocity,
                creature.facing_right(),
                drift_speed,
                species.kp_cruising,
            ),
            Behavior::Stationary {
                preferred_position,
                kp_station,
            } => steering::station_keep(
                creature.position,
                creature.velocity,
                preferred_position,
                kp_station,
            ),
        }
    }
}

// --- End of File: behavior.rs ---
