// --- File: creature.rs ---
use crate::config::{BodySize, SpeciesConfig, SpriteRect};
use crate::constants::{EATING_RADIUS, SAND_BOUNCE_DAMPING};
use crate::error::ConfigError;
use crate::food::Food;
use crate::physiology::{self, DeathCause, Physiology, ThreatSighting};
use crate::steering;
use crate::tank::Tank;
use crate::vector::Vec2Ext;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Starting state overrides. Defaults: hungry, healthy, at rest, full lifespan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub velocity: Vec2,
    pub fullness: f64,
    pub health: f64,
    pub food_eaten: u64,
    /// `None` takes the species lifespan.
    pub remaining_lifetime: Option<f64>,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            fullness: 0.0,
            health: 1.0,
            food_eaten: 0,
            remaining_lifetime: None,
        }
    }
}

impl InitialState {
    /// Rejects NaN and infinite values. Out-of-range levels are clamped by `Creature::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("velocity.x", self.velocity.x as f64),
            ("velocity.y", self.velocity.y as f64),
            ("fullness", self.fullness),
            ("health", self.health),
            ("remaining_lifetime", self.remaining_lifetime.unwrap_or(0.0)),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::InvalidInitialState { field, value });
            }
        }
        Ok(())
    }
}

/// Everything a creature can see and touch during its update.
pub struct TickContext<'a> {
    pub tank: &'a Tank,
    pub peers: Peers<'a>,
    pub foods: &'a mut [Food],
    pub water_quality: f32,
}

/// The other creatures in the tank, in collection order, excluding the one
/// being updated. Those before it have already moved this tick.
#[derive(Debug, Clone, Copy)]
pub struct Peers<'a> {
    before: &'a [Creature],
    after: &'a [Creature],
}

impl<'a> Peers<'a> {
    pub fn new(before: &'a [Creature], after: &'a [Creature]) -> Self {
        Self { before, after }
    }

    pub fn none() -> Self {
        Self::new(&[], &[])
    }

    pub fn iter(self) -> impl Iterator<Item = &'a Creature> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn len(self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Same-species creatures within `viewer`'s detection range.
    pub fn visible_allies<'v>(self, viewer: &'v Creature) -> impl Iterator<Item = &'a Creature> + 'v
    where
        'a: 'v,
    {
        self.iter()
            .filter(move |other| viewer.is_same_species(other) && viewer.can_see(other))
    }

    /// Nearest visible ally by head-to-centre distance; ties keep the first found.
    pub fn nearest_ally(self, viewer: &Creature) -> Option<&'a Creature> {
        let mut nearest = None;
        let mut min_dist = f32::MAX;
        for ally in self.visible_allies(viewer) {
            let dist = viewer.head.distance(ally.position);
            if dist < min_dist {
                nearest = Some(ally);
                min_dist = dist;
            }
        }
        nearest
    }

    pub fn ally_centroid(self, viewer: &Creature) -> Option<Vec2> {
        let (sum, count) = self
            .visible_allies(viewer)
            .fold((Vec2::ZERO, 0usize), |(sum, count), ally| {
                (sum + ally.position, count + 1)
            });
        (count > 0).then(|| sum / count as f32)
    }

    /// Nearest smaller creature of another species within `range` of the head.
    pub fn nearest_prey(self, hunter: &Creature, range: f32) -> Option<&'a Creature> {
        let own_area = hunter.size.area();
        let mut nearest = None;
        let mut min_dist = f32::MAX;
        for other in self.iter() {
            if hunter.is_same_species(other) || other.size.area() >= own_area {
                continue;
            }
            let dist = hunter.head.distance(other.position);
            if dist <= range && dist < min_dist {
                nearest = Some(other);
                min_dist = dist;
            }
        }
        nearest
    }
}

#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    species: Arc<SpeciesConfig>,
    /// Body centre.
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
    pub physiology: Physiology,
    food_eaten: u64,
    size: BodySize,
    facing_right: bool,
    top_left: Vec2,
    head: Vec2,
    threats: Vec<ThreatSighting>,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        species: Arc<SpeciesConfig>,
        position: Vec2,
        initial: InitialState,
    ) -> Result<Self, ConfigError> {
        species.validate()?;
        initial.validate()?;
        let physiology = Physiology {
            fullness: initial.fullness.clamp(0.0, 1.0),
            health: initial.health.clamp(0.0, 1.0),
            remaining_lifetime: initial.remaining_lifetime.unwrap_or(species.lifespan_secs),
        };
        let size = physiology::grown_size(
            species.min_size,
            species.max_size,
            initial.food_eaten,
            species.food_required,
        );
        let velocity = initial.velocity.limit_length(species.max_velocity);
        let mut creature = Self {
            id,
            species,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            physiology,
            food_eaten: initial.food_eaten,
            size,
            facing_right: false,
            top_left: Vec2::ZERO,
            head: Vec2::ZERO,
            threats: Vec::new(),
        };
        creature.refresh_derived();
        Ok(creature)
    }

    // --- Accessors ---

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn species(&self) -> &SpeciesConfig {
        &self.species
    }

    pub fn species_handle(&self) -> &Arc<SpeciesConfig> {
        &self.species
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn food_eaten(&self) -> u64 {
        self.food_eaten
    }

    pub fn size(&self) -> BodySize {
        self.size
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Unrotated top-left corner of the sprite.
    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    /// Forward-most body point, rotated with the velocity. Used for sensing and walls.
    pub fn head(&self) -> Vec2 {
        self.head
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.velocity.heading_degrees(self.facing_right)
    }

    pub fn threats(&self) -> &[ThreatSighting] {
        &self.threats
    }

    pub fn is_alive(&self) -> bool {
        self.physiology.is_alive()
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.physiology.death_cause()
    }

    pub fn is_same_species(&self, other: &Creature) -> bool {
        Arc::ptr_eq(&self.species, &other.species) || self.species.name == other.species.name
    }

    /// Whether `other`'s centre is within detection range of our head.
    pub fn can_see(&self, other: &Creature) -> bool {
        self.head.distance(other.position) <= self.species.detection_range
    }

    // --- Tick ---

    /// Advance this creature by `dt` seconds. May consume one food item.
    /// Returns whether the creature is still alive; a creature that is already
    /// dead is left untouched.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        ctx: &mut TickContext<'_>,
        rng: &mut R,
    ) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.acceleration = Vec2::ZERO;

        let chase = self.seek_food(ctx.foods);
        self.acceleration += chase;
        if chase == Vec2::ZERO {
            let locomotion = self.species.behavior.locomotion(self, ctx.peers, ctx.tank, rng);
            self.acceleration += locomotion;
        }
        // Escape runs even mid-chase.
        let escape = self.escape_threats(ctx.peers);
        self.acceleration += escape;

        self.acceleration = self.acceleration.limit_length(self.species.max_acceleration);
        self.velocity =
            (self.velocity + self.acceleration * dt).limit_length(self.species.max_velocity);

        self.integrate_position(dt, ctx.tank);
        self.refresh_derived();
        self.bounce_off_walls(ctx.tank);

        self.physiology.decay(
            dt,
            ctx.water_quality,
            self.head,
            self.size,
            &self.threats,
        );
        self.size = physiology::grown_size(
            self.species.min_size,
            self.species.max_size,
            self.food_eaten,
            self.species.food_required,
        );

        log::trace!(
            "{} {} pos={:?} vel={:?} acc={:?} health={:.6} fullness={:.6}",
            self.species.name,
            self.id,
            self.position,
            self.velocity,
            self.acceleration,
            self.physiology.health,
            self.physiology.fullness
        );

        self.is_alive()
    }

    fn seek_food(&mut self, foods: &mut [Food]) -> Vec2 {
        if !self.physiology.wants_food() {
            return Vec2::ZERO;
        }
        let Some(index) = steering::nearest_food(self.head, foods, self.species.detection_range)
        else {
            return Vec2::ZERO;
        };

        let target = foods[index].position();
        if self.head.distance(target) <= EATING_RADIUS {
            foods[index].mark_consumed();
            self.food_eaten += 1;
            self.physiology.feed();
            log::debug!(
                "{} {} ate food at {:?} (total {})",
                self.species.name,
                self.id,
                target,
                self.food_eaten
            );
        }
        steering::chase_food(
            self.head,
            target,
            self.species.kp_chase_food,
            self.physiology.health as f32,
            self.physiology.fullness as f32,
        )
    }

    fn escape_threats(&mut self, peers: Peers<'_>) -> Vec2 {
        self.threats.clear();
        let own_area = self.size.area();
        let mut force = Vec2::ZERO;
        for other in peers.iter() {
            if self.is_same_species(other) || !self.can_see(other) {
                continue;
            }
            let area_difference = own_area - other.size.area();
            if area_difference < 0.0 {
                self.threats.push(ThreatSighting {
                    id: other.id,
                    head: other.head,
                    size: other.size,
                });
                force += steering::escape(
                    self.head,
                    other.head,
                    area_difference,
                    self.species.kp_escape,
                );
            }
        }
        force
    }

    fn integrate_position(&mut self, dt: f32, tank: &Tank) {
        let half_width = self.size.width / 2.0;
        let half_height = self.size.height / 2.0;
        // Half the body width projected onto the direction of travel.
        let heading = self
            .velocity
            .heading_degrees(self.velocity.x > 0.0)
            .to_radians();
        let margin_x = heading.cos().abs() * half_width;

        let max_x = (tank.width() - margin_x).max(0.0);
        let min_y = half_height;
        let max_y = (tank.sand_line() - half_height).max(min_y);

        let next = self.position + self.velocity * dt;
        self.position = Vec2::new(next.x.clamp(0.0, max_x), next.y.clamp(min_y, max_y));
    }

    fn refresh_derived(&mut self) {
        self.facing_right = self.velocity.x > 0.0;
        let half = Vec2::new(self.size.width, self.size.height) / 2.0;
        self.top_left = self.position - half;

        let nose = if self.facing_right { half.x } else { -half.x };
        let offset = Vec2::new(nose, 0.0).rotate_degrees(self.rotation_degrees());
        self.head = self.position + offset;
    }

    /// Walls reflect velocity that heads into them; the surface stops rising
    /// and the sand bounces back a quarter of the sinking speed.
    fn bounce_off_walls(&mut self, tank: &Tank) {
        if self.head.x <= 0.0 && self.velocity.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        } else if self.head.x >= tank.width() && self.velocity.x > 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.head.y <= 0.0 {
            self.velocity.y = 0.0;
        }
        if self.head.y >= tank.sand_line() && self.velocity.y > 0.0 {
            self.velocity.y = -self.velocity.y * SAND_BOUNCE_DAMPING;
        }
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            id: self.id,
            species: self.species.name.clone(),
            behavior: self.species.behavior.label(),
            position: self.position,
            top_left: self.top_left,
            head: self.head,
            velocity: self.velocity,
            facing_right: self.facing_right,
            rotation_degrees: self.rotation_degrees(),
            size: self.size,
            sprite: self.species.sprite,
            alive: self.is_alive(),
            fullness: self.physiology.fullness,
            health: self.physiology.health,
            food_eaten: self.food_eaten,
            threat_count: self.threats.len(),
        }
    }
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub species: String,
    pub behavior: &'static str,
    pub position: Vec2,
    pub top_left: Vec2,
    pub head: Vec2,
    pub velocity: Vec2,
    pub facing_right: bool,
    pub rotation_degrees: f32,
    pub size: BodySize,
    pub sprite: SpriteRect,
    pub alive: bool,
    pub fullness: f64,
    pub health: f64,
    pub food_eaten: u64,
    pub threat_count: usize,
}
// --- End of File: creature.rs ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{Behavior, CohesionTarget, FlockingGains};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tank() -> Tank {
        Tank::new(500.0, 300.0, 20.0).unwrap()
    }

    fn neon() -> Arc<SpeciesConfig> {
        Arc::new(SpeciesConfig::neon_tetra())
    }

    fn spawn(id: u64, species: &Arc<SpeciesConfig>, position: Vec2, initial: InitialState) -> Creature {
        Creature::new(CreatureId(id), Arc::clone(species), position, initial).unwrap()
    }

    fn step(creature: &mut Creature, dt: f32, foods: &mut [Food], peers: Peers<'_>) -> bool {
        let tank = tank();
        let mut rng = StdRng::seed_from_u64(11);
        let mut ctx = TickContext {
            tank: &tank,
            peers,
            foods,
            water_quality: 0.7,
        };
        creature.update(dt, &mut ctx, &mut rng)
    }

    #[test]
    fn construction_rejects_bad_species() {
        let mut species = SpeciesConfig::neon_tetra();
        species.food_required = 0;
        let result = Creature::new(
            CreatureId(1),
            Arc::new(species),
            Vec2::new(100.0, 100.0),
            InitialState::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn construction_rejects_non_finite_initial_state() {
        let species = neon();
        let cases = [
            (
                "health",
                InitialState {
                    health: f64::NAN,
                    ..InitialState::default()
                },
            ),
            (
                "velocity.x",
                InitialState {
                    velocity: Vec2::new(f32::NAN, 0.0),
                    ..InitialState::default()
                },
            ),
            (
                "remaining_lifetime",
                InitialState {
                    remaining_lifetime: Some(f64::INFINITY),
                    ..InitialState::default()
                },
            ),
        ];
        for (expected, initial) in cases {
            let result = Creature::new(
                CreatureId(1),
                Arc::clone(&species),
                Vec2::new(100.0, 100.0),
                initial,
            );
            match result {
                Err(ConfigError::InvalidInitialState { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn head_sits_half_a_body_ahead() {
        let species = neon();
        let resting = spawn(1, &species, Vec2::new(100.0, 100.0), InitialState::default());
        assert!(!resting.facing_right());
        assert!((resting.head() - Vec2::new(91.0, 100.0)).length() < 1e-4);
        assert_eq!(resting.top_left(), Vec2::new(91.0, 95.0));

        let swimming = spawn(
            2,
            &species,
            Vec2::new(100.0, 100.0),
            InitialState {
                velocity: Vec2::new(0.0, 50.0),
                ..InitialState::default()
            },
        );
        assert!((swimming.head() - Vec2::new(100.0, 109.0)).length() < 1e-4);
    }

    #[test]
    fn eats_food_within_reach() {
        let species = neon();
        let mut fish = spawn(1, &species, Vec2::new(100.0, 100.0), InitialState::default());
        let mut foods = vec![Food::new(fish.head() + Vec2::new(-2.0, 0.0))];
        step(&mut fish, 0.016, &mut foods, Peers::none());
        assert!(foods[0].is_consumed());
        assert_eq!(fish.food_eaten(), 1);
        assert!(fish.physiology.fullness > 0.09);
    }

    #[test]
    fn sated_creature_leaves_food_alone() {
        let species = neon();
        let mut fish = spawn(
            1,
            &species,
            Vec2::new(100.0, 100.0),
            InitialState {
                fullness: 0.95,
                ..InitialState::default()
            },
        );
        let mut foods = vec![Food::new(fish.head())];
        step(&mut fish, 0.016, &mut foods, Peers::none());
        assert!(!foods[0].is_consumed());
        assert_eq!(fish.food_eaten(), 0);
    }

    #[test]
    fn chasing_food_suppresses_cruising() {
        let species = neon();
        let mut fish = spawn(1, &species, Vec2::new(100.0, 100.0), InitialState::default());
        let target = fish.head() + Vec2::new(0.0, -50.0);
        let mut foods = vec![Food::new(target)];
        step(&mut fish, 0.016, &mut foods, Peers::none());
        // Pure chase: straight up, no horizontal cruise component.
        let acc = fish.acceleration();
        assert!(acc.x.abs() < 1e-3, "acc {acc:?}");
        assert!(acc.y < 0.0);
    }

    #[test]
    fn invisible_food_is_ignored() {
        let species = neon();
        let mut fish = spawn(1, &species, Vec2::new(10.0, 100.0), InitialState::default());
        let mut foods = vec![Food::new(Vec2::new(450.0, 100.0))];
        let chase = fish.seek_food(&mut foods);
        assert_eq!(chase, Vec2::ZERO);
    }

    #[test]
    fn limits_hold_after_update() {
        let species = neon();
        let mut fish = spawn(
            1,
            &species,
            Vec2::new(250.0, 150.0),
            InitialState {
                velocity: Vec2::new(-1000.0, 1000.0),
                ..InitialState::default()
            },
        );
        let mut foods = vec![Food::new(Vec2::new(400.0, 50.0))];
        for _ in 0..200 {
            step(&mut fish, 0.05, &mut foods, Peers::none());
            assert!(fish.velocity.length() <= species.max_velocity * 1.0001);
            assert!(fish.acceleration().length() <= species.max_acceleration * 1.0001);
            assert!((0.0..=1.0).contains(&fish.physiology.fullness));
            assert!((0.0..=1.0).contains(&fish.physiology.health));
            assert!(fish.position.x >= 0.0 && fish.position.x <= 500.0);
            assert!(fish.position.y >= 0.0 && fish.position.y <= 280.0);
        }
    }

    #[test]
    fn left_wall_reflects_leftward_velocity() {
        let species = neon();
        let mut fish = spawn(
            1,
            &species,
            Vec2::new(0.0, 150.0),
            InitialState {
                velocity: Vec2::new(-100.0, 0.0),
                ..InitialState::default()
            },
        );
        step(&mut fish, 0.016, &mut [], Peers::none());
        assert!(fish.velocity.x > 0.0, "velocity {:?}", fish.velocity);
    }

    #[test]
    fn sand_bounce_is_damped() {
        let species = neon();
        let tank = tank();
        let mut fish = spawn(
            1,
            &species,
            Vec2::new(250.0, tank.sand_line() - 5.0),
            InitialState {
                velocity: Vec2::new(0.0, 200.0),
                ..InitialState::default()
            },
        );
        step(&mut fish, 0.016, &mut [], Peers::none());
        assert!(fish.velocity.y < 0.0);
        assert!(fish.velocity.y.abs() < 200.0 * 0.3);
    }

    #[test]
    fn dead_creature_is_not_updated() {
        let species = neon();
        let mut fish = spawn(
            1,
            &species,
            Vec2::new(250.0, 150.0),
            InitialState {
                health: 0.0,
                velocity: Vec2::new(20.0, 0.0),
                ..InitialState::default()
            },
        );
        let before = fish.position;
        let tank = tank();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = TickContext {
            tank: &tank,
            peers: Peers::none(),
            foods: &mut [],
            water_quality: 1.0,
        };
        assert!(!fish.update(1.0, &mut ctx, &mut rng));
        assert_eq!(fish.position, before);
        assert_eq!(fish.physiology.health, 0.0);
    }

    #[test]
    fn larger_foreign_species_is_a_threat() {
        let small = neon();
        let big = Arc::new(SpeciesConfig::cardinal_tetra());
        let mut fish = spawn(1, &small, Vec2::new(200.0, 150.0), InitialState::default());
        let shark = spawn(
            2,
            &big,
            Vec2::new(240.0, 150.0),
            InitialState {
                food_eaten: 1500,
                ..InitialState::default()
            },
        );
        let same_kind_giant = spawn(
            3,
            &small,
            Vec2::new(160.0, 150.0),
            InitialState {
                food_eaten: 3000,
                ..InitialState::default()
            },
        );
        let others = [shark, same_kind_giant];
        let force = fish.escape_threats(Peers::new(&others, &[]));
        assert_eq!(fish.threats().len(), 1);
        assert_eq!(fish.threats()[0].id, CreatureId(2));
        assert!(force.x < 0.0);
    }

    #[test]
    fn escape_forces_from_several_threats_add_up() {
        let small = neon();
        let mut fish = spawn(1, &small, Vec2::new(200.0, 150.0), InitialState::default());
        let grown = InitialState {
            food_eaten: 1500,
            ..InitialState::default()
        };
        let ahead = spawn(2, &Arc::new(SpeciesConfig::cardinal_tetra()), Vec2::new(240.0, 150.0), grown);
        let above = spawn(3, &Arc::new(SpeciesConfig::black_neon_tetra()), Vec2::new(200.0, 110.0), grown);

        let own_area = fish.size().area();
        let expected: Vec2 = [&ahead, &above]
            .into_iter()
            .map(|threat| {
                steering::escape(
                    fish.head(),
                    threat.head(),
                    own_area - threat.size().area(),
                    small.kp_escape,
                )
            })
            .sum();

        let others = [ahead, above];
        let force = fish.escape_threats(Peers::new(&others, &[]));
        assert_eq!(fish.threats().len(), 2);
        assert!((force - expected).length() < 1e-4, "force {force:?} expected {expected:?}");
        assert!(force.x < 0.0 && force.y > 0.0);
    }

    #[test]
    fn threats_drain_health() {
        let small = neon();
        let big = Arc::new(SpeciesConfig::cardinal_tetra());
        let mut calm = spawn(1, &small, Vec2::new(200.0, 150.0), InitialState::default());
        let mut harassed = calm.clone();
        let shark = spawn(
            2,
            &big,
            Vec2::new(205.0, 150.0),
            InitialState {
                food_eaten: 3000,
                ..InitialState::default()
            },
        );
        let others = [shark];
        step(&mut calm, 1.0, &mut [], Peers::none());
        step(&mut harassed, 1.0, &mut [], Peers::new(&others, &[]));
        assert!(harassed.physiology.health < calm.physiology.health);
    }

    #[test]
    fn growth_past_food_required_exceeds_max_size() {
        let species = neon();
        let fish = spawn(
            1,
            &species,
            Vec2::new(200.0, 150.0),
            InitialState {
                food_eaten: 3000,
                ..InitialState::default()
            },
        );
        assert!(fish.size().width > species.max_size.width);
        assert!(fish.size().height > species.max_size.height);
    }

    #[test]
    fn nearest_ally_breaks_ties_by_order() {
        let species = neon();
        let viewer = spawn(1, &species, Vec2::new(200.0, 150.0), InitialState::default());
        let head = viewer.head();
        let first = spawn(2, &species, head + Vec2::new(0.0, 30.0), InitialState::default());
        let second = spawn(3, &species, head + Vec2::new(0.0, -30.0), InitialState::default());
        let far = spawn(4, &species, head + Vec2::new(0.0, 250.0), InitialState::default());
        let others = [first, second, far];
        let peers = Peers::new(&others[..1], &others[1..]);
        assert_eq!(peers.nearest_ally(&viewer).map(Creature::id), Some(CreatureId(2)));
        assert_eq!(peers.visible_allies(&viewer).count(), 2);
        let centroid = peers.ally_centroid(&viewer).unwrap();
        assert!((centroid - head).length() < 1e-3);
    }

    #[test]
    fn local_centroid_cohesion_uses_every_ally() {
        let mut config = SpeciesConfig::neon_tetra();
        config.behavior = Behavior::Schooling(FlockingGains {
            separation_distance: 0.0,
            kp_separation: 0.0,
            kp_alignment: 0.0,
            kp_cohesion: 1.0,
            cohesion_target: CohesionTarget::LocalCentroid,
        });
        config.cruising_speed = 0.0;
        let species = Arc::new(config);
        let viewer = spawn(1, &species, Vec2::new(200.0, 150.0), InitialState::default());
        let head = viewer.head();
        let others = [
            spawn(2, &species, head + Vec2::new(10.0, 0.0), InitialState::default()),
            spawn(3, &species, head + Vec2::new(30.0, 0.0), InitialState::default()),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let force = species
            .behavior
            .locomotion(&viewer, Peers::new(&others, &[]), &tank(), &mut rng);
        assert!((force - Vec2::new(20.0, 0.0)).length() < 1e-3, "force {force:?}");
    }
}
