// --- File: physiology.rs ---
// Hunger, health, lifespan and growth.
//
// Rates are tiny per tick (health drains over days), so the levels are kept
// in `f64`; an `f32` lifespan of years would not even register a 16 ms tick.

use crate::config::BodySize;
use crate::constants::{
    FULLNESS_PER_FOOD, HEALTH_NEUTRAL_LEVEL, HUNGER_RATE, SATIATION_THRESHOLD,
    STARVATION_HEALTH_RATE, THREAT_BURDEN_WIDTHS, THREAT_HEALTH_RATE, WATER_HEALTH_RATE,
};
use crate::creature::CreatureId;
use glam::Vec2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Health ran out (starvation, bad water or harassment).
    Health,
    OldAge,
}

/// A larger creature of another species seen this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThreatSighting {
    pub id: CreatureId,
    pub head: Vec2,
    pub size: BodySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Physiology {
    /// 0 = starving, 1 = full.
    pub fullness: f64,
    /// 0 = dead, 1 = perfect.
    pub health: f64,
    /// Seconds left to live. Goes non-positive only on the tick the creature dies.
    pub remaining_lifetime: f64,
}

impl Physiology {
    pub fn new(lifespan_secs: f64) -> Self {
        Self {
            fullness: 0.0,
            health: 1.0,
            remaining_lifetime: lifespan_secs,
        }
    }

    #[inline]
    pub fn wants_food(&self) -> bool {
        self.fullness <= SATIATION_THRESHOLD
    }

    pub fn feed(&mut self) {
        self.fullness = (self.fullness + FULLNESS_PER_FOOD).clamp(0.0, 1.0);
    }

    /// Advance hunger, health and age by `dt` seconds.
    pub fn decay(
        &mut self,
        dt: f32,
        water_quality: f32,
        own_head: Vec2,
        own_size: BodySize,
        threats: &[ThreatSighting],
    ) {
        let dt = dt as f64;

        self.fullness = (self.fullness - HUNGER_RATE * dt).clamp(0.0, 1.0);

        // Both terms heal when their level is above neutral.
        let mut health = self.health;
        health -= WATER_HEALTH_RATE * (HEALTH_NEUTRAL_LEVEL - water_quality as f64) * dt;
        health -= STARVATION_HEALTH_RATE * (HEALTH_NEUTRAL_LEVEL - self.fullness) * dt;
        for threat in threats {
            health -= THREAT_HEALTH_RATE * threat_burden(own_head, own_size, threat) * dt;
        }
        self.health = health.clamp(0.0, 1.0);

        self.remaining_lifetime -= dt;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.death_cause().is_none()
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        if self.health <= 0.0 {
            Some(DeathCause::Health)
        } else if self.remaining_lifetime <= 0.0 {
            Some(DeathCause::OldAge)
        } else {
            None
        }
    }
}

/// Product of the distance burden (1 when heads touch, 0 at two threat body
/// widths) and the size burden (threat's fractional area advantage).
pub fn threat_burden(own_head: Vec2, own_size: BodySize, threat: &ThreatSighting) -> f64 {
    let reach = THREAT_BURDEN_WIDTHS * threat.size.width;
    let dist = own_head.distance(threat.head);
    let distance_burden = if reach > 0.0 && dist <= reach {
        ((reach - dist) / reach) as f64
    } else {
        0.0
    };
    let own_area = own_size.area() as f64;
    if own_area <= 0.0 {
        return 0.0;
    }
    let size_burden = (threat.size.area() as f64 - own_area) / own_area;
    distance_burden * size_burden
}

/// Current body size for a creature that has eaten `food_eaten` of the
/// `food_required` needed to reach `max`. Keeps growing past `max`.
pub fn grown_size(min: BodySize, max: BodySize, food_eaten: u64, food_required: u32) -> BodySize {
    if food_required == 0 {
        return min;
    }
    let ratio = (food_eaten as f64 / food_required as f64) as f32;
    BodySize::lerp(min, max, ratio)
}

// --- End of File: physiology.rs ---
