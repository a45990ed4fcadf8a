// --- File: food.rs ---
use crate::constants::{FOOD_LIFETIME_SECS, FOOD_SINK_SPEED};
use crate::tank::Tank;
use glam::Vec2;
use serde::Serialize;

/// A food pellet. Sinks to the sand, then waits until eaten or expired.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Vec2,
    velocity: Vec2,
    lifetime: f32,
    consumed: bool,
}

impl Food {
    pub fn new(position: Vec2) -> Self {
        Self::with_lifetime(position, FOOD_LIFETIME_SECS)
    }

    pub fn with_lifetime(position: Vec2, lifetime: f32) -> Self {
        Self {
            position,
            velocity: Vec2::new(0.0, FOOD_SINK_SPEED),
            lifetime,
            consumed: false,
        }
    }

    pub fn update(&mut self, dt: f32, tank: &Tank) {
        self.lifetime -= dt;

        let sand_line = tank.sand_line();
        if self.position.y < sand_line {
            self.position += self.velocity * dt;
            self.position.y = self.position.y.min(sand_line);
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn remaining_lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }

    /// Eaten or expired; the environment drops it at the end of the tick.
    #[inline]
    pub fn is_gone(&self) -> bool {
        self.consumed || self.is_expired()
    }

    pub fn snapshot(&self) -> FoodSnapshot {
        FoodSnapshot {
            position: self.position,
            remaining_lifetime: self.lifetime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodSnapshot {
    pub position: Vec2,
    pub remaining_lifetime: f32,
}

// --- End of File: food.rs ---
