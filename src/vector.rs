// --- File: vector.rs ---
use crate::constants::VECTOR_EPSILON_SQ;
use glam::Vec2;

// --- Vector Helpers ---
// glam covers add/scale/length/distance/normalize_or_zero; these fill the gaps
// the steering code needs, all of them total on the zero vector.

pub trait Vec2Ext: Sized {
    /// Sprite rotation in degrees for a body facing left or right.
    ///
    /// A left-facing sprite is drawn mirrored, so its angle is measured from the
    /// negative x axis and negated. The zero vector has angle 0.
    fn heading_degrees(self, facing_right: bool) -> f32;
    /// Counter-clockwise (in y-down screen space: clockwise) rotation by `degrees`.
    fn rotate_degrees(self, degrees: f32) -> Self;
    /// Scales the vector down to `max` if it is longer. Non-positive `max` yields zero.
    fn limit_length(self, max: f32) -> Self;
    fn is_negligible(self) -> bool;
}

impl Vec2Ext for Vec2 {
    fn heading_degrees(self, facing_right: bool) -> f32 {
        if self.is_negligible() {
            return 0.0;
        }
        let sign = if facing_right { 1.0 } else { -1.0 };
        let angle = self.y.atan2(sign * self.x).to_degrees();
        if facing_right { angle } else { -angle }
    }

    fn rotate_degrees(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    fn limit_length(self, max: f32) -> Self {
        if max <= 0.0 {
            return Vec2::ZERO;
        }
        self.clamp_length_max(max)
    }

    #[inline]
    fn is_negligible(self) -> bool {
        self.length_squared() <= VECTOR_EPSILON_SQ
    }
}

/// Unit vector from `from` towards `to`, or zero when they coincide.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

// --- End of File: vector.rs ---
