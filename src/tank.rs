// --- File: tank.rs ---
use crate::config::{BodySize, TankConfig};
use crate::error::ConfigError;
use glam::Vec2;
use rand::Rng;
use serde::Serialize;

/// Fixed tank geometry in logical units. Y grows downwards; the bottom
/// `sand_height` units are sand that nothing swims into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tank {
    width: f32,
    height: f32,
    sand_height: f32,
}

impl Tank {
    pub fn new(width: f32, height: f32, sand_height: f32) -> Result<Self, ConfigError> {
        let valid = width.is_finite()
            && height.is_finite()
            && sand_height.is_finite()
            && width > 0.0
            && height > 0.0
            && sand_height >= 0.0
            && sand_height < height;
        if !valid {
            return Err(ConfigError::InvalidTank {
                width,
                height,
                sand_height,
            });
        }
        Ok(Self {
            width,
            height,
            sand_height,
        })
    }

    pub fn from_config(config: &TankConfig) -> Result<Self, ConfigError> {
        Self::new(config.width, config.height, config.sand_height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn sand_height(&self) -> f32 {
        self.sand_height
    }

    /// Y coordinate of the sand surface.
    #[inline]
    pub fn sand_line(&self) -> f32 {
        self.height - self.sand_height
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.sand_line()).contains(&point.y)
    }

    /// Nearest point in the open water.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.sand_line()),
        )
    }

    /// Uniform spawn point where a body of `size` fits vertically between the
    /// surface and the sand.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R, size: BodySize) -> Vec2 {
        let x = rng.gen_range(0.0..self.width);
        let min_y = size.height / 2.0;
        let max_y = self.sand_line() - size.height / 2.0;
        let y = if min_y < max_y {
            rng.gen_range(min_y..max_y)
        } else {
            self.sand_line() / 2.0
        };
        Vec2::new(x, y)
    }
}

// --- End of File: tank.rs ---

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(Tank::new(0.0, 300.0, 20.0).is_err());
        assert!(Tank::new(500.0, 300.0, 300.0).is_err());
        assert!(Tank::new(500.0, 300.0, -1.0).is_err());
        assert!(Tank::new(f32::INFINITY, 300.0, 20.0).is_err());
    }

    #[test]
    fn sand_line_sits_above_the_floor() {
        let tank = Tank::new(500.0, 300.0, 20.0).unwrap();
        assert_eq!(tank.sand_line(), 280.0);
        assert!(tank.contains(Vec2::new(250.0, 280.0)));
        assert!(!tank.contains(Vec2::new(250.0, 281.0)));
        assert_eq!(tank.clamp_point(Vec2::new(-5.0, 400.0)), Vec2::new(0.0, 280.0));
    }

    #[test]
    fn random_positions_clear_surface_and_sand() {
        let tank = Tank::new(500.0, 300.0, 20.0).unwrap();
        let size = BodySize::new(18.0, 10.0);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = tank.random_position(&mut rng, size);
            assert!((0.0..500.0).contains(&p.x));
            assert!(p.y >= 5.0 && p.y <= 275.0);
        }
    }
}
