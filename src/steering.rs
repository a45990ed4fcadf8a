// --- File: steering.rs ---
// Steering forces.
//
// Each function returns an acceleration contribution computed from plain
// vectors and gains; none of them touch creature or world state. Most are
// proportional controllers: `error * gain`.

use crate::constants::CRUISE_JITTER_FRACTION;
use crate::food::Food;
use crate::vector::direction;
use glam::Vec2;
use rand::Rng;

/// Index of the nearest uneaten, unexpired food within `range` of `head`.
/// Ties keep the first one found.
pub fn nearest_food(head: Vec2, foods: &[Food], range: f32) -> Option<usize> {
    let mut nearest = None;
    let mut min_dist = f32::MAX;
    for (index, food) in foods.iter().enumerate() {
        if food.is_gone() {
            continue;
        }
        let dist = head.distance(food.position());
        if dist < min_dist && dist <= range {
            nearest = Some(index);
            min_dist = dist;
        }
    }
    nearest
}

/// Pull towards a food item. Healthier and hungrier creatures chase harder.
pub fn chase_food(head: Vec2, food: Vec2, kp: f32, health: f32, fullness: f32) -> Vec2 {
    (food - head) * kp * health * (1.0 - fullness)
}

/// Bias velocity towards `speed` in the facing direction with a random
/// vertical wobble of a third of that speed.
pub fn cruise<R: Rng + ?Sized>(
    velocity: Vec2,
    facing_right: bool,
    speed: f32,
    kp: f32,
    rng: &mut R,
) -> Vec2 {
    let sign = if facing_right { 1.0 } else { -1.0 };
    let wobble = speed * CRUISE_JITTER_FRACTION;
    let vertical = if rng.gen_bool(0.5) { wobble } else { -wobble };
    (Vec2::new(sign * speed, vertical) - velocity) * kp
}

/// Like [`cruise`] without the wobble.
pub fn drift(velocity: Vec2, facing_right: bool, speed: f32, kp: f32) -> Vec2 {
    let sign = if facing_right { 1.0 } else { -1.0 };
    (Vec2::new(sign * speed, 0.0) - velocity) * kp
}

/// Keep `separation_distance` between our head and the ally's centre: pulls in
/// when farther, pushes out when closer, zero at exactly that distance.
pub fn separation(
    head: Vec2,
    ally_center: Vec2,
    separation_distance: f32,
    kp: f32,
    health: f32,
) -> Vec2 {
    let error = head.distance(ally_center) - separation_distance;
    direction(head, ally_center) * error * kp * health
}

/// Match the ally's velocity.
pub fn alignment(velocity: Vec2, ally_velocity: Vec2, kp: f32, health: f32) -> Vec2 {
    (ally_velocity - velocity) * kp * health
}

/// Steer towards a group point (the nearest ally or the local centroid).
pub fn cohesion(head: Vec2, target: Vec2, kp: f32, health: f32) -> Vec2 {
    (target - head) * kp * health
}

/// Repulsion from a larger threat. `area_difference` is our area minus the
/// threat's, so it is negative for real threats and the force points away.
pub fn escape(head: Vec2, threat_head: Vec2, area_difference: f32, kp: f32) -> Vec2 {
    direction(head, threat_head) * area_difference * kp
}

pub fn seek(from: Vec2, target: Vec2, kp: f32) -> Vec2 {
    (target - from) * kp
}

/// Critically damped pull towards `target`.
pub fn station_keep(position: Vec2, velocity: Vec2, target: Vec2, kp: f32) -> Vec2 {
    (target - position) * kp - velocity * 2.0 * kp.sqrt()
}

// --- End of File: steering.rs ---

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn nearest_food_ignores_out_of_range_and_eaten() {
        let mut foods = vec![
            Food::new(Vec2::new(50.0, 0.0)),
            Food::new(Vec2::new(5.0, 0.0)),
            Food::new(Vec2::new(300.0, 0.0)),
        ];
        assert_eq!(nearest_food(Vec2::ZERO, &foods, 200.0), Some(1));
        foods[1].mark_consumed();
        assert_eq!(nearest_food(Vec2::ZERO, &foods, 200.0), Some(0));
        assert_eq!(nearest_food(Vec2::ZERO, &foods, 10.0), None);
    }

    #[test]
    fn nearest_food_ties_keep_first() {
        let foods = vec![Food::new(Vec2::new(0.0, 10.0)), Food::new(Vec2::new(10.0, 0.0))];
        assert_eq!(nearest_food(Vec2::ZERO, &foods, 200.0), Some(0));
    }

    #[test]
    fn chase_scales_with_hunger_and_health() {
        let force = chase_food(Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0, 1.0, 0.0);
        assert!(approx(force, Vec2::new(30.0, 0.0)));
        assert_eq!(chase_food(Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0, 1.0, 1.0), Vec2::ZERO);
        assert_eq!(chase_food(Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0, 0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn cruise_targets_facing_direction_with_wobble() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let force = cruise(Vec2::ZERO, false, 30.0, 1.0, &mut rng);
            assert!(approx(Vec2::new(force.x, 0.0), Vec2::new(-30.0, 0.0)));
            assert!((force.y.abs() - 10.0).abs() < 1e-4);
        }
        let at_speed = cruise(Vec2::new(30.0, 0.0), true, 30.0, 1.0, &mut rng);
        assert!(at_speed.x.abs() < 1e-4);
    }

    #[test]
    fn separation_is_zero_at_the_preferred_distance() {
        let force = separation(Vec2::ZERO, Vec2::new(40.0, 0.0), 40.0, 1.0, 1.0);
        assert!(approx(force, Vec2::ZERO));
        let too_close = separation(Vec2::ZERO, Vec2::new(20.0, 0.0), 40.0, 1.0, 1.0);
        assert!(too_close.x < 0.0);
        let too_far = separation(Vec2::ZERO, Vec2::new(60.0, 0.0), 40.0, 1.0, 1.0);
        assert!(too_far.x > 0.0);
    }

    #[test]
    fn separation_from_a_coincident_ally_is_zero() {
        assert_eq!(separation(Vec2::ONE, Vec2::ONE, 40.0, 1.0, 1.0), Vec2::ZERO);
    }

    #[test]
    fn alignment_vanishes_for_matching_velocity() {
        let v = Vec2::new(12.0, -3.0);
        assert_eq!(alignment(v, v, 1.0, 1.0), Vec2::ZERO);
        let force = alignment(v, Vec2::new(12.0, 3.0), 0.5, 1.0);
        assert!(approx(force, Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn escape_points_away_from_larger_threat() {
        let force = escape(Vec2::ZERO, Vec2::new(10.0, 0.0), -100.0, 0.01);
        assert!(approx(force, Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn station_keeping_is_still_at_target() {
        let target = Vec2::new(5.0, 5.0);
        assert_eq!(station_keep(target, Vec2::ZERO, target, 2.0), Vec2::ZERO);
        let braking = station_keep(target, Vec2::new(4.0, 0.0), target, 1.0);
        assert!(braking.x < 0.0);
    }
}
