//! Center gravity
//!
//! Not an N-body integration: each planet only feels the canvas center, and
//! the pull has constant magnitude `G * mass` along the unit direction.

use glam::Vec2;

use super::state::Planet;
use crate::consts::G;

/// Unit vector from `pos` toward `target` (distance 0 counts as 1)
#[inline]
pub fn direction_to(pos: Vec2, target: Vec2) -> Vec2 {
    let d = target - pos;
    let distance = d.length();
    if distance > 0.0 { d / distance } else { d }
}

/// Accelerate a planet toward `center`, then integrate its position
pub fn apply_center_gravity(planet: &mut Planet, center: Vec2) {
    let force = G * planet.mass();
    planet.vel += direction_to(planet.pos, center) * force;
    planet.pos += planet.vel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn planet_at(pos: Vec2) -> Planet {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut p = Planet::random(1, pos, &mut rng);
        p.vel = Vec2::ZERO;
        p
    }

    #[test]
    fn test_pull_toward_center() {
        let center = Vec2::new(400.0, 300.0);
        let mut p = planet_at(Vec2::new(100.0, 300.0));
        apply_center_gravity(&mut p, center);
        assert!(p.vel.x > 0.0);
        assert!(p.vel.y.abs() < 1e-6);
        assert!((p.vel.length() - G * p.mass()).abs() < 1e-5);
        assert!(p.pos.x > 100.0);
    }

    #[test]
    fn test_at_center_is_finite() {
        let center = Vec2::new(400.0, 300.0);
        let mut p = planet_at(center);
        apply_center_gravity(&mut p, center);
        assert!(p.pos.is_finite());
        assert_eq!(p.vel, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_velocity_change_points_at_center(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
        ) {
            let center = Vec2::ZERO;
            let start = Vec2::new(x, y);
            prop_assume!(start.length() > 1.0);
            let mut p = planet_at(start);
            apply_center_gravity(&mut p, center);
            // Velocity started at zero, so it is exactly the applied pull
            prop_assert!(p.vel.dot(center - start) > 0.0);
        }
    }
}
