//! Planet collision detection and merging
//!
//! Brute-force pair scan. Only the first overlapping pair found is merged each
//! tick, so a pile-up resolves over several frames.

use glam::Vec2;

use super::state::{BurstColor, Planet, UniverseEvent, UniverseState};
use crate::consts::*;

/// Outcome of a resolved collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeOutcome {
    /// Smaller planet absorbed, survivor keeps growing
    Merged { survivor_id: u32, absorbed_id: u32 },
    /// Survivor grew past the supernova radius and blew apart
    Supernova { planet_id: u32, absorbed_id: u32 },
}

/// Whether two planets overlap (strictly closer than their combined radii)
#[inline]
pub fn planets_overlap(a: &Planet, b: &Planet) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// First overlapping pair `(i, j)` with `i < j`, in collection order
pub fn find_first_overlap(planets: &[Planet]) -> Option<(usize, usize)> {
    for i in 0..planets.len() {
        for j in (i + 1)..planets.len() {
            if planets_overlap(&planets[i], &planets[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Resolve at most one collision, merging the smaller planet into the larger
pub fn resolve_one_collision(state: &mut UniverseState) -> Option<MergeOutcome> {
    let (i, j) = find_first_overlap(&state.planets)?;

    // Ties go to the earlier planet
    let (survivor_idx, absorbed_idx) = if state.planets[i].radius >= state.planets[j].radius {
        (i, j)
    } else {
        (j, i)
    };

    let absorbed = state.planets.remove(absorbed_idx);
    let survivor_idx = if survivor_idx > absorbed_idx {
        survivor_idx - 1
    } else {
        survivor_idx
    };

    let survivor = &mut state.planets[survivor_idx];
    survivor.radius += absorbed.radius * MERGE_GROWTH;
    let survivor_id = survivor.id;
    let survivor_pos = survivor.pos;
    let survivor_radius = survivor.radius;
    let survivor_hue = survivor.hue;

    state.spawn_burst(
        absorbed.pos,
        MERGE_PARTICLES,
        BurstColor::Hue(absorbed.hue),
        2.5,
    );

    if survivor_radius >= SUPERNOVA_RADIUS {
        state.planets.remove(survivor_idx);
        explode(state, survivor_pos, survivor_hue);
        log::info!(
            "Planet {} went supernova at r={:.1}",
            survivor_id,
            survivor_radius
        );
        return Some(MergeOutcome::Supernova {
            planet_id: survivor_id,
            absorbed_id: absorbed.id,
        });
    }

    log::debug!(
        "Planet {} absorbed {} (r={:.1})",
        survivor_id,
        absorbed.id,
        survivor_radius
    );
    state.events.push(UniverseEvent::PlanetsMerged {
        pos: survivor_pos,
        radius: survivor_radius,
    });
    Some(MergeOutcome::Merged {
        survivor_id,
        absorbed_id: absorbed.id,
    })
}

/// Blow a planet apart into a large burst
fn explode(state: &mut UniverseState, pos: Vec2, hue: f32) {
    state.spawn_burst(pos, SUPERNOVA_PARTICLES / 2, BurstColor::Hue(hue), 6.0);
    state.spawn_burst(pos, SUPERNOVA_PARTICLES / 2, BurstColor::Hue(45.0), 4.0);
    state.events.push(UniverseEvent::Supernova { pos });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn add_planet(state: &mut UniverseState, pos: Vec2, radius: f32) -> u32 {
        let id = state.spawn_planet(pos).unwrap();
        let p = state.planets.last_mut().unwrap();
        p.radius = radius;
        id
    }

    #[test]
    fn test_no_overlap_no_merge() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        add_planet(&mut state, Vec2::new(100.0, 100.0), 5.0);
        add_planet(&mut state, Vec2::new(111.0, 100.0), 5.0);
        assert!(resolve_one_collision(&mut state).is_none());
        assert_eq!(state.planets.len(), 2);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        add_planet(&mut state, Vec2::new(100.0, 100.0), 5.0);
        add_planet(&mut state, Vec2::new(110.0, 100.0), 5.0);
        assert!(find_first_overlap(&state.planets).is_none());
    }

    #[test]
    fn test_smaller_merges_into_larger() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        let small = add_planet(&mut state, Vec2::new(100.0, 100.0), 4.0);
        let big = add_planet(&mut state, Vec2::new(105.0, 100.0), 8.0);

        let outcome = resolve_one_collision(&mut state).unwrap();
        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                survivor_id: big,
                absorbed_id: small
            }
        );
        assert_eq!(state.planets.len(), 1);
        assert_eq!(state.planets[0].id, big);
        assert!((state.planets[0].radius - (8.0 + 4.0 * 0.4)).abs() < 1e-5);
        assert_eq!(state.particles.len(), MERGE_PARTICLES);
        assert!(matches!(
            state.events.last(),
            Some(UniverseEvent::PlanetsMerged { .. })
        ));
    }

    #[test]
    fn test_equal_radius_first_survives() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        let first = add_planet(&mut state, Vec2::new(100.0, 100.0), 6.0);
        add_planet(&mut state, Vec2::new(102.0, 100.0), 6.0);
        resolve_one_collision(&mut state);
        assert_eq!(state.planets[0].id, first);
    }

    #[test]
    fn test_one_merge_per_call() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        for x in [100.0, 103.0, 106.0, 109.0] {
            add_planet(&mut state, Vec2::new(x, 100.0), 5.0);
        }
        resolve_one_collision(&mut state);
        assert_eq!(state.planets.len(), 3);
    }

    #[test]
    fn test_supernova() {
        let mut state = UniverseState::new(1, 800.0, 600.0);
        let big = add_planet(&mut state, Vec2::new(100.0, 100.0), 38.0);
        let small = add_planet(&mut state, Vec2::new(110.0, 100.0), 10.0);

        let outcome = resolve_one_collision(&mut state).unwrap();
        assert_eq!(
            outcome,
            MergeOutcome::Supernova {
                planet_id: big,
                absorbed_id: small
            }
        );
        assert!(state.planets.is_empty());
        assert!(state.particles.len() > MERGE_PARTICLES);
        assert!(matches!(
            state.events.last(),
            Some(UniverseEvent::Supernova { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_merge_never_adds_planets(
            positions in proptest::collection::vec((0.0f32..200.0, 0.0f32..200.0, 4.0f32..10.0), 0..12)
        ) {
            let mut state = UniverseState::new(5, 800.0, 600.0);
            for (x, y, r) in positions {
                add_planet(&mut state, Vec2::new(x, y), r);
            }
            let before = state.planets.len();
            let outcome = resolve_one_collision(&mut state);
            let after = state.planets.len();
            match outcome {
                None => prop_assert_eq!(after, before),
                Some(MergeOutcome::Merged { .. }) => prop_assert_eq!(after, before - 1),
                Some(MergeOutcome::Supernova { .. }) => prop_assert_eq!(after, before - 2),
            }
        }
    }
}
