//! Black hole reset animation
//!
//! A fixed four-phase cycle: Idle -> Forming -> Consuming -> Imploding -> Idle.
//! While Consuming, the black hole owns planet motion.

use super::gravity::direction_to;
use super::state::{BurstColor, ResetPhase, UniverseEvent, UniverseState};
use crate::consts::*;

/// Start the reset. Returns false if one is already running.
pub fn begin_reset(state: &mut UniverseState) -> bool {
    if state.black_hole.is_active() {
        log::debug!("Reset already running ({:?})", state.black_hole.phase);
        return false;
    }

    state.black_hole.phase = ResetPhase::Forming;
    state.black_hole.radius = 0.0;
    state.ufos.clear();
    state.satellites.clear();
    state.meteors.clear();
    state.events.push(UniverseEvent::ResetStarted);
    log::info!("Black hole forming ({} planets)", state.planets.len());
    true
}

/// Advance the reset machine by one tick
pub fn step_reset(state: &mut UniverseState) {
    match state.black_hole.phase {
        ResetPhase::Idle => {}

        ResetPhase::Forming => {
            state.black_hole.radius =
                (state.black_hole.radius + FORM_GROWTH).min(BLACK_HOLE_MAX_RADIUS);
            if state.black_hole.radius >= BLACK_HOLE_MAX_RADIUS {
                state.black_hole.phase = ResetPhase::Consuming;
                log::debug!("Black hole consuming");
            }
        }

        ResetPhase::Consuming => {
            consume_planets(state);
            if state.planets.is_empty() {
                state.black_hole.phase = ResetPhase::Imploding;
                log::debug!("Black hole imploding");
            }
        }

        ResetPhase::Imploding => {
            state.black_hole.radius = (state.black_hole.radius - IMPLODE_SHRINK).max(0.0);
            if state.black_hole.radius <= 0.0 {
                let center = state.center();
                state.spawn_burst(center, REBIRTH_PARTICLES, BurstColor::Rainbow, 7.0);
                state.black_hole.phase = ResetPhase::Idle;
                state.events.push(UniverseEvent::Rebirth);
                log::info!("Universe reborn");
            }
        }
    }
}

/// Pull every planet toward the hole, destroying those inside its radius
fn consume_planets(state: &mut UniverseState) {
    let center = state.center();
    let radius = state.black_hole.radius;

    let mut consumed = Vec::new();
    state.planets.retain_mut(|planet| {
        planet.record_trail();
        planet.vel += direction_to(planet.pos, center) * CONSUME_PULL;
        planet.vel *= CONSUME_DAMPING;
        planet.pos += planet.vel;

        if planet.pos.distance(center) <= radius {
            consumed.push((planet.pos, planet.hue));
            false
        } else {
            true
        }
    });

    for (pos, hue) in consumed {
        state.spawn_burst(pos, CONSUME_PARTICLES, BurstColor::Hue(hue), 3.0);
        state.events.push(UniverseEvent::PlanetConsumed { pos });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn run_until_idle(state: &mut UniverseState, limit: usize) -> Vec<ResetPhase> {
        let mut seen = vec![state.black_hole.phase];
        for _ in 0..limit {
            step_reset(state);
            if seen.last() != Some(&state.black_hole.phase) {
                seen.push(state.black_hole.phase);
            }
            if state.black_hole.phase == ResetPhase::Idle {
                break;
            }
        }
        seen
    }

    #[test]
    fn test_full_cycle_clears_planets() {
        let mut state = UniverseState::new(9, 800.0, 600.0);
        for x in [50.0, 300.0, 700.0] {
            state.spawn_planet(Vec2::new(x, 80.0));
        }
        state.ufos.push(crate::sim::state::Ufo {
            pos: Vec2::new(10.0, 10.0),
            vel_x: 1.0,
            base_y: 10.0,
            bob_phase: 0.0,
            hue: 100.0,
            beam: false,
        });

        assert!(begin_reset(&mut state));
        assert!(state.ufos.is_empty());

        let phases = run_until_idle(&mut state, 10_000);
        assert_eq!(
            phases,
            vec![
                ResetPhase::Forming,
                ResetPhase::Consuming,
                ResetPhase::Imploding,
                ResetPhase::Idle
            ]
        );
        assert!(state.planets.is_empty());
        assert_eq!(state.black_hole.radius, 0.0);
        assert!(state.events.contains(&UniverseEvent::Rebirth));
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_empty_universe_still_cycles() {
        let mut state = UniverseState::new(9, 800.0, 600.0);
        begin_reset(&mut state);
        let phases = run_until_idle(&mut state, 1_000);
        assert_eq!(phases.last(), Some(&ResetPhase::Idle));
        assert_eq!(phases.len(), 4);
    }

    #[test]
    fn test_reset_ignored_while_active() {
        let mut state = UniverseState::new(9, 800.0, 600.0);
        assert!(begin_reset(&mut state));
        step_reset(&mut state);
        let radius = state.black_hole.radius;
        assert!(!begin_reset(&mut state));
        assert_eq!(state.black_hole.radius, radius);
    }

    #[test]
    fn test_forming_reaches_threshold() {
        let mut state = UniverseState::new(9, 800.0, 600.0);
        state.spawn_planet(Vec2::new(10.0, 10.0));
        begin_reset(&mut state);
        let ticks = (BLACK_HOLE_MAX_RADIUS / FORM_GROWTH).ceil() as usize;
        for _ in 0..ticks {
            step_reset(&mut state);
        }
        assert_eq!(state.black_hole.phase, ResetPhase::Consuming);
        assert_eq!(state.black_hole.radius, BLACK_HOLE_MAX_RADIUS);
    }

    #[test]
    fn test_consume_pulls_inward() {
        let mut state = UniverseState::new(9, 800.0, 600.0);
        state.spawn_planet(Vec2::new(10.0, 300.0));
        state.planets[0].vel = Vec2::ZERO;
        state.black_hole.phase = ResetPhase::Consuming;
        state.black_hole.radius = BLACK_HOLE_MAX_RADIUS;

        let before = state.planets[0].pos.distance(state.center());
        step_reset(&mut state);
        let after = state.planets[0].pos.distance(state.center());
        assert!(after < before);
    }
}
