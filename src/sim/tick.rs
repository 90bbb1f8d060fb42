//! Fixed timestep simulation tick
//!
//! One call advances the universe by one frame's worth of rules.

use glam::Vec2;

use super::ambient::{spawn_ambient, step_ambient};
use super::collision::resolve_one_collision;
use super::gravity::apply_center_gravity;
use super::reset::{begin_reset, step_reset};
use super::state::{ResetPhase, UniverseState};
use crate::consts::HUE_DRIFT;
use crate::wrap_hue;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click positions (CSS pixels) to spawn planets at
    pub spawn: Vec<Vec2>,
    /// Reset button pressed
    pub reset: bool,
    /// New canvas size in CSS pixels
    pub resize: Option<(f32, f32)>,
}

impl TickInput {
    /// Clear one-shot inputs after they have been applied
    pub fn clear(&mut self) {
        self.spawn.clear();
        self.reset = false;
        self.resize = None;
    }
}

/// Advance the universe by one fixed timestep
///
/// `_dt` is accepted for parity with the frame loop; rules are per tick.
pub fn tick(state: &mut UniverseState, input: &TickInput, _dt: f32) {
    if let Some((w, h)) = input.resize {
        state.resize(w, h);
    }
    for &pos in &input.spawn {
        state.spawn_planet(pos);
    }
    if input.reset {
        begin_reset(state);
    }

    state.time_ticks += 1;
    state.background_hue = wrap_hue(state.background_hue + HUE_DRIFT);

    // Black hole owns planet motion while it is eating them
    step_reset(state);
    if state.black_hole.phase != ResetPhase::Consuming {
        let center = state.center();
        for planet in &mut state.planets {
            planet.record_trail();
            apply_center_gravity(planet, center);
        }
    }

    for particle in &mut state.particles {
        particle.step();
    }
    state.particles.retain(|p| !p.is_dead());

    step_ambient(state);
    spawn_ambient(state);

    resolve_one_collision(state);
}
