//! Decorative entities: starfield, UFOs, satellites, meteors
//!
//! None of these interact with planets. Each follows its own motion rule and
//! is dropped once its offscreen/expiry predicate holds.

use glam::Vec2;
use rand::Rng;

use super::state::{Meteor, Satellite, Star, Ufo, UniverseState};
use crate::consts::*;

/// Star brightness (0.35..1.0) at a given tick
pub fn star_brightness(star: &Star, time_ticks: u64) -> f32 {
    let t = time_ticks as f32;
    0.35 + 0.65 * (0.5 + 0.5 * (t * star.speed + star.phase).sin())
}

/// Pulsing radius of the center star
pub fn center_star_radius(time_ticks: u64) -> f32 {
    CENTER_STAR_RADIUS * (1.0 + 0.08 * (time_ticks as f32 * 0.05).sin())
}

impl Ufo {
    pub fn step(&mut self) {
        self.pos.x += self.vel_x;
        self.bob_phase += 0.08;
        self.pos.y = self.base_y + self.bob_phase.sin() * 6.0;
    }

    /// Fully past the edge it is flying toward
    pub fn is_offscreen(&self, width: f32) -> bool {
        if self.vel_x >= 0.0 {
            self.pos.x > width + UFO_OFFSCREEN_MARGIN
        } else {
            self.pos.x < -UFO_OFFSCREEN_MARGIN
        }
    }
}

impl Satellite {
    pub fn step(&mut self) {
        self.angle += self.angular_speed;
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.ticks_left == 0
    }
}

impl Meteor {
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_offscreen(&self, width: f32, height: f32) -> bool {
        self.pos.x < -self.tail
            || self.pos.x > width + self.tail
            || self.pos.y < -self.tail
            || self.pos.y > height + self.tail
    }
}

/// Move all ambient entities and drop expired ones
pub fn step_ambient(state: &mut UniverseState) {
    let (width, height) = (state.width, state.height);

    for ufo in &mut state.ufos {
        ufo.step();
    }
    state.ufos.retain(|u| !u.is_offscreen(width));

    for satellite in &mut state.satellites {
        satellite.step();
    }
    state.satellites.retain(|s| !s.is_expired());

    for meteor in &mut state.meteors {
        meteor.step();
    }
    state.meteors.retain(|m| !m.is_offscreen(width, height));
}

/// Roll the per-tick spawn chances
pub fn spawn_ambient(state: &mut UniverseState) {
    if !state.ambient_enabled || state.black_hole.is_active() {
        return;
    }

    let (width, height) = (state.width, state.height);
    let rng = &mut state.rng;

    if state.ufos.len() < MAX_UFOS && rng.random_bool(UFO_SPAWN_CHANCE) {
        let from_left = rng.random_bool(0.5);
        let speed = rng.random_range(1.0..2.5);
        let base_y = rng.random_range(0.05..0.6) * height;
        state.ufos.push(Ufo {
            pos: Vec2::new(
                if from_left { -UFO_OFFSCREEN_MARGIN / 2.0 } else { width + UFO_OFFSCREEN_MARGIN / 2.0 },
                base_y,
            ),
            vel_x: if from_left { speed } else { -speed },
            base_y,
            bob_phase: rng.random_range(0.0..std::f32::consts::TAU),
            hue: rng.random_range(80.0..200.0),
            beam: rng.random_bool(0.4),
        });
        log::debug!("UFO spotted");
    }

    if state.satellites.len() < MAX_SATELLITES && rng.random_bool(SATELLITE_SPAWN_CHANCE) {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        state.satellites.push(Satellite {
            angle: rng.random_range(0.0..std::f32::consts::TAU),
            orbit_radius: rng.random_range(120.0..320.0),
            angular_speed: rng.random_range(0.004..0.012) * direction,
            ticks_left: rng.random_range(600..1200),
            panel_span: rng.random_range(6.0..10.0),
        });
    }

    if state.meteors.len() < MAX_METEORS && rng.random_bool(METEOR_SPAWN_CHANCE) {
        let speed = rng.random_range(7.0..13.0);
        let angle = rng.random_range(0.35..0.8_f32);
        let leftward = rng.random_bool(0.5);
        let vel = Vec2::new(
            if leftward { -angle.cos() } else { angle.cos() },
            angle.sin(),
        ) * speed;
        state.meteors.push(Meteor {
            pos: Vec2::new(rng.random_range(0.0..width.max(1.0)), 0.0),
            vel,
            tail: rng.random_range(40.0..90.0),
            hue: rng.random_range(30.0..60.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ResetPhase;

    #[test]
    fn test_star_brightness_bounds() {
        let mut state = UniverseState::new(2, 800.0, 600.0);
        state.set_star_count(50);
        for t in [0u64, 17, 1_000, 123_456] {
            for star in &state.stars {
                let b = star_brightness(star, t);
                assert!((0.35 - 1e-4..=1.0 + 1e-4).contains(&b));
            }
        }
    }

    #[test]
    fn test_center_star_pulses() {
        let radii: Vec<f32> = (0..200).map(center_star_radius).collect();
        let min = radii.iter().cloned().fold(f32::MAX, f32::min);
        let max = radii.iter().cloned().fold(f32::MIN, f32::max);
        assert!(min >= CENTER_STAR_RADIUS * 0.92 - 1e-3);
        assert!(max <= CENTER_STAR_RADIUS * 1.08 + 1e-3);
        assert!(max - min > 1.0);
    }

    #[test]
    fn test_ufo_leaves_screen() {
        let mut state = UniverseState::new(2, 300.0, 200.0);
        state.ufos.push(Ufo {
            pos: Vec2::new(-30.0, 50.0),
            vel_x: 2.0,
            base_y: 50.0,
            bob_phase: 0.0,
            hue: 120.0,
            beam: true,
        });
        for _ in 0..300 {
            step_ambient(&mut state);
        }
        assert!(state.ufos.is_empty());
    }

    #[test]
    fn test_ufo_flying_left_not_removed_on_entry() {
        let ufo = Ufo {
            pos: Vec2::new(330.0, 50.0),
            vel_x: -2.0,
            base_y: 50.0,
            bob_phase: 0.0,
            hue: 120.0,
            beam: false,
        };
        assert!(!ufo.is_offscreen(300.0));
    }

    #[test]
    fn test_satellite_expires() {
        let mut state = UniverseState::new(2, 800.0, 600.0);
        state.satellites.push(Satellite {
            angle: 0.0,
            orbit_radius: 150.0,
            angular_speed: 0.01,
            ticks_left: 3,
            panel_span: 8.0,
        });
        step_ambient(&mut state);
        step_ambient(&mut state);
        assert_eq!(state.satellites.len(), 1);
        let pos = state.satellites[0].position(state.center());
        assert!((pos.distance(state.center()) - 150.0).abs() < 1e-3);
        step_ambient(&mut state);
        assert!(state.satellites.is_empty());
    }

    #[test]
    fn test_meteor_leaves_screen() {
        let mut state = UniverseState::new(2, 400.0, 300.0);
        state.meteors.push(Meteor {
            pos: Vec2::new(100.0, 0.0),
            vel: Vec2::new(6.0, 8.0),
            tail: 50.0,
            hue: 40.0,
        });
        for _ in 0..100 {
            step_ambient(&mut state);
        }
        assert!(state.meteors.is_empty());
    }

    #[test]
    fn test_spawning_respects_caps_and_reset() {
        let mut state = UniverseState::new(2, 800.0, 600.0);
        for _ in 0..50_000 {
            spawn_ambient(&mut state);
        }
        assert!(state.ufos.len() <= MAX_UFOS);
        assert!(state.satellites.len() <= MAX_SATELLITES);
        assert_eq!(state.meteors.len(), MAX_METEORS);

        let mut state = UniverseState::new(2, 800.0, 600.0);
        state.black_hole.phase = ResetPhase::Forming;
        for _ in 0..5_000 {
            spawn_ambient(&mut state);
        }
        assert!(state.meteors.is_empty());

        let mut state = UniverseState::new(2, 800.0, 600.0);
        state.ambient_enabled = false;
        for _ in 0..5_000 {
            spawn_ambient(&mut state);
        }
        assert!(state.meteors.is_empty() && state.ufos.is_empty());
    }
}
