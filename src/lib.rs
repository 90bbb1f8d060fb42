//! Pocket Universe - a tiny gravitating universe in the browser
//!
//! Core modules:
//! - `sim`: Simulation (gravity, merges, black hole reset, ambient entities)
//! - `renderer`: WebGPU rendering pipeline and scene tessellation
//! - `settings`: Persisted preferences
//! - `facts`: Random astronomy facts for the info panel
//! - `audio`: Procedural Web Audio effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod facts;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use facts::FactDeck;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation tuning constants
///
/// Rules are expressed per tick, so speeds are pixels/tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Gravity strength toward the canvas center
    pub const G: f32 = 0.05;
    /// Mass per pixel of radius
    pub const MASS_PER_RADIUS: f32 = 0.8;
    /// Freshly spawned planet radius range
    pub const PLANET_MIN_RADIUS: f32 = 4.0;
    pub const PLANET_MAX_RADIUS: f32 = 10.0;
    /// Initial velocity range (each axis, ±)
    pub const PLANET_SPAWN_SPEED: f32 = 1.0;
    /// Fraction of the absorbed radius added to the survivor
    pub const MERGE_GROWTH: f32 = 0.4;
    /// A merge that reaches this radius blows the planet apart
    pub const SUPERNOVA_RADIUS: f32 = 42.0;
    /// Chance a spawned planet carries a ring (only above RING_MIN_RADIUS)
    pub const RING_CHANCE: f64 = 0.3;
    pub const RING_MIN_RADIUS: f32 = 7.0;
    /// Trail points kept per planet
    pub const PLANET_TRAIL_LENGTH: usize = 12;

    /// Particle velocity damping per tick
    pub const PARTICLE_DRAG: f32 = 0.97;
    pub const MERGE_PARTICLES: usize = 18;
    pub const SUPERNOVA_PARTICLES: usize = 140;
    pub const CONSUME_PARTICLES: usize = 24;
    pub const REBIRTH_PARTICLES: usize = 220;

    /// Center star base radius (pulses ±8%)
    pub const CENTER_STAR_RADIUS: f32 = 40.0;
    /// Background hue drift (degrees/tick)
    pub const HUE_DRIFT: f32 = 0.1;

    /// Black hole reset
    pub const BLACK_HOLE_MAX_RADIUS: f32 = 80.0;
    pub const FORM_GROWTH: f32 = 1.5;
    pub const CONSUME_PULL: f32 = 0.6;
    pub const CONSUME_DAMPING: f32 = 0.96;
    pub const IMPLODE_SHRINK: f32 = 2.5;

    /// Ambient entities
    pub const UFO_SPAWN_CHANCE: f64 = 0.002;
    pub const SATELLITE_SPAWN_CHANCE: f64 = 0.003;
    pub const METEOR_SPAWN_CHANCE: f64 = 0.012;
    pub const MAX_UFOS: usize = 2;
    pub const MAX_SATELLITES: usize = 3;
    pub const MAX_METEORS: usize = 4;
    /// Horizontal margin past which a UFO counts as offscreen
    pub const UFO_OFFSCREEN_MARGIN: f32 = 60.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap a hue in degrees into [0, 360)
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    hue.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hue() {
        assert!((wrap_hue(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_hue(-30.0) - 330.0).abs() < 1e-4);
        assert_eq!(wrap_hue(0.0), 0.0);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, std::f32::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
