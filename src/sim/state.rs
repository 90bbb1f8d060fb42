//! Universe state and entity records
//!
//! Entities are plain records in flat collections. Membership is the only
//! relationship between them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::polar_to_cartesian;

/// Default number of background stars
pub const DEFAULT_STAR_COUNT: usize = 160;
/// Hard particle cap (settings may lower it)
pub const MAX_PARTICLES: usize = 2000;

/// Phase of the black hole reset animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetPhase {
    /// Normal simulation, center star visible
    #[default]
    Idle,
    /// Black hole radius growing
    Forming,
    /// Black hole pulling planets in
    Consuming,
    /// Black hole collapsing before rebirth
    Imploding,
}

/// The reset black hole
#[derive(Debug, Clone, Default)]
pub struct BlackHole {
    pub phase: ResetPhase,
    pub radius: f32,
}

impl BlackHole {
    pub fn is_active(&self) -> bool {
        self.phase != ResetPhase::Idle
    }
}

/// Cosmetic ring around a planet
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    /// Vertical squash of the ellipse (0 = edge-on line, 1 = circle)
    pub tilt: f32,
    /// Rotation of the ellipse in radians
    pub angle: f32,
    /// Hue offset from the planet body
    pub hue_shift: f32,
}

/// Cosmetic crater/cloud spot on a planet surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSpot {
    /// Direction from planet center
    pub angle: f32,
    /// Distance from center as a fraction of radius
    pub distance: f32,
    /// Spot radius as a fraction of planet radius
    pub size: f32,
    /// Lightness offset (negative = darker)
    pub shade: f32,
}

/// A user-spawned gravitating body
#[derive(Debug, Clone)]
pub struct Planet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Body hue in degrees (saturation 70%, lightness 60%)
    pub hue: f32,
    pub ring: Option<Ring>,
    pub spots: Vec<SurfaceSpot>,
    /// Recent positions, newest first
    pub trail: Vec<Vec2>,
}

impl Planet {
    /// Roll a fresh planet at `pos`
    pub fn random(id: u32, pos: Vec2, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(PLANET_MIN_RADIUS..PLANET_MAX_RADIUS);
        let vel = Vec2::new(
            rng.random_range(-PLANET_SPAWN_SPEED..PLANET_SPAWN_SPEED),
            rng.random_range(-PLANET_SPAWN_SPEED..PLANET_SPAWN_SPEED),
        );

        let ring = (radius >= RING_MIN_RADIUS && rng.random_bool(RING_CHANCE)).then(|| Ring {
            tilt: rng.random_range(0.2..0.45),
            angle: rng.random_range(-0.6..0.6),
            hue_shift: rng.random_range(-40.0..40.0),
        });

        let spot_count = rng.random_range(0..=4);
        let spots = (0..spot_count)
            .map(|_| SurfaceSpot {
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                distance: rng.random_range(0.0..0.6),
                size: rng.random_range(0.15..0.35),
                shade: rng.random_range(-0.2..0.12),
            })
            .collect();

        Self {
            id,
            pos,
            vel,
            radius,
            hue: rng.random_range(0.0..360.0),
            ring,
            spots,
            trail: Vec::with_capacity(PLANET_TRAIL_LENGTH),
        }
    }

    /// Mass is derived from radius so merges make planets heavier
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * MASS_PER_RADIUS
    }

    /// Record current position to trail (call each tick before moving)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        self.trail.truncate(PLANET_TRAIL_LENGTH);
    }
}

/// A transient explosion visual
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    /// 1 at spawn, removed at 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
}

impl Particle {
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        self.life -= self.decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Color scheme for a particle burst
#[derive(Debug, Clone, Copy)]
pub enum BurstColor {
    /// All particles share the hue (small jitter)
    Hue(f32),
    /// Every particle picks a random hue
    Rainbow,
}

/// A saucer drifting across the top of the screen
#[derive(Debug, Clone)]
pub struct Ufo {
    pub pos: Vec2,
    pub vel_x: f32,
    /// Height the bob oscillates around
    pub base_y: f32,
    pub bob_phase: f32,
    pub hue: f32,
    /// Draws a tractor beam below the saucer
    pub beam: bool,
}

/// A satellite circling the canvas center
#[derive(Debug, Clone)]
pub struct Satellite {
    pub angle: f32,
    pub orbit_radius: f32,
    /// Radians per tick, sign is direction
    pub angular_speed: f32,
    pub ticks_left: u32,
    /// Solar panel half-width in pixels
    pub panel_span: f32,
}

impl Satellite {
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + polar_to_cartesian(self.orbit_radius, self.angle)
    }
}

/// A shooting star crossing the screen
#[derive(Debug, Clone)]
pub struct Meteor {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tail length in pixels
    pub tail: f32,
    pub hue: f32,
}

/// A background star, in normalized (0..1) screen coordinates
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub phase: f32,
    pub speed: f32,
}

/// Something the front end may want to react to (sounds, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniverseEvent {
    PlanetSpawned { pos: Vec2 },
    PlanetsMerged { pos: Vec2, radius: f32 },
    Supernova { pos: Vec2 },
    ResetStarted,
    PlanetConsumed { pos: Vec2 },
    Rebirth,
}

/// Complete universe state
#[derive(Debug, Clone)]
pub struct UniverseState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Canvas size in CSS pixels
    pub width: f32,
    pub height: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Background hue in degrees
    pub background_hue: f32,
    pub planets: Vec<Planet>,
    pub particles: Vec<Particle>,
    pub ufos: Vec<Ufo>,
    pub satellites: Vec<Satellite>,
    pub meteors: Vec<Meteor>,
    pub stars: Vec<Star>,
    pub black_hole: BlackHole,
    /// Events produced since the front end last drained them
    pub events: Vec<UniverseEvent>,
    /// Particle cap (from settings)
    pub max_particles: usize,
    /// Whether UFOs, satellites and meteors spawn
    pub ambient_enabled: bool,
    next_id: u32,
}

impl UniverseState {
    /// Create an empty universe of the given size
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            time_ticks: 0,
            background_hue: 230.0,
            planets: Vec::new(),
            particles: Vec::new(),
            ufos: Vec::new(),
            satellites: Vec::new(),
            meteors: Vec::new(),
            stars: Vec::new(),
            black_hole: BlackHole::default(),
            events: Vec::new(),
            max_particles: MAX_PARTICLES,
            ambient_enabled: true,
            next_id: 1,
        };
        state.set_star_count(DEFAULT_STAR_COUNT);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Canvas center in pixels
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Regenerate the starfield with `count` stars
    pub fn set_star_count(&mut self, count: usize) {
        let rng = &mut self.rng;
        self.stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>(), rng.random::<f32>()),
                size: rng.random_range(0.4..1.6),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                speed: rng.random_range(0.01..0.06),
            })
            .collect();
    }

    /// Update canvas size (stars are normalized, so nothing else moves)
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    /// Spawn a planet at `pos`, unless a reset is running
    pub fn spawn_planet(&mut self, pos: Vec2) -> Option<u32> {
        if self.black_hole.is_active() {
            log::debug!("Ignoring planet spawn during reset ({:?})", self.black_hole.phase);
            return None;
        }
        let id = self.next_entity_id();
        let planet = Planet::random(id, pos, &mut self.rng);
        log::debug!("Planet {} spawned at {:?} r={:.1}", id, pos, planet.radius);
        self.planets.push(planet);
        self.events.push(UniverseEvent::PlanetSpawned { pos });
        Some(id)
    }

    /// Emit up to `count` particles radiating from `pos`, respecting the cap
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize, color: BurstColor, speed: f32) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = count.min(room);
        let rng = &mut self.rng;
        self.particles.extend((0..count).map(|_| {
            let hue = match color {
                BurstColor::Hue(h) => crate::wrap_hue(h + rng.random_range(-15.0..15.0)),
                BurstColor::Rainbow => rng.random_range(0.0..360.0),
            };
            let dir = polar_to_cartesian(1.0, rng.random_range(0.0..std::f32::consts::TAU));
            Particle {
                pos,
                vel: dir * speed * rng.random_range(0.2..1.0),
                radius: rng.random_range(1.0..3.0),
                hue,
                saturation: 0.8,
                lightness: rng.random_range(0.55..0.75),
                life: 1.0,
                decay: rng.random_range(0.015..0.03),
            }
        }));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<UniverseEvent> {
        std::mem::take(&mut self.events)
    }

    /// Compact summary for logs and the headless runner
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            time_ticks: self.time_ticks,
            phase: self.black_hole.phase,
            planets: self.planets.len(),
            largest_radius: self.planets.iter().map(|p| p.radius).fold(0.0, f32::max),
            particles: self.particles.len(),
            ufos: self.ufos.len(),
            satellites: self.satellites.len(),
            meteors: self.meteors.len(),
        }
    }
}

/// Serializable overview of a universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub time_ticks: u64,
    pub phase: ResetPhase,
    pub planets: usize,
    pub largest_radius: f32,
    pub particles: usize,
    pub ufos: usize,
    pub satellites: usize,
    pub meteors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_random_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let p = Planet::random(id, Vec2::ZERO, &mut rng);
            assert!(p.radius >= PLANET_MIN_RADIUS && p.radius < PLANET_MAX_RADIUS);
            assert!(p.vel.x.abs() <= PLANET_SPAWN_SPEED && p.vel.y.abs() <= PLANET_SPAWN_SPEED);
            assert!(p.spots.len() <= 4);
            if p.ring.is_some() {
                assert!(p.radius >= RING_MIN_RADIUS);
            }
        }
    }

    #[test]
    fn test_mass_tracks_radius() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Planet::random(1, Vec2::ZERO, &mut rng);
        let before = p.mass();
        p.radius += 5.0;
        assert!((p.mass() - before - 5.0 * MASS_PER_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Planet::random(1, Vec2::ZERO, &mut rng);
        for i in 0..50 {
            p.pos = Vec2::splat(i as f32);
            p.record_trail();
        }
        assert_eq!(p.trail.len(), PLANET_TRAIL_LENGTH);
        assert_eq!(p.trail[0], Vec2::splat(49.0));
    }

    #[test]
    fn test_spawn_ignored_during_reset() {
        let mut state = UniverseState::new(3, 800.0, 600.0);
        assert!(state.spawn_planet(Vec2::new(10.0, 10.0)).is_some());
        state.black_hole.phase = ResetPhase::Forming;
        assert!(state.spawn_planet(Vec2::new(20.0, 20.0)).is_none());
        assert_eq!(state.planets.len(), 1);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut state = UniverseState::new(3, 800.0, 600.0);
        state.max_particles = 10;
        state.spawn_burst(Vec2::ZERO, 25, BurstColor::Rainbow, 3.0);
        assert_eq!(state.particles.len(), 10);
        state.spawn_burst(Vec2::ZERO, 25, BurstColor::Hue(120.0), 3.0);
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_particle_decays_and_dies() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, 0.0),
            radius: 2.0,
            hue: 0.0,
            saturation: 0.8,
            lightness: 0.6,
            life: 1.0,
            decay: 0.25,
        };
        p.step();
        assert!((p.pos.x - 2.0).abs() < 1e-5);
        assert!(p.vel.x < 2.0);
        for _ in 0..3 {
            p.step();
        }
        assert!(p.is_dead());
    }

    #[test]
    fn test_resize_rejects_zero() {
        let mut state = UniverseState::new(3, 800.0, 600.0);
        state.resize(0.0, 100.0);
        assert_eq!(state.width, 800.0);
        state.resize(1024.0, 768.0);
        assert_eq!(state.center(), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = UniverseState::new(42, 800.0, 600.0);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
