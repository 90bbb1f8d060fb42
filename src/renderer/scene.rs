//! Scene tessellation
//!
//! Turns a `UniverseState` into one triangle list, back to front:
//! starfield, center star or black hole, planets, particles, UFOs,
//! satellites, meteors.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::vertex::colors::{self, hsla, with_alpha};
use crate::settings::Settings;
use crate::sim::state::{Meteor, Planet, Satellite, Ufo};
use crate::sim::{ResetPhase, UniverseState, center_star_radius, star_brightness};

/// Clear color for the current background hue
pub fn background_color(state: &UniverseState) -> [f32; 4] {
    hsla(state.background_hue, 0.45, 0.045, 1.0)
}

/// Rebuild `out` with the whole scene in screen pixels
pub fn build_scene(state: &UniverseState, settings: &Settings, out: &mut Vec<Vertex>) {
    out.clear();
    let segments = settings.quality.circle_segments();

    draw_starfield(state, out);

    match state.black_hole.phase {
        ResetPhase::Idle => draw_center_star(state, out, segments),
        _ => draw_black_hole(state, out, segments),
    }

    for planet in &state.planets {
        draw_planet(planet, settings, out, segments);
    }

    for p in &state.particles {
        let color = hsla(p.hue, p.saturation, p.lightness, p.life.clamp(0.0, 1.0));
        shapes::circle(out, p.pos, p.radius, color, 6);
    }

    for ufo in &state.ufos {
        draw_ufo(ufo, out, segments);
    }

    let center = state.center();
    for satellite in &state.satellites {
        draw_satellite(satellite, center, out);
    }

    for meteor in &state.meteors {
        draw_meteor(meteor, out);
    }
}

fn draw_starfield(state: &UniverseState, out: &mut Vec<Vertex>) {
    let size = Vec2::new(state.width, state.height);
    for star in &state.stars {
        let brightness = star_brightness(star, state.time_ticks);
        let [r, g, b] = colors::STAR;
        shapes::circle(out, star.pos * size, star.size, [r, g, b, brightness], 5);
    }
}

fn draw_center_star(state: &UniverseState, out: &mut Vec<Vertex>, segments: u32) {
    let radius = center_star_radius(state.time_ticks);
    shapes::radial_gradient(
        out,
        state.center(),
        radius,
        colors::CENTER_STAR_CORE,
        colors::CENTER_STAR_EDGE,
        segments,
    );
}

fn draw_black_hole(state: &UniverseState, out: &mut Vec<Vertex>, segments: u32) {
    let center = state.center();
    let radius = state.black_hole.radius;
    if radius <= 0.0 {
        return;
    }

    // Accretion glow spins its hue slightly over time
    let swirl = (state.time_ticks as f32 * 0.1).sin() * 0.1;
    let inner = [
        colors::ACCRETION_INNER[0],
        colors::ACCRETION_INNER[1] + swirl,
        colors::ACCRETION_INNER[2],
        colors::ACCRETION_INNER[3],
    ];
    shapes::ring(
        out,
        center,
        radius * 0.9,
        radius * 1.7,
        inner,
        colors::ACCRETION_OUTER,
        segments,
    );
    shapes::circle(out, center, radius, colors::BLACK_HOLE, segments);
}

fn draw_planet(planet: &Planet, settings: &Settings, out: &mut Vec<Vertex>, segments: u32) {
    let body = hsla(planet.hue, 0.7, 0.6, 1.0);

    if settings.trails {
        shapes::trail(out, &planet.trail, planet.radius * 0.6, with_alpha(body, 0.35));
    }

    if let Some(ring) = planet.ring {
        shapes::ellipse_ring(
            out,
            planet.pos,
            planet.radius * 1.35,
            planet.radius * 1.9,
            ring.tilt,
            ring.angle,
            hsla(planet.hue + ring.hue_shift, 0.5, 0.7, 0.8),
            segments,
        );
    }

    shapes::radial_gradient(
        out,
        planet.pos,
        planet.radius,
        hsla(planet.hue, 0.7, 0.75, 1.0),
        body,
        segments,
    );

    for spot in &planet.spots {
        let offset = crate::polar_to_cartesian(spot.distance * planet.radius, spot.angle);
        shapes::circle(
            out,
            planet.pos + offset,
            spot.size * planet.radius,
            hsla(planet.hue, 0.6, 0.6 + spot.shade, 0.85),
            8,
        );
    }
}

fn draw_ufo(ufo: &Ufo, out: &mut Vec<Vertex>, segments: u32) {
    if ufo.beam {
        let top = ufo.pos + Vec2::new(0.0, 4.0);
        let bottom = ufo.pos + Vec2::new(0.0, 70.0);
        shapes::streak(
            out,
            top,
            bottom,
            5.0,
            22.0,
            hsla(ufo.hue, 0.9, 0.7, 0.35),
            hsla(ufo.hue, 0.9, 0.7, 0.0),
        );
    }

    // Dome, then the saucer hull over its lower half
    shapes::circle(out, ufo.pos - Vec2::new(0.0, 4.0), 7.0, hsla(ufo.hue, 0.8, 0.65, 0.9), segments);
    shapes::ellipse_ring(out, ufo.pos, 0.0, 18.0, 0.3, 0.0, colors::UFO_HULL, segments);

    // Blinking rim lights
    let blink = (ufo.bob_phase * 3.0).sin() > 0.0;
    for i in -1..=1 {
        let light = ufo.pos + Vec2::new(i as f32 * 9.0, 2.0);
        let alpha = if blink == (i == 0) { 1.0 } else { 0.4 };
        shapes::circle(out, light, 1.8, [1.0, 0.9, 0.3, alpha], 6);
    }
}

fn draw_satellite(satellite: &Satellite, center: Vec2, out: &mut Vec<Vertex>) {
    let pos = satellite.position(center);
    let span = satellite.panel_span;

    shapes::rect(out, pos - Vec2::splat(2.5), pos + Vec2::splat(2.5), colors::SATELLITE_BODY);
    shapes::rect(
        out,
        pos - Vec2::new(span + 3.0, 1.5),
        pos - Vec2::new(3.0, -1.5),
        colors::SATELLITE_PANEL,
    );
    shapes::rect(
        out,
        pos + Vec2::new(3.0, -1.5),
        pos + Vec2::new(span + 3.0, 1.5),
        colors::SATELLITE_PANEL,
    );
}

fn draw_meteor(meteor: &Meteor, out: &mut Vec<Vertex>) {
    let tail_end = meteor.pos - meteor.vel.normalize_or_zero() * meteor.tail;
    shapes::streak(
        out,
        meteor.pos,
        tail_end,
        1.8,
        0.2,
        hsla(meteor.hue, 1.0, 0.85, 1.0),
        hsla(meteor.hue, 1.0, 0.6, 0.0),
    );
    shapes::circle(out, meteor.pos, 2.0, [1.0, 1.0, 1.0, 1.0], 6);
}
