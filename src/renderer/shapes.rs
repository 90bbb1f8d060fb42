//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

#[inline]
fn push_tri(out: &mut Vec<Vertex>, a: (Vec2, [f32; 4]), b: (Vec2, [f32; 4]), c: (Vec2, [f32; 4])) {
    out.push(Vertex::new(a.0.x, a.0.y, a.1));
    out.push(Vertex::new(b.0.x, b.0.y, b.1));
    out.push(Vertex::new(c.0.x, c.0.y, c.1));
}

#[inline]
fn rim(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let theta = (i as f32 / segments as f32) * TAU;
    center + Vec2::new(radius * theta.cos(), radius * theta.sin())
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    radial_gradient(out, center, radius, color, color, segments);
}

/// Disc shading from `inner` at the center to `outer` at the rim
pub fn radial_gradient(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        push_tri(
            out,
            (center, inner),
            (rim(center, radius, i, segments), outer),
            (rim(center, radius, i + 1, segments), outer),
        );
    }
}

/// Ring (hollow circle) with a color ramp from inner to outer edge
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 6) as usize);
    for i in 0..segments {
        let inner1 = rim(center, inner_radius, i, segments);
        let outer1 = rim(center, outer_radius, i, segments);
        let inner2 = rim(center, inner_radius, i + 1, segments);
        let outer2 = rim(center, outer_radius, i + 1, segments);

        // Two triangles per segment
        push_tri(out, (inner1, inner_color), (outer1, outer_color), (inner2, inner_color));
        push_tri(out, (inner2, inner_color), (outer1, outer_color), (outer2, outer_color));
    }
}

/// Flattened, rotated ring (planetary rings seen at an angle)
#[allow(clippy::too_many_arguments)]
pub fn ellipse_ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    squash: f32,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) {
    let (sin_r, cos_r) = rotation.sin_cos();
    let project = |r: f32, i: u32| {
        let theta = (i as f32 / segments as f32) * TAU;
        let local = Vec2::new(r * theta.cos(), r * theta.sin() * squash);
        center + Vec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
    };

    out.reserve((segments * 6) as usize);
    for i in 0..segments {
        let inner1 = project(inner_radius, i);
        let outer1 = project(outer_radius, i);
        let inner2 = project(inner_radius, i + 1);
        let outer2 = project(outer_radius, i + 1);

        push_tri(out, (inner1, color), (outer1, color), (inner2, color));
        push_tri(out, (inner2, color), (outer1, color), (outer2, color));
    }
}

/// Thick line from `a` to `b`, tapering and fading between the ends
pub fn streak(
    out: &mut Vec<Vertex>,
    a: Vec2,
    b: Vec2,
    width_a: f32,
    width_b: f32,
    color_a: [f32; 4],
    color_b: [f32; 4],
) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x);

    let a1 = a + perp * width_a;
    let a2 = a - perp * width_a;
    let b1 = b + perp * width_b;
    let b2 = b - perp * width_b;

    push_tri(out, (a1, color_a), (a2, color_a), (b1, color_b));
    push_tri(out, (b1, color_b), (a2, color_a), (b2, color_b));
}

/// Axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    let tl = min;
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    let br = max;
    push_tri(out, (tl, color), (bl, color), (tr, color));
    push_tri(out, (tr, color), (bl, color), (br, color));
}

/// Fading motion trail through `points` (newest first)
pub fn trail(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }

    let len = points.len() as f32;
    for i in 0..points.len() - 1 {
        let t1 = i as f32 / len;
        let t2 = (i + 1) as f32 / len;

        // Fade alpha and size along trail
        let c1 = [color[0], color[1], color[2], color[3] * (1.0 - t1)];
        let c2 = [color[0], color[1], color[2], color[3] * (1.0 - t2)];
        let w1 = width * (1.0 - t1 * 0.7);
        let w2 = width * (1.0 - t2 * 0.7);

        streak(out, points[i], points[i + 1], w1, w2, c1, c2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 10.0, WHITE, 16);
        assert_eq!(out.len(), 16 * 3);
        for v in &out {
            let d = Vec2::from(v.position).length();
            assert!(d < 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_radial_gradient_colors() {
        let mut out = Vec::new();
        let edge = [1.0, 1.0, 1.0, 0.0];
        radial_gradient(&mut out, Vec2::new(5.0, 5.0), 3.0, WHITE, edge, 8);
        assert_eq!(out[0].position, [5.0, 5.0]);
        assert_eq!(out[0].color, WHITE);
        assert_eq!(out[1].color, edge);
    }

    #[test]
    fn test_ring_and_ellipse_counts() {
        let mut out = Vec::new();
        ring(&mut out, Vec2::ZERO, 5.0, 8.0, WHITE, WHITE, 12);
        assert_eq!(out.len(), 12 * 6);

        out.clear();
        ellipse_ring(&mut out, Vec2::ZERO, 5.0, 8.0, 0.3, 0.5, WHITE, 12);
        assert_eq!(out.len(), 12 * 6);
        for v in &out {
            assert!(Vec2::from(v.position).length() <= 8.0 + 1e-3);
        }
    }

    #[test]
    fn test_trail_needs_two_points() {
        let mut out = Vec::new();
        trail(&mut out, &[Vec2::ZERO], 2.0, WHITE);
        assert!(out.is_empty());
        trail(&mut out, &[Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)], 2.0, WHITE);
        assert_eq!(out.len(), 2 * 6);
        // Newest segment is the most opaque
        assert!(out[0].color[3] > out[out.len() - 1].color[3]);
    }

    #[test]
    fn test_rect() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(4.0, 2.0), WHITE);
        assert_eq!(out.len(), 6);
    }
}
