//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const CENTER_STAR_CORE: [f32; 4] = [1.0, 1.0, 200.0 / 255.0, 1.0];
    pub const CENTER_STAR_EDGE: [f32; 4] = [1.0, 1.0, 200.0 / 255.0, 0.0];
    pub const BLACK_HOLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ACCRETION_INNER: [f32; 4] = [0.75, 0.35, 1.0, 0.9];
    pub const ACCRETION_OUTER: [f32; 4] = [0.4, 0.1, 0.8, 0.0];
    pub const UFO_HULL: [f32; 4] = [0.7, 0.72, 0.78, 1.0];
    pub const SATELLITE_BODY: [f32; 4] = [0.85, 0.85, 0.9, 1.0];
    pub const SATELLITE_PANEL: [f32; 4] = [0.2, 0.35, 0.85, 1.0];
    pub const STAR: [f32; 3] = [1.0, 1.0, 1.0];

    /// HSL (hue degrees, saturation 0-1, lightness 0-1) to RGBA
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
        let h = crate::wrap_hue(hue) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        [r + m, g + m, b + m, alpha]
    }

    /// Same color with a different alpha
    #[inline]
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::colors::hsla;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(close(hsla(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsla(120.0, 1.0, 0.5, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsla(240.0, 1.0, 0.5, 0.5), [0.0, 0.0, 1.0, 0.5]));
        assert!(close(hsla(360.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_hsla_grey() {
        assert!(close(hsla(200.0, 0.0, 0.25, 1.0), [0.25, 0.25, 0.25, 1.0]));
    }

    #[test]
    fn test_vertex_size() {
        assert_eq!(std::mem::size_of::<super::Vertex>(), 24);
    }
}
