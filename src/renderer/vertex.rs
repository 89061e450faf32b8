//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA color in 0..1 (values are sRGB-encoded, the shader decodes)
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
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

/// Opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> Color {
    rgba(hex, 1.0)
}

/// Color from a `0xRRGGBB` literal with alpha
pub const fn rgba(hex: u32, alpha: f32) -> Color {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// HSL to RGBA. `hue` in degrees (any range), saturation/lightness in 0..1
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Fixed colors for street furniture and sprites
pub mod colors {
    use super::{Color, rgb, rgba};

    pub const WHITE: Color = rgb(0xFFFFFF);
    pub const BLACK: Color = rgb(0x000000);
    pub const SHADOW: Color = rgba(0x000000, 0.2);
    pub const SNOW: Color = rgb(0xFFFFFF);

    pub const DUST: Color = rgb(0xE5E7EB);
    pub const SPARKLE_GOLD: Color = rgb(0xFDE047);
    pub const SPARKLE_AMBER: Color = rgb(0xFBBF24);

    pub const GINGERBREAD: Color = rgb(0x8D6E63);
    pub const CANDY_RED: Color = rgb(0xEF4444);
    pub const CANDY_GREEN: Color = rgb(0x22C55E);
    pub const CANDY_BLUE: Color = rgb(0x3B82F6);
    pub const CANDY_YELLOW: Color = rgb(0xEAB308);

    pub const CAR_PALETTE: [Color; 6] = [
        rgb(0xDC2626),
        rgb(0x2563EB),
        rgb(0x16A34A),
        rgb(0xEAB308),
        rgb(0x000000),
        rgb(0x9CA3AF),
    ];

    /// Roofline fairy lights cycle through these
    pub const LIGHTS: [Color; 4] = [CANDY_RED, CANDY_GREEN, CANDY_BLUE, CANDY_YELLOW];

    pub const HOUSE_WALLS: [Color; 5] = [
        rgb(0xFECACA),
        rgb(0xBFDBFE),
        rgb(0xFDE68A),
        rgb(0xE9D5FF),
        rgb(0xFED7AA),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 0.01)
    }

    #[test]
    fn test_rgb_channels() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5), [0.0, 0.0, 1.0, 1.0]));
        // Hue wraps
        assert!(close(hsl(360.0 + 120.0, 1.0, 0.5), hsl(120.0, 1.0, 0.5)));
    }

    #[test]
    fn test_hsl_grey_when_unsaturated() {
        let c = hsl(200.0, 0.0, 0.3);
        assert!(close(c, [0.3, 0.3, 0.3, 1.0]));
    }
}
