//! Tiny 3×5 bitmap font for signposts and shop signs
//!
//! Each glyph is 15 bits, five rows of three, top row in the high bits and
//! the leftmost pixel of a row in that row's high bit.

use super::shapes;
use super::vertex::{Color, Vertex};

const GLYPH_COLS: u32 = 3;
const GLYPH_ROWS: u32 = 5;
/// Columns advanced per character, including the gap
const ADVANCE: f32 = 4.0;

fn glyph(c: char) -> Option<u16> {
    let bits = match c.to_ascii_uppercase() {
        '0' => 0b111_101_101_101_111,
        '1' => 0b010_110_010_010_111,
        '2' => 0b111_001_111_100_111,
        '3' => 0b111_001_111_001_111,
        '4' => 0b101_101_111_001_001,
        '5' => 0b111_100_111_001_111,
        '6' => 0b111_100_111_101_111,
        '7' => 0b111_001_001_001_001,
        '8' => 0b111_101_111_101_111,
        '9' => 0b111_101_111_001_111,
        'A' => 0b010_101_111_101_101,
        'B' => 0b110_101_110_101_110,
        'C' => 0b011_100_100_100_011,
        'D' => 0b110_101_101_101_110,
        'E' => 0b111_100_110_100_111,
        'F' => 0b111_100_110_100_100,
        'G' => 0b011_100_101_101_011,
        'H' => 0b101_101_111_101_101,
        'I' => 0b111_010_010_010_111,
        'J' => 0b001_001_001_101_010,
        'K' => 0b101_101_110_101_101,
        'L' => 0b100_100_100_100_111,
        'M' => 0b101_111_111_101_101,
        'N' => 0b110_101_101_101_101,
        'O' => 0b010_101_101_101_010,
        'P' => 0b110_101_110_100_100,
        'Q' => 0b010_101_101_110_011,
        'R' => 0b110_101_110_101_101,
        'S' => 0b011_100_010_001_110,
        'T' => 0b111_010_010_010_010,
        'U' => 0b101_101_101_101_111,
        'V' => 0b101_101_101_101_010,
        'W' => 0b101_101_111_111_101,
        'X' => 0b101_101_010_101_101,
        'Y' => 0b101_101_010_010_010,
        'Z' => 0b111_001_010_100_111,
        ' ' => 0,
        _ => return None,
    };
    Some(bits)
}

/// Width in pixels of `text` drawn at `scale`
pub fn text_width(text: &str, scale: f32) -> f32 {
    let count = text.chars().count() as f32;
    if count == 0.0 {
        return 0.0;
    }
    (count * ADVANCE - 1.0) * scale
}

/// Text with its top-left corner at (x, y). Unknown characters leave a gap.
pub fn text(s: &str, x: f32, y: f32, scale: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (i, c) in s.chars().enumerate() {
        let Some(bits) = glyph(c) else {
            continue;
        };
        let left = x + i as f32 * ADVANCE * scale;
        for row in 0..GLYPH_ROWS {
            for col in 0..GLYPH_COLS {
                let bit = (GLYPH_ROWS - 1 - row) * GLYPH_COLS + (GLYPH_COLS - 1 - col);
                if bits & (1 << bit) != 0 {
                    vertices.extend(shapes::rect(
                        left + col as f32 * scale,
                        y + row as f32 * scale,
                        scale,
                        scale,
                        color,
                    ));
                }
            }
        }
    }
    vertices
}

/// Text horizontally centered on `center_x`
pub fn text_centered(s: &str, center_x: f32, y: f32, scale: f32, color: Color) -> Vec<Vertex> {
    text(s, center_x - text_width(s, scale) / 2.0, y, scale, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_pixel_counts() {
        // "1" lights 8 pixels, 6 vertices each
        assert_eq!(text("1", 0.0, 0.0, 1.0, INK).len(), 8 * 6);
        assert!(text(" ", 0.0, 0.0, 1.0, INK).is_empty());
    }

    #[test]
    fn test_l_is_left_column_and_base() {
        let v = text("L", 0.0, 0.0, 1.0, INK);
        // Top-left pixel lit, top-right not
        assert!(v.iter().any(|p| p.position == [0.0, 0.0]));
        assert!(!v.iter().any(|p| p.position == [3.0, 0.0]));
        // Bottom row spans the full width
        assert!(v.iter().any(|p| p.position == [3.0, 5.0]));
    }

    #[test]
    fn test_width_and_centering() {
        assert_eq!(text_width("", 2.0), 0.0);
        assert_eq!(text_width("OPEN", 2.0), 30.0);
        let v = text_centered("OPEN", 100.0, 0.0, 2.0, INK);
        let min_x = v.iter().map(|p| p.position[0]).fold(f32::INFINITY, f32::min);
        let max_x = v.iter().map(|p| p.position[0]).fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_x, 85.0);
        assert_eq!(max_x, 115.0);
    }

    #[test]
    fn test_every_street_sign_letter_exists() {
        for c in "MOSELEY WOOD GDNS LEVEL OPEN 0123456789".chars() {
            assert!(glyph(c).is_some(), "missing {c}");
        }
    }
}
