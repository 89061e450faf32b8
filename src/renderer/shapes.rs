//! Shape generation for 2D primitives
//!
//! Everything is a triangle list in screen space (y down). Canvas-style
//! angles: 0 points right and angles grow clockwise on screen.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::{Color, Vertex, with_alpha};

/// Segments used for circles unless a caller asks otherwise
pub const CIRCLE_SEGMENTS: u32 = 16;

fn tri(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: Color) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));
}

fn quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    tri(vertices, a, b, c, color);
    tri(vertices, a, c, d, color);
}

/// Filled axis-aligned rectangle from its top-left corner
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        Vec2::new(x, y),
        Vec2::new(x + width, y),
        Vec2::new(x + width, y + height),
        Vec2::new(x, y + height),
        color,
    );
    vertices
}

/// Rectangle border of the given stroke width, centered on the edges
pub fn rect_outline(x: f32, y: f32, width: f32, height: f32, stroke: f32, color: Color) -> Vec<Vertex> {
    let h = stroke / 2.0;
    let mut vertices = rect(x - h, y - h, width + stroke, stroke, color);
    vertices.extend(rect(x - h, y + height - h, width + stroke, stroke, color));
    vertices.extend(rect(x - h, y + h, stroke, height - stroke, color));
    vertices.extend(rect(x + width - h, y + h, stroke, height - stroke, color));
    vertices
}

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(3);
    tri(&mut vertices, a, b, c, color);
    vertices
}

/// Filled polygon, fanned from its centroid.
///
/// Correct for convex outlines and for any outline that is star-shaped
/// around its centroid.
pub fn polygon(points: &[Vec2], color: Color) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        tri(&mut vertices, centroid, p, next, color);
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    pie(center, radius, 0.0, TAU, color, segments)
}

/// Filled circular sector swept clockwise (on screen) from `start` to `end`
pub fn pie(center: Vec2, radius: f32, start: f32, end: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        tri(
            &mut vertices,
            center,
            center + radius * Vec2::from_angle(theta1),
            center + radius * Vec2::from_angle(theta2),
            color,
        );
    }

    vertices
}

/// Thick arc band between two radii (a full turn gives a ring)
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    end: f32,
    color: Color,
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let dir1 = Vec2::from_angle(start + (i as f32 / segments as f32) * span);
        let dir2 = Vec2::from_angle(start + ((i + 1) as f32 / segments as f32) * span);

        // Two triangles per segment
        quad(
            &mut vertices,
            center + inner_radius * dir1,
            center + outer_radius * dir1,
            center + outer_radius * dir2,
            center + inner_radius * dir2,
            color,
        );
    }

    vertices
}

/// Soft radial glow: concentric rings fading from `alpha` at `inner` to
/// transparent at `outer`, with a solid core inside `inner`
pub fn glow(center: Vec2, inner: f32, outer: f32, color: Color, alpha: f32, rings: u32) -> Vec<Vertex> {
    let rings = rings.max(1);
    let mut vertices = circle(center, inner, with_alpha(color, alpha), CIRCLE_SEGMENTS);
    let step = (outer - inner) / rings as f32;
    for i in 0..rings {
        let t = (i as f32 + 0.5) / rings as f32;
        let r0 = inner + step * i as f32;
        vertices.extend(arc_band(
            center,
            r0,
            r0 + step,
            0.0,
            TAU,
            with_alpha(color, alpha * (1.0 - t)),
            CIRCLE_SEGMENTS,
        ));
    }
    vertices
}

/// Straight stroke of the given width with butt ends
pub fn line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, a + perp, b + perp, b - perp, a - perp, color);
    vertices
}

/// Stroke with round caps
pub fn capped_line(a: Vec2, b: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = line(a, b, width, color);
    vertices.extend(circle(a, width / 2.0, color, 8));
    vertices.extend(circle(b, width / 2.0, color, 8));
    vertices
}

/// Connected stroke through `points` with round joints
pub fn polyline(points: &[Vec2], width: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for pair in points.windows(2) {
        vertices.extend(line(pair[0], pair[1], width, color));
    }
    if width > 2.0 {
        for &p in points.iter().skip(1).take(points.len().saturating_sub(2)) {
            vertices.extend(circle(p, width / 2.0, color, 8));
        }
    }
    vertices
}

/// Stroke through `points` broken into `dash`/`gap` runs, starting `offset`
/// into the pattern
pub fn dashed_polyline(
    points: &[Vec2],
    width: f32,
    dash: f32,
    gap: f32,
    offset: f32,
    color: Color,
) -> Vec<Vertex> {
    let period = dash + gap;
    if period <= 0.0 {
        return polyline(points, width, color);
    }

    let mut vertices = Vec::new();
    // Distance travelled along the pattern
    let mut along = offset.rem_euclid(period);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(b);
        let dir = (b - a).normalize_or_zero();
        let mut t = 0.0;

        while t < length {
            let phase = along.rem_euclid(period);
            let run = if phase < dash { dash - phase } else { period - phase };
            let step = run.min(length - t);
            if phase < dash {
                vertices.extend(line(a + dir * t, a + dir * (t + step), width, color));
            }
            t += step;
            along += step;
        }
    }
    vertices
}

/// Points along a quadratic Bézier, endpoints included
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, steps: u32) -> Vec<Vec2> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
        })
        .collect()
}

/// Points along a cubic Bézier, endpoints included
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, steps: u32) -> Vec<Vec2> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let u = 1.0 - t;
            p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
        .collect()
}

/// Pointed star. `start_deg` is where the first tip sits, measured
/// counter-clockwise on screen from the +x axis.
pub fn star(center: Vec2, outer: f32, inner: f32, tips: u32, start_deg: f32, color: Color) -> Vec<Vertex> {
    let tips = tips.max(2);
    let step = 360.0 / tips as f32;
    let point = |deg: f32, r: f32| {
        let rad = deg.to_radians();
        center + Vec2::new(rad.cos() * r, -rad.sin() * r)
    };

    let mut outline = Vec::with_capacity(tips as usize * 2);
    for i in 0..tips {
        let tip = start_deg + i as f32 * step;
        outline.push(point(tip, outer));
        outline.push(point(tip + step / 2.0, inner));
    }
    polygon(&outline, color)
}

/// Filled rectangle with rounded corners
pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radius: f32, color: Color) -> Vec<Vertex> {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let mut vertices = rect(x + r, y, width - 2.0 * r, height, color);
    vertices.extend(rect(x, y + r, r, height - 2.0 * r, color));
    vertices.extend(rect(x + width - r, y + r, r, height - 2.0 * r, color));

    let corners = [
        (Vec2::new(x + r, y + r), PI),
        (Vec2::new(x + width - r, y + r), 1.5 * PI),
        (Vec2::new(x + width - r, y + height - r), 0.0),
        (Vec2::new(x + r, y + height - r), 0.5 * PI),
    ];
    for (center, start) in corners {
        vertices.extend(pie(center, r, start, start + PI / 2.0, color, 4));
    }
    vertices
}
