//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in surface coordinates
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle with top-left corner at (x, y)
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Vertical dashed line centered on `center_x`, one dash starting every
/// `period` units from the top
pub fn dashed_line(
    center_x: f32,
    height: f32,
    width: f32,
    dash: f32,
    period: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if period <= 0.0 {
        return vertices;
    }
    let mut y = 0.0;
    while y < height {
        vertices.extend(rect(center_x - width / 2.0, y, width, dash, color));
        y += period;
    }
    vertices
}

// Seven-segment layout, bit order: top, top-right, bottom-right, bottom,
// bottom-left, top-left, middle
const SEGMENTS: [u8; 10] = [
    0b0111111, // 0
    0b0000110, // 1
    0b1011011, // 2
    0b1001111, // 3
    0b1100110, // 4
    0b1101101, // 5
    0b1111101, // 6
    0b0000111, // 7
    0b1111111, // 8
    0b1101111, // 9
];

/// Width of a digit glyph relative to its height
pub const DIGIT_ASPECT: f32 = 0.55;
/// Gap between glyphs relative to height
const DIGIT_SPACING: f32 = 0.2;

/// A single decimal digit as seven-segment bars, top-left at (x, y)
pub fn digit(d: u8, x: f32, y: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mask = SEGMENTS[(d % 10) as usize];
    let w = height * DIGIT_ASPECT;
    let t = height * 0.12;
    let half = height / 2.0;

    let bars = [
        (x, y, w, t),
        (x + w - t, y, t, half),
        (x + w - t, y + half, t, half),
        (x, y + height - t, w, t),
        (x, y + half, t, half),
        (x, y, t, half),
        (x, y + half - t / 2.0, w, t),
    ];

    bars.iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1u8 << *bit) != 0)
        .flat_map(|(_, &(bx, by, bw, bh))| rect(bx, by, bw, bh, color))
        .collect()
}

/// Total width of `value` rendered at `height`
pub fn number_width(value: u32, height: f32) -> f32 {
    let count = value.to_string().len() as f32;
    count * height * DIGIT_ASPECT + (count - 1.0) * height * DIGIT_SPACING
}

/// Decimal number horizontally centered on `center_x`, top at `top`
pub fn number(value: u32, center_x: f32, top: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let advance = height * (DIGIT_ASPECT + DIGIT_SPACING);
    let start = center_x - number_width(value, height) / 2.0;
    value
        .to_string()
        .bytes()
        .enumerate()
        .flat_map(|(i, b)| digit(b - b'0', start + i as f32 * advance, top, height, color))
        .collect()
}
