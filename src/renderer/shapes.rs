//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segment count for a circle of `radius` pixels (more for the big showcase ball)
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(12, 96)
}

/// Append a filled circle as a triangle fan unrolled into a list
pub fn push_circle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append an axis-aligned square of side `size` with its top-left at `corner`
pub fn push_square(out: &mut Vec<Vertex>, corner: Vec2, size: f32, color: [f32; 4]) {
    let (x0, y0) = (corner.x, corner.y);
    let (x1, y1) = (corner.x + size, corner.y + size);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}
