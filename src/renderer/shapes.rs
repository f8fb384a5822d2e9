//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn quad(rect: Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (rect.min(), rect.max());
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Hollow rectangle drawn as four edge quads of the given thickness
pub fn rect_outline(rect: Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    let edges = [
        Rect::new(rect.x, rect.y, rect.w, t),
        Rect::new(rect.x, rect.bottom() - t, rect.w, t),
        Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t),
        Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2.0 * t),
    ];

    let mut vertices = Vec::with_capacity(24);
    for edge in edges {
        vertices.extend(quad(edge, color));
    }
    vertices
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
