//! Shape generation for 2D primitives

use super::scene::DrawRect;
use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t) = (rect.left(), rect.top());
    let (r, b) = (rect.right(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Triangles for a whole draw list, preserving its order
pub fn scene_vertices(scene: &[DrawRect]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.len() * 6);
    for draw in scene {
        // Zero or negative extents draw nothing
        if draw.rect.size.x <= 0.0 || draw.rect.size.y <= 0.0 {
            continue;
        }
        vertices.extend_from_slice(&rect(&draw.rect, draw.color));
    }
    vertices
}
