//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Screen-space vertex with position and color
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

    /// Bytes per vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Raw bytes for handing a batch to a GPU or software rasterizer
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const GROUND: [f32; 4] = [0.16, 0.24, 0.14, 1.0];
    pub const PLAYER: [f32; 4] = [0.3, 0.6, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [0.86, 0.2, 0.2, 1.0];
    pub const TARGET_OUTLINE: [f32; 4] = [1.0, 0.9, 0.2, 1.0];
    pub const SPARK: [f32; 4] = [0.7, 0.4, 1.0, 1.0];
    /// Alpha applied to the player while damage immunity is active
    pub const INVULNERABLE_ALPHA: f32 = 0.7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, colors::ENEMY); 3];
        assert_eq!(Vertex::as_bytes(&verts).len(), 72);
    }
}
