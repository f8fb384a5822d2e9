//! Screen-space rendering
//!
//! Turns arena state into colored triangles and hands them to a
//! [`DrawTarget`]. The pass only reads the arena; anything that paints
//! pixels (GPU, software, test recorder) lives behind the trait.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, colors};

use crate::sim::{Arena, Bounded, Camera, Rect};

const CIRCLE_SEGMENTS: u32 = 16;
const TARGET_OUTLINE_WIDTH: f32 = 2.0;

/// External drawing surface
pub trait DrawTarget {
    /// Submit one frame's triangles, clipped to `viewport`
    fn submit(&mut self, viewport: Rect, vertices: &[Vertex]);
}

/// Build and submit the frame for `arena`
pub fn draw(arena: &Arena, target: &mut impl DrawTarget) {
    let vertices = build_frame(arena);
    target.submit(arena.camera().viewport(), &vertices);
}

/// Triangles for one frame in back-to-front order
pub fn build_frame(arena: &Arena) -> Vec<Vertex> {
    let camera = arena.camera();
    let mut vertices = Vec::new();

    vertices.extend(shapes::quad(camera.viewport(), colors::BACKGROUND));
    let world = Rect::new(0.0, 0.0, arena.world_size().x, arena.world_size().y);
    vertices.extend(shapes::quad(to_screen(camera, world), colors::GROUND));

    for enemy in arena.enemies() {
        vertices.extend(shapes::quad(
            to_screen(camera, enemy.bounding_box()),
            colors::ENEMY,
        ));
    }

    if let Some(enemy) = arena.current_target() {
        vertices.extend(shapes::rect_outline(
            to_screen(camera, enemy.bounding_box()),
            TARGET_OUTLINE_WIDTH,
            colors::TARGET_OUTLINE,
        ));
    }

    for projectile in arena.projectiles() {
        vertices.extend(shapes::circle(
            camera.world_to_screen(projectile.pos),
            projectile.radius * camera.zoom(),
            colors::SPARK,
            CIRCLE_SEGMENTS,
        ));
    }

    let player = arena.player();
    let mut color = colors::PLAYER;
    if player.is_invulnerable() {
        color[3] = colors::INVULNERABLE_ALPHA;
    }
    vertices.extend(shapes::quad(to_screen(camera, player.bounding_box()), color));

    vertices
}

fn to_screen(camera: &Camera, rect: Rect) -> Rect {
    let min: Vec2 = camera.world_to_screen(rect.min());
    let max: Vec2 = camera.world_to_screen(rect.max());
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
