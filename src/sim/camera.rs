//! Follow camera with zoom, smoothing and world-bounds clamping
//!
//! The camera owns the mapping between screen space (the viewport rectangle
//! the world is drawn into) and world space (the zoomed view rectangle).

use glam::Vec2;

use super::geometry::Rect;
use crate::clamp_center;
use crate::consts::MIN_ZOOM;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Screen area the world is drawn into
    viewport: Rect,
    world_size: Vec2,
    zoom: f32,
    /// Per-frame smoothing factor at 60 fps (0 = frozen, 1 = locked on)
    smoothing: f32,
    /// World-space center; `None` until a target is first set
    center: Option<Vec2>,
    /// Tracked target position
    target: Option<Vec2>,
}

impl Camera {
    pub fn new(viewport: Rect, world_size: Vec2, zoom: f32, smoothing: f32) -> Self {
        Self {
            viewport,
            world_size,
            zoom: zoom.max(MIN_ZOOM),
            smoothing: smoothing.clamp(0.0, 1.0),
            center: None,
            target: None,
        }
    }

    /// Track a position. The first call snaps the center onto it.
    pub fn set_target(&mut self, pos: Vec2) {
        self.target = Some(pos);
        if self.center.is_none() {
            self.center = Some(pos);
            self.clamp();
        }
    }

    /// Drop the current center so the next `set_target` snaps again
    pub fn reset_tracking(&mut self) {
        self.center = None;
        self.target = None;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
        self.clamp();
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Ease toward the target with frame-rate independent exponential smoothing
    pub fn update(&mut self, dt: f32) {
        let Some(desired) = self.target else {
            return;
        };
        let center = self.center.get_or_insert(desired);

        // Convert the 60 fps lerp factor into this step's alpha
        let alpha = 1.0 - (1.0 - self.smoothing).powf(dt * 60.0);
        *center += (desired - *center) * alpha;
        self.clamp();
    }

    fn clamp(&mut self) {
        let half = self.half_extents();
        if let Some(center) = self.center.as_mut() {
            center.x = clamp_center(center.x, half.x, self.world_size.x);
            center.y = clamp_center(center.y, half.y, self.world_size.y);
        }
    }

    /// Half the size of the visible world area
    fn half_extents(&self) -> Vec2 {
        self.viewport.size() / self.zoom / 2.0
    }

    /// World-space center (world center before any target is set)
    pub fn center(&self) -> Vec2 {
        self.center.unwrap_or(self.world_size / 2.0)
    }

    /// World-space rectangle currently visible
    pub fn view_rect(&self) -> Rect {
        Rect::from_center(self.center(), self.viewport.size() / self.zoom)
    }

    /// Map a screen point into the world; `None` if it falls outside the viewport
    pub fn screen_to_world(&self, screen: Vec2) -> Option<Vec2> {
        if !self.viewport.contains_point(screen) {
            return None;
        }
        let view = self.view_rect();
        let frac = (screen - self.viewport.min()) / self.viewport.size();
        Some(view.min() + frac * view.size())
    }

    /// Map a world point onto the screen (may land outside the viewport)
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let view = self.view_rect();
        let frac = (world - view.min()) / view.size();
        self.viewport.min() + frac * self.viewport.size()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}
