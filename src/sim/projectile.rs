//! Straight-line projectiles with a finite range

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};

/// Aim used when the target coincides with the start point
pub const DEFAULT_DIRECTION: Vec2 = Vec2::X;

/// Ballistic parameters for one ability's projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Pixels per second
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    /// Range before the projectile expires
    pub max_dist: f32,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction, fixed at spawn
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub traveled: f32,
    pub max_dist: f32,
}

impl Projectile {
    pub fn new(start: Vec2, target: Vec2, spec: &ProjectileSpec) -> Self {
        let dir = (target - start).try_normalize().unwrap_or(DEFAULT_DIRECTION);
        Self {
            pos: start,
            dir,
            speed: spec.speed,
            radius: spec.radius,
            damage: spec.damage,
            traveled: 0.0,
            max_dist: spec.max_dist,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let step = self.dir * self.speed * dt;
        self.pos += step;
        self.traveled += step.length();
    }

    /// False once the projectile has flown past its range
    pub fn alive(&self) -> bool {
        self.traveled <= self.max_dist
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.traveled.is_finite()
    }
}

impl Bounded for Projectile {
    fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SPARK: ProjectileSpec = ProjectileSpec {
        speed: 800.0,
        radius: 4.0,
        damage: 28,
        max_dist: 1400.0,
    };

    #[test]
    fn test_direction_is_unit() {
        let p = Projectile::new(Vec2::ZERO, Vec2::new(30.0, 40.0), &SPARK);
        assert!((p.dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_zero_length_aim_uses_default() {
        let p = Projectile::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), &SPARK);
        assert_eq!(p.dir, DEFAULT_DIRECTION);
    }

    #[test]
    fn test_advances_and_accumulates() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(0.0, 10.0), &SPARK);
        p.update(0.5);
        assert!((p.pos - Vec2::new(0.0, 400.0)).length() < 1e-3);
        assert!((p.traveled - 400.0).abs() < 1e-3);
        assert!(p.alive());
    }

    #[test]
    fn test_expires_past_range() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::X, &SPARK);
        p.update(1.75);
        assert!(p.alive(), "exactly max distance is still alive");
        p.update(0.01);
        assert!(!p.alive());
    }

    proptest! {
        #[test]
        fn prop_alive_iff_within_range(
            tx in -100.0f32..100.0,
            ty in -100.0f32..100.0,
            steps in 1usize..400,
        ) {
            let mut p = Projectile::new(Vec2::ZERO, Vec2::new(tx, ty), &SPARK);
            for _ in 0..steps {
                p.update(1.0 / 120.0);
                prop_assert_eq!(p.alive(), p.traveled <= p.max_dist);
            }
        }
    }
}
