//! Enemies: straight-line pursuit and a melee attack gated by a cooldown

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};
use super::player::Player;
use crate::config::Config;
use crate::countdown;

/// Stable enemy identifier; never reused within an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Squared distances below this count as "on top of the player" (no pursuit)
const MIN_PURSUIT_DIST_SQ: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Vec2,
    pub hp: i32,
    pub speed: f32,
    pub detect_radius: f32,
    pub attack_range: f32,
    /// Seconds between hits
    pub attack_cooldown: f32,
    pub attack_damage: i32,
    /// Seconds until the next hit is allowed
    cooldown_remaining: f32,
    size: f32,
}

impl Enemy {
    pub fn new(id: EnemyId, pos: Vec2, config: &Config) -> Self {
        Self {
            id,
            pos,
            hp: config.enemy_hp,
            speed: config.enemy_speed,
            detect_radius: config.enemy_detect_radius,
            attack_range: config.enemy_attack_range,
            attack_cooldown: config.enemy_attack_cooldown,
            attack_damage: config.enemy_attack_damage,
            cooldown_remaining: 0.0,
            size: config.enemy_size,
        }
    }

    /// One AI tick: cooldown, pursuit, then the damage phase.
    ///
    /// Returns true if the player actually lost hp.
    pub fn update(&mut self, player: &mut Player, dt: f32) -> bool {
        self.cooldown_remaining = countdown(self.cooldown_remaining, dt);

        // Pursue when inside the detection radius
        let to_player = player.pos - self.pos;
        let dist_sq = to_player.length_squared();
        if dist_sq > MIN_PURSUIT_DIST_SQ && dist_sq <= self.detect_radius * self.detect_radius {
            self.pos += to_player.normalize() * self.speed * dt;
        }

        if player.dead || player.god_mode {
            return false;
        }

        // Range uses the pre-move distance, overlap the post-move box
        let close = to_player.length() <= self.attack_range
            || self.bounding_box().intersects(&player.bounding_box());
        if close && self.cooldown_remaining <= 0.0 {
            self.cooldown_remaining = self.attack_cooldown;
            return player.take_damage(self.attack_damage);
        }
        false
    }

    /// Subtract hp; true once the enemy is dead (idempotent after death)
    pub fn damage(&mut self, amount: i32) -> bool {
        if self.hp <= 0 {
            return true;
        }
        self.hp -= amount;
        self.hp <= 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
    }
}

impl Bounded for Enemy {
    fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }
}
