//! The player: movement, facing/animation state and health

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Bounded, Rect};
use crate::config::Config;
use crate::countdown;
use crate::input::MoveInput;

/// Cardinal facing, used to pick the sprite row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Which axis decides facing on a perfect diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagonalPreference {
    #[default]
    Horizontal,
    Vertical,
}

impl Facing {
    /// Facing for an input direction, or `None` when there is no input
    pub fn from_axis(axis: IVec2, preference: DiagonalPreference) -> Option<Self> {
        if axis == IVec2::ZERO {
            return None;
        }
        let horizontal = if axis.x > 0 { Facing::Right } else { Facing::Left };
        let vertical = if axis.y > 0 { Facing::Down } else { Facing::Up };

        let (ax, ay) = (axis.x.abs(), axis.y.abs());
        Some(if ax > ay {
            horizontal
        } else if ay > ax {
            vertical
        } else {
            match preference {
                DiagonalPreference::Horizontal => horizontal,
                DiagonalPreference::Vertical => vertical,
            }
        })
    }
}

/// Player tuning, copied out of the config at construction
#[derive(Debug, Clone, Copy)]
struct PlayerTuning {
    walk_speed: f32,
    run_multiplier: f32,
    anim_frame_time: f32,
    frames_per_facing: usize,
    invulnerable_time: f32,
    diagonal_preference: DiagonalPreference,
    size: Vec2,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Resolved input direction for the last tick (each axis in -1..=1)
    pub vel: Vec2,
    pub facing: Facing,
    pub hp: i32,
    pub max_hp: i32,
    /// Seconds of damage immunity left
    pub invuln_timer: f32,
    pub dead: bool,
    /// Debug flag; enemies skip their damage phase while set
    pub god_mode: bool,
    /// 1.0 walking, the configured multiplier while running
    pub run_multiplier: f32,
    /// Current animation frame within the facing's row
    pub frame_index: usize,
    anim_timer: f32,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, config: &Config) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Down,
            hp: config.player_max_hp,
            max_hp: config.player_max_hp,
            invuln_timer: 0.0,
            dead: false,
            god_mode: false,
            run_multiplier: 1.0,
            frame_index: 0,
            anim_timer: 0.0,
            tuning: PlayerTuning {
                walk_speed: config.walk_speed,
                run_multiplier: config.run_multiplier,
                anim_frame_time: config.anim_frame_time,
                frames_per_facing: config.frames_per_facing.max(1),
                invulnerable_time: config.player_invulnerable_time,
                diagonal_preference: config.diagonal_preference,
                size: config.player_size,
            },
        }
    }

    /// Advance one tick from the sampled movement input
    pub fn update(&mut self, input: &MoveInput, dt: f32) {
        self.invuln_timer = countdown(self.invuln_timer, dt);

        self.run_multiplier = if input.run {
            self.tuning.run_multiplier
        } else {
            1.0
        };

        let axis = input.axis();
        self.vel = axis.as_vec2();
        if let Some(facing) = Facing::from_axis(axis, self.tuning.diagonal_preference) {
            self.facing = facing;
        }

        if self.vel.length_squared() > 0.0 {
            let speed = self.tuning.walk_speed * self.run_multiplier;
            self.pos += self.vel.normalize() * speed * dt;

            // Faster movement cycles frames faster
            let frame_time = self.tuning.anim_frame_time / self.run_multiplier;
            self.anim_timer += dt;
            if self.anim_timer >= frame_time {
                self.anim_timer = 0.0;
                self.frame_index = (self.frame_index + 1) % self.tuning.frames_per_facing;
            }
        } else {
            // Idle holds the first frame of the current facing
            self.frame_index = 0;
            self.anim_timer = 0.0;
        }
    }

    /// Apply damage unless invulnerable or already dead.
    ///
    /// Returns true if hp changed. God mode is enforced by the caller.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.invuln_timer > 0.0 || self.dead {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.invuln_timer = self.tuning.invulnerable_time;
        if self.hp == 0 {
            self.dead = true;
        }
        true
    }

    /// Toggle god mode; enabling it heals to full
    pub fn set_god_mode(&mut self, on: bool) {
        self.god_mode = on;
        if on {
            self.hp = self.max_hp;
            self.dead = false;
        }
    }

    /// Full heal at `pos`, as on a world reset
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.hp = self.max_hp;
        self.invuln_timer = 0.0;
        self.dead = false;
        self.frame_index = 0;
        self.anim_timer = 0.0;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    pub fn half_extents(&self) -> Vec2 {
        self.tuning.size / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
    }
}

impl Bounded for Player {
    fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, self.tuning.size)
    }
}
