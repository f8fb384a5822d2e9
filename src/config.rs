//! Game configuration
//!
//! One immutable value constructed at startup and passed to constructors.
//! Loadable from JSON; every field falls back to its default when omitted.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geometry::Rect;
use crate::sim::player::DiagonalPreference;
use crate::sim::projectile::ProjectileSpec;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Complete tuning for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Clock ===
    /// Fixed simulation step (seconds)
    pub fixed_dt: f32,
    /// Longest frame time the clock catches up on
    pub max_frame_time: f32,
    /// Debounce for the debug menu toggle
    pub menu_toggle_cooldown: f32,

    // === World ===
    pub world_size: Vec2,
    /// Screen-space rectangle the world is drawn into
    pub viewport: Rect,
    pub enemy_count: usize,
    /// Keep-out band along the world edges for enemy placement
    pub spawn_margin: f32,
    /// Placement seed; the same seed always yields the same layout
    pub spawn_seed: u64,

    // === Camera ===
    pub camera_zoom: f32,
    /// Lerp factor per 60 fps frame
    pub camera_smoothing: f32,
    pub zoom_step: f32,

    // === Player ===
    pub walk_speed: f32,
    pub run_multiplier: f32,
    /// Seconds per animation frame while walking
    pub anim_frame_time: f32,
    pub frames_per_facing: usize,
    pub player_size: Vec2,
    pub player_max_hp: i32,
    /// Damage immunity after a hit (seconds)
    pub player_invulnerable_time: f32,
    pub diagonal_preference: DiagonalPreference,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_detect_radius: f32,
    pub enemy_attack_range: f32,
    pub enemy_attack_cooldown: f32,
    pub enemy_attack_damage: i32,
    pub enemy_size: f32,
    pub enemy_hp: i32,

    // === Casting ===
    pub cast_cooldown: f32,
    pub spark: ProjectileSpec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            max_frame_time: MAX_FRAME_TIME,
            menu_toggle_cooldown: MENU_TOGGLE_COOLDOWN,

            world_size: Vec2::new(WORLD_W, WORLD_H),
            viewport: Rect::new(0.0, 0.0, VIEWPORT_W, VIEWPORT_H),
            enemy_count: ENEMY_COUNT,
            spawn_margin: SPAWN_MARGIN,
            spawn_seed: SPAWN_SEED,

            camera_zoom: CAMERA_ZOOM,
            camera_smoothing: CAMERA_SMOOTHING,
            zoom_step: ZOOM_STEP,

            walk_speed: WALK_SPEED,
            run_multiplier: RUN_MULTIPLIER,
            anim_frame_time: ANIM_FRAME_TIME,
            frames_per_facing: FRAMES_PER_FACING,
            player_size: Vec2::splat(PLAYER_SIZE),
            player_max_hp: PLAYER_MAX_HP,
            player_invulnerable_time: PLAYER_INVULNERABLE_TIME,
            diagonal_preference: DiagonalPreference::Horizontal,

            enemy_speed: ENEMY_SPEED,
            enemy_detect_radius: ENEMY_DETECT_RADIUS,
            enemy_attack_range: ENEMY_ATTACK_RANGE,
            enemy_attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            enemy_attack_damage: ENEMY_ATTACK_DAMAGE,
            enemy_size: ENEMY_SIZE,
            enemy_hp: ENEMY_HP,

            cast_cooldown: CAST_COOLDOWN,
            spark: ProjectileSpec {
                speed: SPARK_SPEED,
                radius: SPARK_RADIUS,
                damage: SPARK_DAMAGE,
                max_dist: SPARK_MAX_DIST,
            },
        }
    }
}

impl Config {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fixed_dt", self.fixed_dt)?;
        if !(self.max_frame_time >= self.fixed_dt) {
            return Err(ConfigError::invalid(
                "max_frame_time",
                "must be at least one fixed step",
            ));
        }
        non_negative("menu_toggle_cooldown", self.menu_toggle_cooldown)?;

        positive("world_size.x", self.world_size.x)?;
        positive("world_size.y", self.world_size.y)?;
        positive("viewport.w", self.viewport.w)?;
        positive("viewport.h", self.viewport.h)?;
        non_negative("spawn_margin", self.spawn_margin)?;

        if !(self.camera_zoom >= MIN_ZOOM) {
            return Err(ConfigError::invalid(
                "camera_zoom",
                format!("must be at least {MIN_ZOOM}"),
            ));
        }
        if !(self.camera_smoothing > 0.0 && self.camera_smoothing <= 1.0) {
            return Err(ConfigError::invalid("camera_smoothing", "must be in (0, 1]"));
        }

        non_negative("walk_speed", self.walk_speed)?;
        positive("run_multiplier", self.run_multiplier)?;
        positive("anim_frame_time", self.anim_frame_time)?;
        if self.frames_per_facing == 0 {
            return Err(ConfigError::invalid("frames_per_facing", "must be at least 1"));
        }
        positive("player_size.x", self.player_size.x)?;
        positive("player_size.y", self.player_size.y)?;
        if self.player_max_hp <= 0 {
            return Err(ConfigError::invalid("player_max_hp", "must be positive"));
        }
        non_negative("player_invulnerable_time", self.player_invulnerable_time)?;

        non_negative("enemy_speed", self.enemy_speed)?;
        non_negative("enemy_detect_radius", self.enemy_detect_radius)?;
        non_negative("enemy_attack_range", self.enemy_attack_range)?;
        non_negative("enemy_attack_cooldown", self.enemy_attack_cooldown)?;
        positive("enemy_size", self.enemy_size)?;
        non_negative_int("enemy_attack_damage", self.enemy_attack_damage)?;
        if self.enemy_hp <= 0 {
            return Err(ConfigError::invalid("enemy_hp", "must be positive"));
        }

        non_negative("cast_cooldown", self.cast_cooldown)?;
        positive("spark.speed", self.spark.speed)?;
        positive("spark.radius", self.spark.radius)?;
        non_negative_int("spark.damage", self.spark.damage)?;
        non_negative("spark.max_dist", self.spark.max_dist)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be non-negative, got {value}"),
        ))
    }
}

fn non_negative_int(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be non-negative, got {value}"),
        ))
    }
}
