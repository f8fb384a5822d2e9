//! Floral Foundations - top-down action game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, enemies, projectiles, camera, arena, clock)
//! - `session`: Frame driver, overlays and command dispatch
//! - `renderer`: Read-only render pass producing screen-space triangles
//! - `config`: Immutable, data-driven game tuning
//! - `input`: Input events and held-key state

pub mod config;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{Config, ConfigError};
pub use session::{AssetSource, Command, Session, SessionError};

/// Default tuning values (the `Config` defaults are built from these)
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Longest frame the clock will catch up on
    pub const MAX_FRAME_TIME: f32 = 0.25;
    /// Debounce for the debug menu toggle key
    pub const MENU_TOGGLE_COOLDOWN: f32 = 0.18;

    /// World dimensions (pixels)
    pub const WORLD_W: f32 = 3072.0;
    pub const WORLD_H: f32 = 2048.0;
    /// Screen area the world is drawn into (left of the 320px side panel)
    pub const VIEWPORT_W: f32 = 960.0;
    pub const VIEWPORT_H: f32 = 720.0;

    /// Camera defaults
    pub const CAMERA_ZOOM: f32 = 2.0;
    pub const CAMERA_SMOOTHING: f32 = 0.15;
    pub const MIN_ZOOM: f32 = 0.5;
    pub const ZOOM_STEP: f32 = 0.25;

    /// Player movement and animation
    pub const WALK_SPEED: f32 = 160.0;
    pub const RUN_MULTIPLIER: f32 = 1.75;
    /// Seconds per animation frame at walking speed
    pub const ANIM_FRAME_TIME: f32 = 0.12;
    pub const FRAMES_PER_FACING: usize = 8;
    pub const PLAYER_SIZE: f32 = 64.0;

    /// Player combat
    pub const PLAYER_MAX_HP: i32 = 100;
    pub const PLAYER_INVULNERABLE_TIME: f32 = 0.60;

    /// Enemy AI/combat
    pub const ENEMY_SPEED: f32 = 120.0;
    pub const ENEMY_DETECT_RADIUS: f32 = 900.0;
    pub const ENEMY_ATTACK_DAMAGE: i32 = 12;
    pub const ENEMY_ATTACK_COOLDOWN: f32 = 0.60;
    /// Closer than this OR box-overlapping deals damage
    pub const ENEMY_ATTACK_RANGE: f32 = 28.0;
    pub const ENEMY_SIZE: f32 = 22.0;
    pub const ENEMY_HP: i32 = 100;

    /// Enemy placement
    pub const ENEMY_COUNT: usize = 20;
    pub const SPAWN_MARGIN: f32 = 128.0;
    pub const SPAWN_SEED: u64 = 1337;

    /// Casting
    pub const CAST_COOLDOWN: f32 = 0.10;
    pub const SPARK_SPEED: f32 = 800.0;
    pub const SPARK_RADIUS: f32 = 4.0;
    pub const SPARK_DAMAGE: i32 = 28;
    pub const SPARK_MAX_DIST: f32 = 1400.0;
}

/// Decrement a countdown timer, never going below zero
#[inline]
pub fn countdown(timer: f32, dt: f32) -> f32 {
    (timer - dt).max(0.0)
}

/// Clamp a center coordinate so `[c - half, c + half]` stays inside `[0, extent]`.
///
/// When the span doesn't fit (`2 * half > extent`) the bounds collapse and the
/// coordinate is centered on the extent instead.
#[inline]
pub fn clamp_center(value: f32, half: f32, extent: f32) -> f32 {
    if half * 2.0 >= extent {
        extent / 2.0
    } else {
        value.clamp(half, extent - half)
    }
}
