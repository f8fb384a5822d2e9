//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (enemy placement)
//! - Stable iteration order (enemies in spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod camera;
pub mod clock;
pub mod enemy;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod roster;
pub mod tick;

pub use arena::{Ability, Arena, ClickOutcome, GameEvent};
pub use camera::Camera;
pub use clock::{Debounce, FixedStepClock};
pub use enemy::{Enemy, EnemyId};
pub use geometry::{Bounded, Rect};
pub use player::{DiagonalPreference, Facing, Player};
pub use projectile::{Projectile, ProjectileSpec};
pub use roster::Roster;
pub use tick::tick;
