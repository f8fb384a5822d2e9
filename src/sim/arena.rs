//! The arena: owns the world's entities and resolves targeting and casting
//!
//! Per-tick sequencing lives in [`super::tick`]; this module holds the state,
//! construction/reset, and the input-driven operations that run between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::{Enemy, EnemyId};
use super::geometry::Bounded;
use super::player::Player;
use super::projectile::{Projectile, ProjectileSpec};
use super::roster::Roster;
use super::tick::tick;
use crate::config::Config;
use crate::input::{InputEvent, Key, KeyState};

/// Undrained events kept before the oldest are discarded
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Castable abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Spark,
}

impl Ability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Spark => "spark",
        }
    }
}

/// Notable things that happened, drained by the session for audio/log hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Click put a new enemy under the reticle
    TargetAcquired(EnemyId),
    /// A projectile left the player
    SparkCast { target: EnemyId },
    EnemyKilled(EnemyId),
    /// Player lost hp; `hp` is what remains
    PlayerHit { by: EnemyId, hp: i32 },
    PlayerDied,
    /// An entity with corrupt state was dropped mid-tick
    EntityFault,
}

/// What a world click resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No ability selected, player dead, or click outside the viewport
    Ignored,
    /// Click landed in the world but not on the current target
    Missed,
    /// On the target, but the cast was not possible (cooldown)
    Targeted(EnemyId),
    /// A projectile was launched at the target
    Cast(EnemyId),
}

#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) config: Config,
    pub(crate) world_size: Vec2,
    pub(crate) spawn_pos: Vec2,
    pub(crate) player: Player,
    pub(crate) enemies: Roster,
    pub(crate) projectiles: Vec<Projectile>,
    /// Weak reference into `enemies`
    pub(crate) current_target: Option<EnemyId>,
    /// Seconds until the next cast is allowed
    pub(crate) cast_timer: f32,
    pub(crate) camera: Camera,
    pub(crate) keys: KeyState,
    pub(crate) events: Vec<GameEvent>,
}

impl Arena {
    pub fn new(config: &Config) -> Self {
        let world_size = config.world_size;
        let spawn_pos = world_size / 2.0;
        let player = Player::new(spawn_pos, config);

        let mut camera = Camera::new(
            config.viewport,
            world_size,
            config.camera_zoom,
            config.camera_smoothing,
        );
        camera.set_target(player.pos);

        let mut arena = Self {
            config: config.clone(),
            world_size,
            spawn_pos,
            player,
            enemies: Roster::new(),
            projectiles: Vec::new(),
            current_target: None,
            cast_timer: 0.0,
            camera,
            keys: KeyState::new(),
            events: Vec::new(),
        };
        arena.spawn_enemies();

        log::info!(
            "Arena {}x{} ready with {} enemies",
            world_size.x,
            world_size.y,
            arena.enemies.len()
        );
        arena
    }

    /// Batch-spawn the configured enemies from the fixed placement seed
    fn spawn_enemies(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.config.spawn_seed);
        let margin = self.config.spawn_margin;
        for _ in 0..self.config.enemy_count {
            let x = spawn_coord(&mut rng, margin, self.world_size.x);
            let y = spawn_coord(&mut rng, margin, self.world_size.y);
            self.enemies.spawn(Vec2::new(x, y), &self.config);
        }
    }

    /// Advance one fixed step.
    ///
    /// Events accumulate until [`Arena::drain_events`]; callers driving the
    /// arena directly should drain once per frame. Past
    /// [`MAX_PENDING_EVENTS`] the oldest are dropped.
    pub fn update(&mut self, dt: f32) {
        tick(self, dt);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        let excess = self.events.len().saturating_sub(MAX_PENDING_EVENTS);
        if excess > 0 {
            log::warn!("Event queue not drained; dropping {excess} oldest events");
            self.events.drain(..excess);
        }
    }

    /// Handle an in-world input event; returns true if it was consumed.
    ///
    /// Press/release always feed the held-key state; `+`/`=`/`-` zoom.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.keys.apply(event);
        match *event {
            InputEvent::KeyDown(Key::Equals | Key::Plus) => {
                self.camera.zoom_by(self.config.zoom_step);
                true
            }
            InputEvent::KeyDown(Key::Minus) => {
                self.camera.zoom_by(-self.config.zoom_step);
                true
            }
            _ => false,
        }
    }

    /// Record a key press/release without any other handling
    pub fn set_key(&mut self, key: Key, down: bool) {
        self.keys.set(key, down);
    }

    /// Click-to-target, then cast if the same click is on the current target.
    ///
    /// Acquisition and confirmation read the same point, so a single click on
    /// an untargeted enemy both selects it and (cooldown allowing) casts.
    pub fn handle_world_click(&mut self, screen_pos: Vec2, ability: Option<Ability>) -> ClickOutcome {
        let Some(ability) = ability else {
            return ClickOutcome::Ignored;
        };
        if self.player.dead {
            return ClickOutcome::Ignored;
        }
        let Some(world) = self.camera.screen_to_world(screen_pos) else {
            return ClickOutcome::Ignored;
        };

        if let Some(id) = self.enemy_at(world) {
            if self.current_target != Some(id) {
                self.current_target = Some(id);
                self.events.push(GameEvent::TargetAcquired(id));
            }
        }

        let Some(target) = self.current_target().filter(|t| t.bounding_box().contains_point(world)) else {
            return ClickOutcome::Missed;
        };
        let (target_id, target_pos) = (target.id, target.pos);

        if self.cast_timer > 0.0 {
            return ClickOutcome::Targeted(target_id);
        }

        let spec = self.projectile_spec(ability);
        self.projectiles
            .push(Projectile::new(self.player.pos, target_pos, &spec));
        self.cast_timer = self.config.cast_cooldown;
        self.events.push(GameEvent::SparkCast { target: target_id });
        log::debug!("Cast {} at enemy {:?}", ability.as_str(), target_id);
        ClickOutcome::Cast(target_id)
    }

    fn projectile_spec(&self, ability: Ability) -> ProjectileSpec {
        match ability {
            Ability::Spark => self.config.spark,
        }
    }

    /// First enemy (spawn order) whose box contains the world point
    pub fn enemy_at(&self, world: Vec2) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|e| e.bounding_box().contains_point(world))
            .map(|e| e.id)
    }

    /// Map a screen point into the world through the camera
    pub fn screen_to_world(&self, screen: Vec2) -> Option<Vec2> {
        self.camera.screen_to_world(screen)
    }

    /// Remove an enemy, clearing the target if it pointed there.
    ///
    /// Removing an enemy that is already gone is a no-op.
    pub fn remove_enemy(&mut self, id: EnemyId) -> Option<Enemy> {
        if self.current_target == Some(id) {
            self.current_target = None;
        }
        self.enemies.remove(id)
    }

    /// Spawn one enemy outside the batch placement
    pub fn spawn_enemy(&mut self, pos: Vec2) -> EnemyId {
        self.enemies.spawn(pos, &self.config)
    }

    /// Debug command: drop every enemy
    pub fn kill_all_enemies(&mut self) {
        self.enemies.clear();
        self.current_target = None;
        log::info!("Debug: killed all enemies");
    }

    pub fn set_god_mode(&mut self, on: bool) {
        self.player.set_god_mode(on);
        log::info!("God mode {}", if on { "ON" } else { "OFF" });
    }

    /// Hard reset: player, projectiles, target, cooldown and enemies
    pub fn reset_world(&mut self) {
        self.player.respawn(self.spawn_pos);

        self.projectiles.clear();
        self.current_target = None;
        self.cast_timer = 0.0;

        self.enemies.clear();
        self.spawn_enemies();

        self.camera.reset_tracking();
        self.camera.set_target(self.player.pos);

        self.keys.clear();
        self.events.clear();
        log::info!("World reset ({} enemies)", self.enemies.len());
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn spawn_pos(&self) -> Vec2 {
        self.spawn_pos
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn current_target_id(&self) -> Option<EnemyId> {
        self.current_target
    }

    pub fn current_target(&self) -> Option<&Enemy> {
        self.current_target.and_then(|id| self.enemies.get(id))
    }

    pub fn cast_cooldown_remaining(&self) -> f32 {
        self.cast_timer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Integer coordinate in `[margin, extent - margin]`, or the middle of the
/// extent when the margins overlap
fn spawn_coord(rng: &mut Pcg32, margin: f32, extent: f32) -> f32 {
    let lo = margin.round() as i32;
    let hi = (extent - margin).round() as i32;
    if lo > hi {
        return extent / 2.0;
    }
    rng.random_range(lo..=hi) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    /// Arena with no batch-spawned enemies
    fn empty_arena() -> Arena {
        let config = Config {
            enemy_count: 0,
            ..Config::default()
        };
        Arena::new(&config)
    }

    /// Screen position of a world point
    fn screen_of(arena: &Arena, world: Vec2) -> Vec2 {
        arena.camera().world_to_screen(world)
    }

    #[test]
    fn test_new_spawns_configured_enemies() {
        let arena = Arena::new(&Config::default());
        assert_eq!(arena.enemy_count(), 20);
        assert_eq!(arena.player().pos, Vec2::new(1536.0, 1024.0));
        for e in arena.enemies() {
            assert!(e.pos.x >= 128.0 && e.pos.x <= 3072.0 - 128.0);
            assert!(e.pos.y >= 128.0 && e.pos.y <= 2048.0 - 128.0);
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let a = Arena::new(&Config::default());
        let b = Arena::new(&Config::default());
        let pa: Vec<_> = a.enemies().map(|e| e.pos).collect();
        let pb: Vec<_> = b.enemies().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_click_on_untargeted_enemy_casts_once() {
        let mut arena = empty_arena();
        let enemy_pos = arena.spawn_pos() + Vec2::new(100.0, 0.0);
        let id = arena.spawn_enemy(enemy_pos);
        let click = screen_of(&arena, enemy_pos);

        let outcome = arena.handle_world_click(click, Some(Ability::Spark));
        assert_eq!(outcome, ClickOutcome::Cast(id));
        assert_eq!(arena.current_target_id(), Some(id));
        assert_eq!(arena.projectiles().len(), 1);
        assert_eq!(arena.cast_cooldown_remaining(), arena.config().cast_cooldown);

        let p = &arena.projectiles()[0];
        assert_eq!(p.pos, arena.player().pos);
        assert!((p.dir - Vec2::X).length() < 1e-5, "aimed at the enemy");
    }

    #[test]
    fn test_second_click_inside_cooldown_only_targets() {
        let mut arena = empty_arena();
        let enemy_pos = arena.spawn_pos() + Vec2::new(100.0, 0.0);
        let id = arena.spawn_enemy(enemy_pos);
        let click = screen_of(&arena, enemy_pos);

        arena.handle_world_click(click, Some(Ability::Spark));
        let outcome = arena.handle_world_click(click, Some(Ability::Spark));
        assert_eq!(outcome, ClickOutcome::Targeted(id));
        assert_eq!(arena.projectiles().len(), 1);
    }

    #[test]
    fn test_click_outside_viewport_is_noop() {
        let mut arena = Arena::new(&Config::default());
        let before = arena.enemies().next().map(|e| e.id);
        assert!(before.is_some());
        arena.current_target = before;
        let vp = arena.camera().viewport();
        let outcome =
            arena.handle_world_click(Vec2::new(vp.right() + 10.0, 10.0), Some(Ability::Spark));
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(arena.projectiles().is_empty());
        assert_eq!(arena.current_target_id(), before);
    }

    #[test]
    fn test_click_without_ability_is_noop() {
        let mut arena = empty_arena();
        let enemy_pos = arena.spawn_pos() + Vec2::new(50.0, 50.0);
        arena.spawn_enemy(enemy_pos);
        let click = screen_of(&arena, enemy_pos);
        assert_eq!(arena.handle_world_click(click, None), ClickOutcome::Ignored);
        assert_eq!(arena.current_target_id(), None);
    }

    #[test]
    fn test_click_on_empty_ground_keeps_target_without_casting() {
        let mut arena = empty_arena();
        let enemy_pos = arena.spawn_pos() + Vec2::new(100.0, 0.0);
        let id = arena.spawn_enemy(enemy_pos);
        arena.handle_world_click(screen_of(&arena, enemy_pos), Some(Ability::Spark));
        arena.cast_timer = 0.0;

        let ground = arena.spawn_pos() + Vec2::new(-150.0, 0.0);
        let outcome = arena.handle_world_click(screen_of(&arena, ground), Some(Ability::Spark));
        assert_eq!(outcome, ClickOutcome::Missed);
        assert_eq!(arena.current_target_id(), Some(id));
        assert_eq!(arena.projectiles().len(), 1);
    }

    #[test]
    fn test_dead_player_cannot_cast() {
        let mut arena = empty_arena();
        let enemy_pos = arena.spawn_pos() + Vec2::new(100.0, 0.0);
        arena.spawn_enemy(enemy_pos);
        arena.player.take_damage(1000);
        let outcome = arena.handle_world_click(screen_of(&arena, enemy_pos), Some(Ability::Spark));
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn test_zoom_keys() {
        let mut arena = empty_arena();
        let z = arena.camera().zoom();
        assert!(arena.handle_event(&InputEvent::KeyDown(Key::Equals)));
        assert_eq!(arena.camera().zoom(), z + 0.25);
        assert!(arena.handle_event(&InputEvent::KeyDown(Key::Minus)));
        assert_eq!(arena.camera().zoom(), z);
        assert!(!arena.handle_event(&InputEvent::KeyDown(Key::W)));
        assert!(arena.keys().is_down(Key::W));
    }

    #[test]
    fn test_reset_world_restores_initial_state() {
        let mut arena = Arena::new(&Config::default());
        let original: Vec<_> = arena.enemies().map(|e| e.pos).collect();

        let ids: Vec<_> = arena.enemies().take(3).map(|e| e.id).collect();
        for id in &ids {
            arena.remove_enemy(*id);
        }
        let survivor = arena.enemies().next().map(|e| e.id);
        arena.current_target = survivor;
        let spark = arena.config().spark;
        arena
            .projectiles
            .push(Projectile::new(Vec2::ZERO, Vec2::ONE, &spark));
        arena.cast_timer = 0.05;
        arena.player.take_damage(50);
        arena.player.pos = Vec2::new(10.0, 10.0);
        arena.camera.set_target(arena.player.pos);
        arena.camera.update(1.0);
        assert_ne!(arena.camera().center(), arena.spawn_pos());

        arena.reset_world();

        assert_eq!(arena.enemy_count(), original.len());
        let respawned: Vec<_> = arena.enemies().map(|e| e.pos).collect();
        assert_eq!(respawned, original);
        assert!(arena.projectiles().is_empty());
        assert_eq!(arena.current_target_id(), None);
        assert_eq!(arena.cast_cooldown_remaining(), 0.0);
        assert_eq!(arena.player().hp, arena.player().max_hp);
        assert!(!arena.player().dead);
        assert!(!arena.player().is_invulnerable());
        assert_eq!(arena.player().pos, arena.spawn_pos());
        assert_eq!(arena.camera().center(), arena.spawn_pos());
    }

    #[test]
    fn test_kill_all_clears_target() {
        let mut arena = Arena::new(&Config::default());
        let first = arena.enemies().next().map(|e| e.id);
        assert!(first.is_some());
        arena.current_target = first;
        arena.kill_all_enemies();
        assert_eq!(arena.enemy_count(), 0);
        assert_eq!(arena.current_target_id(), None);
    }

    #[test]
    fn test_remove_enemy_clears_target() {
        let mut arena = empty_arena();
        let id = arena.spawn_enemy(Vec2::new(100.0, 100.0));
        arena.current_target = Some(id);
        assert!(arena.remove_enemy(id).is_some());
        assert_eq!(arena.current_target_id(), None);
        assert!(arena.remove_enemy(id).is_none());
    }

    #[test]
    fn test_god_mode_heals_player() {
        let mut arena = empty_arena();
        arena.player.take_damage(30);
        arena.set_god_mode(true);
        assert_eq!(arena.player().hp, arena.player().max_hp);
        arena.update(SIM_DT);
        assert!(arena.player().god_mode);
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut arena = empty_arena();
        let id = arena.spawn_enemy(Vec2::new(100.0, 100.0));
        arena
            .events
            .extend(std::iter::repeat_n(GameEvent::TargetAcquired(id), MAX_PENDING_EVENTS));
        arena.events.push(GameEvent::EnemyKilled(id));
        arena.update(SIM_DT);

        let events = arena.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.last(), Some(&GameEvent::EnemyKilled(id)));
    }

    #[test]
    fn test_ability_names() {
        assert_eq!(Ability::Spark.as_str(), "spark");
    }
}
