//! Fixed timestep simulation tick
//!
//! Advances the arena by one step in a fixed order: cast cooldown, player,
//! enemies, projectiles (with hit resolution), target validation, camera.

use super::arena::{Arena, GameEvent};
use super::enemy::EnemyId;
use super::geometry::Bounded;
use crate::input::MoveInput;
use crate::{clamp_center, countdown};

/// Advance the arena by one fixed timestep
pub fn tick(arena: &mut Arena, dt: f32) {
    arena.cast_timer = countdown(arena.cast_timer, dt);

    update_player(arena, dt);
    update_enemies(arena, dt);
    update_projectiles(arena, dt);

    // Target may have been removed by some other path this tick
    if let Some(id) = arena.current_target {
        if !arena.enemies.contains(id) {
            arena.current_target = None;
        }
    }

    // Camera last so it follows the clamped player position
    arena.camera.set_target(arena.player.pos);
    arena.camera.update(dt);
}

fn update_player(arena: &mut Arena, dt: f32) {
    let input = MoveInput::from_keys(&arena.keys);
    let previous = arena.player.pos;
    arena.player.update(&input, dt);

    if !arena.player.is_finite() {
        log::warn!("Player position became non-finite; restoring {previous}");
        arena.player.pos = previous;
        arena.events.push(GameEvent::EntityFault);
    }

    // Keep the whole sprite inside the world
    let half = arena.player.half_extents();
    let pos = &mut arena.player.pos;
    pos.x = clamp_center(pos.x, half.x, arena.world_size.x);
    pos.y = clamp_center(pos.y, half.y, arena.world_size.y);
}

fn update_enemies(arena: &mut Arena, dt: f32) {
    let mut faulty: Vec<EnemyId> = Vec::new();
    {
        let Arena {
            enemies,
            player,
            events,
            ..
        } = arena;

        for enemy in enemies.iter_mut() {
            let was_dead = player.dead;
            if enemy.update(player, dt) {
                events.push(GameEvent::PlayerHit {
                    by: enemy.id,
                    hp: player.hp,
                });
                if player.dead && !was_dead {
                    log::info!("Player killed by enemy {:?}", enemy.id);
                    events.push(GameEvent::PlayerDied);
                }
            }
            if !enemy.is_finite() {
                faulty.push(enemy.id);
            }
        }
    }

    // Contain the fault to the entity that produced it
    for id in faulty {
        log::warn!("Dropping enemy {id:?} with non-finite state");
        arena.remove_enemy(id);
        arena.events.push(GameEvent::EntityFault);
    }
}

fn update_projectiles(arena: &mut Arena, dt: f32) {
    let mut projectiles = std::mem::take(&mut arena.projectiles);

    projectiles.retain_mut(|projectile| {
        projectile.update(dt);
        if !projectile.is_finite() {
            log::warn!("Dropping projectile with non-finite state");
            arena.events.push(GameEvent::EntityFault);
            return false;
        }

        // First overlapping enemy in roster order takes the hit
        let bbox = projectile.bounding_box();
        let hit = arena
            .enemies
            .iter()
            .find(|e| e.bounding_box().intersects(&bbox))
            .map(|e| e.id);

        if let Some(id) = hit {
            let lethal = arena
                .enemies
                .get_mut(id)
                .is_some_and(|e| e.damage(projectile.damage));
            if lethal && arena.remove_enemy(id).is_some() {
                log::debug!("Enemy {id:?} destroyed");
                arena.events.push(GameEvent::EnemyKilled(id));
            }
            return false;
        }

        projectile.alive()
    });

    // Anything spawned mid-tick lands after the survivors
    projectiles.append(&mut arena.projectiles);
    arena.projectiles = projectiles;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::Config;
    use crate::consts::SIM_DT;
    use crate::input::Key;
    use crate::sim::arena::{Ability, ClickOutcome};
    use crate::sim::projectile::Projectile;

    fn empty_arena() -> Arena {
        let config = Config {
            enemy_count: 0,
            ..Config::default()
        };
        Arena::new(&config)
    }

    #[test]
    fn test_enemy_in_detect_radius_closes_distance() {
        let mut arena = empty_arena();
        let center = arena.world_size() / 2.0;
        assert_eq!(arena.player().pos, center);

        let id = arena.spawn_enemy(center + Vec2::new(300.0, 200.0));
        let before = arena.enemy(id).unwrap().pos.distance(arena.player().pos);
        arena.update(SIM_DT);
        let after = arena.enemy(id).unwrap().pos.distance(arena.player().pos);
        assert!(after < before);
    }

    #[test]
    fn test_player_moves_and_is_clamped() {
        let mut arena = empty_arena();
        arena.set_key(Key::D, true);
        let start = arena.player().pos;
        arena.update(SIM_DT);
        assert!(arena.player().pos.x > start.x);

        // Run into the left wall for a long time
        arena.set_key(Key::D, false);
        arena.set_key(Key::A, true);
        for _ in 0..(120 * 12) {
            arena.update(SIM_DT);
        }
        assert_eq!(arena.player().pos.x, arena.player().half_extents().x);
    }

    #[test]
    fn test_cast_cooldown_decays() {
        let mut arena = empty_arena();
        arena.cast_timer = 0.1;
        for _ in 0..13 {
            arena.update(SIM_DT);
        }
        assert_eq!(arena.cast_cooldown_remaining(), 0.0);
    }

    #[test]
    fn test_lethal_hit_removes_enemy_and_clears_target() {
        let mut arena = empty_arena();
        let pos = arena.player().pos + Vec2::new(200.0, 0.0);
        let id = arena.spawn_enemy(pos);
        arena.enemies.get_mut(id).unwrap().hp = 28;
        arena.enemies.get_mut(id).unwrap().speed = 0.0;
        arena.current_target = Some(id);

        let spark = arena.config().spark;
        arena
            .projectiles
            .push(Projectile::new(pos - Vec2::new(10.0, 0.0), pos, &spark));
        arena.update(SIM_DT);

        assert!(arena.enemy(id).is_none());
        assert_eq!(arena.enemy_count(), 0);
        assert_eq!(arena.current_target_id(), None);
        assert!(arena.projectiles().is_empty());
        assert!(arena.drain_events().contains(&GameEvent::EnemyKilled(id)));
    }

    #[test]
    fn test_non_lethal_hit_consumes_projectile() {
        let mut arena = empty_arena();
        let pos = arena.player().pos + Vec2::new(200.0, 0.0);
        let id = arena.spawn_enemy(pos);
        arena.enemies.get_mut(id).unwrap().speed = 0.0;

        let spark = arena.config().spark;
        arena
            .projectiles
            .push(Projectile::new(pos - Vec2::new(10.0, 0.0), pos, &spark));
        arena.update(SIM_DT);

        assert_eq!(arena.enemy(id).map(|e| e.hp), Some(72));
        assert!(arena.projectiles().is_empty());
    }

    #[test]
    fn test_projectile_hits_only_first_enemy() {
        let mut arena = empty_arena();
        let pos = arena.player().pos + Vec2::new(200.0, 0.0);
        let first = arena.spawn_enemy(pos);
        let second = arena.spawn_enemy(pos);
        for id in [first, second] {
            arena.enemies.get_mut(id).unwrap().speed = 0.0;
        }

        let spark = arena.config().spark;
        arena
            .projectiles
            .push(Projectile::new(pos - Vec2::new(10.0, 0.0), pos, &spark));
        arena.update(SIM_DT);

        assert_eq!(arena.enemy(first).map(|e| e.hp), Some(72));
        assert_eq!(arena.enemy(second).map(|e| e.hp), Some(100));
    }

    #[test]
    fn test_projectile_expires_after_range() {
        let mut arena = empty_arena();
        let spark = arena.config().spark;
        let start = arena.player().pos;
        arena
            .projectiles
            .push(Projectile::new(start, start + Vec2::new(0.0, -1.0), &spark));
        // 1400px at 800px/s is 1.75s
        for _ in 0..200 {
            arena.update(SIM_DT);
        }
        assert_eq!(arena.projectiles().len(), 1);
        for _ in 0..20 {
            arena.update(SIM_DT);
        }
        assert!(arena.projectiles().is_empty());
    }

    #[test]
    fn test_spark_kills_enemy_end_to_end() {
        let mut arena = empty_arena();
        let pos = arena.player().pos + Vec2::new(150.0, 0.0);
        let id = arena.spawn_enemy(pos);
        arena.enemies.get_mut(id).unwrap().speed = 0.0;

        let mut casts = 0;
        for _ in 0..600 {
            if arena.enemy(id).is_none() {
                break;
            }
            // One spark in flight at a time
            if arena.projectiles().is_empty() {
                let click = arena.camera().world_to_screen(pos);
                if let ClickOutcome::Cast(_) = arena.handle_world_click(click, Some(Ability::Spark)) {
                    casts += 1;
                }
            }
            arena.update(SIM_DT);
        }
        assert!(arena.enemy(id).is_none());
        assert_eq!(casts, 4, "100 hp at 28 per spark");
        assert_eq!(arena.current_target_id(), None);
    }

    #[test]
    fn test_player_death_emits_event_once() {
        let mut arena = empty_arena();
        arena.player.hp = 12;
        let pos = arena.player().pos + Vec2::new(10.0, 0.0);
        arena.spawn_enemy(pos);
        arena.spawn_enemy(pos);
        arena.update(SIM_DT);

        assert!(arena.player().dead);
        let deaths = arena
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::PlayerDied)
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_faulty_enemy_is_contained() {
        let mut arena = empty_arena();
        let bad = arena.spawn_enemy(arena.player().pos - Vec2::new(300.0, 0.0));
        let good = arena.spawn_enemy(arena.player().pos + Vec2::new(300.0, 0.0));
        arena.enemies.get_mut(bad).unwrap().speed = f32::NAN;
        arena.current_target = Some(bad);

        arena.update(SIM_DT);

        assert!(arena.enemy(bad).is_none());
        assert!(arena.enemy(good).is_some());
        assert_eq!(arena.current_target_id(), None);
        assert!(arena.drain_events().contains(&GameEvent::EntityFault));
    }
}
