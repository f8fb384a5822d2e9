//! The live enemy collection
//!
//! One owned collection with id-based lookup and removal. Iteration order is
//! spawn order, which keeps projectile hit resolution deterministic.

use glam::Vec2;

use super::enemy::{Enemy, EnemyId};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Roster {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn a fresh enemy at `pos`, returning its id
    pub fn spawn(&mut self, pos: Vec2, config: &Config) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::new(id, pos, config));
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.get(id).is_some()
    }

    /// Remove by id; removing an absent enemy is a no-op
    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(idx))
    }

    /// Remove every enemy. Ids keep counting so stale ids never alias.
    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let config = Config::default();
        let mut roster = Roster::new();
        let a = roster.spawn(Vec2::ZERO, &config);
        let b = roster.spawn(Vec2::ONE, &config);
        assert!(b > a);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(b).map(|e| e.pos), Some(Vec2::ONE));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let config = Config::default();
        let mut roster = Roster::new();
        let a = roster.spawn(Vec2::ZERO, &config);
        assert!(roster.remove(a).is_some());
        assert!(roster.remove(a).is_none());
        assert!(!roster.contains(a));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let config = Config::default();
        let mut roster = Roster::new();
        let a = roster.spawn(Vec2::ZERO, &config);
        roster.clear();
        let b = roster.spawn(Vec2::ZERO, &config);
        assert_ne!(a, b);
        assert!(!roster.contains(a));
    }
}
