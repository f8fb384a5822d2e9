//! Input events and held-key state
//!
//! The platform layer translates its native events into [`InputEvent`]s.
//! Movement reads the continuous [`KeyState`] rather than discrete events.

use std::collections::HashSet;

use glam::{IVec2, Vec2};

/// Logical keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    /// Up-left modifier (only with up held)
    Q,
    /// Up-right modifier (only with up held)
    E,
    LeftShift,
    RightShift,
    Equals,
    Plus,
    Minus,
    Escape,
    Backquote,
    Enter,
    Space,
    G,
    K,
    Digit1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Discrete input event from the platform layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer press at a screen-space position
    MouseDown { button: MouseButton, pos: Vec2 },
    /// Window close request
    Quit,
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.is_down(*k))
    }

    /// Release everything (focus loss, world reset)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Apply a press/release event; other events are ignored
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => self.press(key),
            InputEvent::KeyUp(key) => self.release(key),
            _ => {}
        }
    }
}

/// Movement intent sampled from the held keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Diagonal modifier producing up-left
    pub diag_left: bool,
    /// Diagonal modifier producing up-right
    pub diag_right: bool,
    pub run: bool,
}

impl MoveInput {
    /// Arrows and WASD are interchangeable; Q/E are the diagonal modifiers
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            up: keys.any_down(&[Key::Up, Key::W]),
            down: keys.any_down(&[Key::Down, Key::S]),
            left: keys.any_down(&[Key::Left, Key::A]),
            right: keys.any_down(&[Key::Right, Key::D]),
            diag_left: keys.is_down(Key::Q),
            diag_right: keys.is_down(Key::E),
            run: keys.any_down(&[Key::LeftShift, Key::RightShift]),
        }
    }

    /// Resolve to a per-axis direction in `{-1, 0, 1}` (screen y grows down).
    ///
    /// The diagonal modifiers only apply while up is held alone: with a
    /// horizontal cardinal held (or down cancelling up) they do nothing.
    /// Up-right wins when both modifiers are held.
    pub fn axis(&self) -> IVec2 {
        let mut x = i32::from(self.right) - i32::from(self.left);
        let y = i32::from(self.down) - i32::from(self.up);

        if self.up && !self.left && !self.right && x == 0 && y == -1 {
            if self.diag_right {
                x = 1;
            } else if self.diag_left {
                x = -1;
            }
        }

        IVec2::new(x.signum(), y.signum())
    }
}
