//! Session: the per-frame driver around the arena
//!
//! Owns the fixed-step clock, overlay state (pause, debug menu, game over,
//! win) and the selected ability. Raw input becomes [`Command`] values which
//! are then dispatched; nothing in the simulation holds UI callbacks.

use glam::Vec2;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::input::{InputEvent, Key, MouseButton};
use crate::renderer::{self, DrawTarget};
use crate::sim::{Ability, Arena, ClickOutcome, Debounce, FixedStepClock, GameEvent};

/// Image keys the asset layer must provide before a session can start
pub const REQUIRED_IMAGES: [&str; 3] = ["btn_spell", "spark", "player_walk"];

/// The external asset layer, as seen by the core
pub trait AssetSource {
    fn has_image(&self, key: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing asset keys: {}", .0.join(", "))]
    MissingAssets(Vec<String>),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything input handling can ask the session to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    ToggleDebug,
    ToggleGodMode,
    KillAllEnemies,
    SelectAbility(Ability),
    /// Left click at a screen position inside the world viewport
    WorldClick(Vec2),
    Restart,
    Quit,
}

pub struct Session {
    config: Config,
    arena: Arena,
    clock: FixedStepClock,
    menu_toggle: Debounce,
    running: bool,
    paused: bool,
    debug_open: bool,
    game_over: bool,
    win: bool,
    selected_ability: Option<Ability>,
    /// Last status line shown to the player
    message: String,
}

impl Session {
    /// Validate the config and required assets, then build the world
    pub fn new(config: Config, assets: &impl AssetSource) -> Result<Self, SessionError> {
        config.validate()?;

        let missing: Vec<String> = REQUIRED_IMAGES
            .iter()
            .filter(|key| !assets.has_image(key))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            log::error!("Missing asset keys: {missing:?}");
            return Err(SessionError::MissingAssets(missing));
        }

        let arena = Arena::new(&config);
        let clock = FixedStepClock::new(config.fixed_dt, config.max_frame_time);
        let menu_toggle = Debounce::new(config.menu_toggle_cooldown);
        log::info!("Session started");

        Ok(Self {
            config,
            arena,
            clock,
            menu_toggle,
            running: true,
            paused: false,
            debug_open: false,
            game_over: false,
            win: false,
            selected_ability: None,
            message: String::new(),
        })
    }

    /// Translate a raw event into commands.
    ///
    /// Key presses/releases always update the held-key state so movement is
    /// correct when an overlay closes. During normal play key events are
    /// forwarded to the arena, which owns zoom.
    pub fn handle_event(&mut self, event: &InputEvent) -> Vec<Command> {
        match *event {
            InputEvent::Quit => vec![Command::Quit],
            InputEvent::KeyUp(_) => {
                self.arena.handle_event(event);
                Vec::new()
            }
            InputEvent::KeyDown(key) => {
                let commands = self.key_commands(key);
                if self.overlay_active() {
                    self.arena.set_key(key, true);
                } else {
                    // World keys (movement, zoom) belong to the arena
                    self.arena.handle_event(event);
                }
                commands
            }
            InputEvent::MouseDown { button, pos } => {
                if button != MouseButton::Left || self.overlay_active() {
                    return Vec::new();
                }
                if self.config.viewport.contains_point(pos) {
                    vec![Command::WorldClick(pos)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn key_commands(&self, key: Key) -> Vec<Command> {
        let ended = self.game_over || self.win;

        if key == Key::Backquote && !ended {
            return if self.menu_toggle.ready() {
                vec![Command::ToggleDebug]
            } else {
                Vec::new()
            };
        }
        if key == Key::Escape && !ended && !self.debug_open {
            return vec![Command::TogglePause];
        }
        if self.game_over {
            return match key {
                Key::Escape => vec![Command::Quit],
                _ => Vec::new(),
            };
        }
        if self.win {
            return match key {
                Key::Enter | Key::Space => vec![Command::Restart],
                Key::Escape => vec![Command::Quit],
                _ => Vec::new(),
            };
        }
        if self.paused {
            return Vec::new();
        }
        if self.debug_open {
            return match key {
                Key::G => vec![Command::ToggleGodMode],
                Key::K => vec![Command::KillAllEnemies],
                _ => Vec::new(),
            };
        }
        match key {
            Key::Digit1 => vec![Command::SelectAbility(Ability::Spark)],
            _ => Vec::new(),
        }
    }

    /// Apply one command
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                self.paused = !self.paused;
                self.log(if self.paused { "Paused" } else { "Resumed" });
            }
            Command::ToggleDebug => {
                self.debug_open = !self.debug_open;
                self.menu_toggle.arm();
                let state = if self.debug_open { "OPEN" } else { "CLOSED" };
                self.log(&format!("Debug menu {state}"));
            }
            Command::ToggleGodMode => {
                let on = !self.arena.player().god_mode;
                self.arena.set_god_mode(on);
                self.log(&format!("God Mode {}", if on { "ON" } else { "OFF" }));
            }
            Command::KillAllEnemies => {
                self.arena.kill_all_enemies();
                self.log("Debug: Killed all enemies");
            }
            Command::SelectAbility(ability) => {
                self.selected_ability = Some(ability);
                self.log(&format!("Selected {}", ability.as_str()));
            }
            Command::WorldClick(pos) => {
                let outcome = self.arena.handle_world_click(pos, self.selected_ability);
                if outcome == ClickOutcome::Ignored {
                    log::trace!("World click at {pos} ignored");
                }
            }
            Command::Restart => self.restart(),
            Command::Quit => {
                self.running = false;
                log::info!("Quit requested");
            }
        }
    }

    /// Convenience: translate and dispatch in one go
    pub fn process_event(&mut self, event: &InputEvent) {
        for command in self.handle_event(event) {
            self.dispatch(command);
        }
    }

    /// Run one displayed frame's worth of simulation; returns steps executed
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, self.config.max_frame_time);
        self.menu_toggle.tick(frame_dt);

        let running = !self.overlay_active();
        let arena = &mut self.arena;
        let steps = self.clock.advance(frame_dt, running, |dt| arena.update(dt));

        for event in self.arena.drain_events() {
            self.on_game_event(event);
        }

        if self.arena.player().dead && !self.game_over {
            self.game_over = true;
            self.log("Game over");
        }
        if !self.win && self.arena.enemy_count() == 0 {
            self.win = true;
            self.log("All enemies defeated");
        }
        steps
    }

    fn on_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::SparkCast { .. } => self.log("Cast Spark"),
            GameEvent::EnemyKilled(id) => log::debug!("Enemy {id:?} killed"),
            GameEvent::PlayerHit { hp, .. } => log::debug!("Player hit, {hp} hp left"),
            GameEvent::PlayerDied => log::info!("Player died"),
            GameEvent::TargetAcquired(id) => log::debug!("Targeting enemy {id:?}"),
            GameEvent::EntityFault => log::warn!("Entity fault contained this frame"),
        }
    }

    /// Render pass; read-only with respect to the world
    pub fn draw(&self, target: &mut impl DrawTarget) {
        renderer::draw(&self.arena, target);
    }

    fn restart(&mut self) {
        self.arena.reset_world();
        self.selected_ability = None;
        self.game_over = false;
        self.win = false;
        self.paused = false;
        self.debug_open = false;
        self.message.clear();
        log::info!("Session restarted");
    }

    /// Emit a status message to the log collaborator
    fn log(&mut self, text: &str) {
        log::info!("{text}");
        self.message = text.to_string();
    }

    /// Any overlay that suspends the simulation
    pub fn overlay_active(&self) -> bool {
        self.paused || self.debug_open || self.game_over || self.win
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_debug_open(&self) -> bool {
        self.debug_open
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_win(&self) -> bool {
        self.win
    }

    pub fn selected_ability(&self) -> Option<Ability> {
        self.selected_ability
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn total_steps(&self) -> u64 {
        self.clock.total_steps()
    }
}
