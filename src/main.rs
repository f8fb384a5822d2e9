//! Floral Foundations headless demo
//!
//! Runs a session with a scripted input timeline and logs the outcome.
//! Usage: `floral-foundations [config.json]`

use std::error::Error;

use glam::Vec2;

use floral_foundations::input::{InputEvent, Key, MouseButton};
use floral_foundations::renderer::{DrawTarget, Vertex};
use floral_foundations::session::REQUIRED_IMAGES;
use floral_foundations::sim::Rect;
use floral_foundations::{AssetSource, Config, Session};

/// Frame rate of the simulated display
const FRAME_DT: f32 = 1.0 / 60.0;
/// Demo length in displayed frames
const DEMO_FRAMES: u32 = 60 * 30;

/// Asset layer stand-in that reports every required image as loaded
struct BuiltinAssets;

impl AssetSource for BuiltinAssets {
    fn has_image(&self, key: &str) -> bool {
        REQUIRED_IMAGES.contains(&key)
    }
}

/// Surface that only tallies what would have been drawn
#[derive(Default)]
struct FrameStats {
    frames: u64,
    vertices: u64,
    bytes: u64,
}

impl DrawTarget for FrameStats {
    fn submit(&mut self, _viewport: Rect, vertices: &[Vertex]) {
        self.frames += 1;
        self.vertices += vertices.len() as u64;
        self.bytes += Vertex::as_bytes(vertices).len() as u64;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Floral Foundations (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let mut session = Session::new(config, &BuiltinAssets)?;
    let mut stats = FrameStats::default();

    session.process_event(&InputEvent::KeyDown(Key::Digit1));
    session.process_event(&InputEvent::KeyUp(Key::Digit1));

    let mut held: Option<Key> = None;
    for _ in 0..DEMO_FRAMES {
        if !session.is_running() || session.is_game_over() || session.is_win() {
            break;
        }

        if let Some(enemy_pos) = nearest_enemy(&session) {
            steer(&mut session, &mut held, enemy_pos);
            let click = session.arena().camera().world_to_screen(enemy_pos);
            session.process_event(&InputEvent::MouseDown {
                button: MouseButton::Left,
                pos: click,
            });
        }

        session.frame(FRAME_DT);
        session.draw(&mut stats);
    }

    let arena = session.arena();
    log::info!(
        "Demo finished after {} steps: {} enemies left, player hp {}/{}, game over: {}, win: {}",
        session.total_steps(),
        arena.enemy_count(),
        arena.player().hp,
        arena.player().max_hp,
        session.is_game_over(),
        session.is_win(),
    );
    log::info!(
        "Rendered {} frames ({} vertices, {} bytes)",
        stats.frames,
        stats.vertices,
        stats.bytes
    );
    Ok(())
}

fn nearest_enemy(session: &Session) -> Option<Vec2> {
    let player = session.arena().player().pos;
    session
        .arena()
        .enemies()
        .map(|e| e.pos)
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
}

/// Hold the cardinal key that points most directly at `goal`
fn steer(session: &mut Session, held: &mut Option<Key>, goal: Vec2) {
    let delta = goal - session.arena().player().pos;
    let wanted = if delta.length() < 200.0 {
        None
    } else if delta.x.abs() > delta.y.abs() {
        Some(if delta.x > 0.0 { Key::D } else { Key::A })
    } else {
        Some(if delta.y > 0.0 { Key::S } else { Key::W })
    };

    if wanted == *held {
        return;
    }
    if let Some(key) = held.take() {
        session.process_event(&InputEvent::KeyUp(key));
    }
    if let Some(key) = wanted {
        session.process_event(&InputEvent::KeyDown(key));
    }
    *held = wanted;
}
