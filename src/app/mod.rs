//! Host-facing games
//!
//! Each game wraps its simulation state with the frame clock, the held-key
//! set and typed listeners. Listeners run synchronously, inside the call
//! (`update`, `key_down`, lifecycle) that raised the event.

pub mod pong;
pub mod shooter;
pub mod snake;

pub use pong::PongGame;
pub use shooter::ShooterGame;
pub use snake::SnakeGame;

use glam::Vec2;

use crate::GameKind;
use crate::persistence::KeyValueStore;
use crate::render::Painter;
use crate::tuning::Tuning;

/// Lifecycle shared by the three games
pub trait Arcade {
    fn kind(&self) -> GameKind;
    /// Logical surface size
    fn size(&self) -> Vec2;

    fn start(&mut self);
    /// Halt simulation until the next `start`
    fn stop(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn toggle_pause(&mut self);
    fn restart(&mut self);
    fn resize(&mut self, width: f32, height: f32);

    /// Advance to the animation-frame timestamp `timestamp_ms`
    fn update(&mut self, timestamp_ms: f64);
    fn render(&self, painter: &mut dyn Painter);

    /// Returns true if the key is bound, so the host can suppress the
    /// browser default
    fn key_down(&mut self, key: &str) -> bool;
    fn key_up(&mut self, key: &str);
}

/// Registered callbacks for one event type
pub struct Listeners<E> {
    handlers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> Listeners<E> {
    pub fn add(&mut self, handler: impl FnMut(&E) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Deliver events in order, each to every handler
    pub fn dispatch(&mut self, events: &[E]) {
        for event in events {
            for handler in &mut self.handlers {
                handler(event);
            }
        }
    }
}

/// Build a game of the given kind at its surface size
pub fn create(
    kind: GameKind,
    tuning: &Tuning,
    width: f32,
    height: f32,
    seed: u64,
    store: Box<dyn KeyValueStore>,
) -> Box<dyn Arcade> {
    log::info!("Creating {} ({}x{})", kind.as_str(), width, height);
    match kind {
        GameKind::Pong => Box::new(PongGame::new(tuning.pong.clone(), width, height, seed)),
        GameKind::Snake => Box::new(SnakeGame::new(tuning.snake.clone(), width, height, seed)),
        GameKind::Shooter => Box::new(ShooterGame::new(tuning.shooter.clone(), width, height, store)),
    }
}
