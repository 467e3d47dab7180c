//! Grid game host

use glam::Vec2;

use super::{Arcade, Listeners};
use crate::GameKind;
use crate::platform::KeyState;
use crate::platform::input::{Action, SNAKE_BINDINGS};
use crate::render::{self, Painter};
use crate::sim::snake::{self, Direction, SnakeEvent, SnakeState};
use crate::tuning::SnakeTuning;

pub struct SnakeGame {
    state: SnakeState,
    keys: KeyState,
    listeners: Listeners<SnakeEvent>,
    active: bool,
}

impl SnakeGame {
    pub fn new(tuning: SnakeTuning, width: f32, height: f32, seed: u64) -> Self {
        Self {
            state: SnakeState::new(tuning, width, height, seed),
            keys: KeyState::new(),
            listeners: Listeners::default(),
            active: true,
        }
    }

    /// Score, speed and game-over notifications
    pub fn on_event(&mut self, listener: impl FnMut(&SnakeEvent) + 'static) {
        self.listeners.add(listener);
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    fn flush(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            log::debug!("Snake event: {:?}", event);
        }
        self.listeners.dispatch(&events);
    }
}

fn direction_for(action: Action) -> Option<Direction> {
    match action {
        Action::MoveUp => Some(Direction::Up),
        Action::MoveDown => Some(Direction::Down),
        Action::MoveLeft => Some(Direction::Left),
        Action::MoveRight => Some(Direction::Right),
        _ => None,
    }
}

impl Arcade for SnakeGame {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn size(&self) -> Vec2 {
        self.state.size
    }

    fn start(&mut self) {
        self.active = true;
        self.state.start();
        log::info!("Snake started");
        self.flush();
    }

    fn stop(&mut self) {
        self.active = false;
        self.state.pause();
        self.keys.clear();
        log::info!("Snake stopped");
    }

    fn pause(&mut self) {
        self.state.pause();
    }

    fn resume(&mut self) {
        self.state.resume();
    }

    fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    fn restart(&mut self) {
        self.state.reset();
        self.state.start();
        self.flush();
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    fn update(&mut self, timestamp_ms: f64) {
        if !self.active {
            return;
        }
        snake::tick(&mut self.state, timestamp_ms);
        self.flush();
    }

    fn render(&self, painter: &mut dyn Painter) {
        render::snake::draw(&self.state, painter);
    }

    fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = SNAKE_BINDINGS.action(key) else {
            return false;
        };
        let pressed = self.keys.press(key);
        if let Some(dir) = direction_for(action) {
            self.state.set_direction(dir);
        } else if pressed {
            match action {
                Action::Pause => self.toggle_pause(),
                Action::Start => self.start(),
                _ => {}
            }
        }
        true
    }

    fn key_up(&mut self, key: &str) {
        self.keys.release(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game() -> (SnakeGame, Rc<RefCell<Vec<SnakeEvent>>>) {
        let mut game = SnakeGame::new(SnakeTuning::default(), 200.0, 200.0, 8);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.on_event(move |e| sink.borrow_mut().push(*e));
        (game, seen)
    }

    #[test]
    fn test_enter_starts_and_first_update_reports_reset() {
        let (mut game, seen) = game();
        assert!(game.key_down("Enter"));
        assert!(game.state().is_running());
        assert_eq!(
            *seen.borrow(),
            vec![SnakeEvent::ScoreChanged(0), SnakeEvent::SpeedChanged(5)]
        );
    }

    #[test]
    fn test_arrow_turns_snake() {
        let (mut game, _) = game();
        game.state.food = IVec2::new(0, 0);
        game.start();
        game.key_down("ArrowUp");
        game.update(0.0);
        game.update(200.0);
        assert_eq!(game.state().head(), IVec2::new(5, 4));
        // Reversal ignored
        game.key_down("s");
        game.update(400.0);
        assert_eq!(game.state().head(), IVec2::new(5, 3));
    }

    #[test]
    fn test_game_over_reaches_listener() {
        let (mut game, seen) = game();
        game.state.food = IVec2::new(0, 0);
        game.start();
        game.update(0.0);
        // Four moves right from (5,5) reach the last column, the fifth hits the wall
        for i in 1..=5 {
            game.update(i as f64 * 200.0);
        }
        assert!(game.state().is_game_over());
        assert_eq!(seen.borrow().last(), Some(&SnakeEvent::GameOver { score: 0 }));

        // Restart from game over
        game.key_up("Enter");
        game.key_down("Enter");
        assert!(game.state().is_running());
        assert_eq!(game.state().head(), IVec2::new(5, 5));
    }

    #[test]
    fn test_space_pauses() {
        let (mut game, _) = game();
        game.start();
        game.key_down(" ");
        assert!(!game.state().is_running());
        game.key_up(" ");
        game.key_down(" ");
        assert!(game.state().is_running());
    }

    #[test]
    fn test_stop_freezes_moves() {
        let (mut game, _) = game();
        game.state.food = IVec2::new(0, 0);
        game.start();
        game.update(0.0);
        game.stop();
        game.update(1000.0);
        assert_eq!(game.state().head(), IVec2::new(5, 5));
    }
}
