//! Paddle game host

use glam::Vec2;

use super::{Arcade, Listeners};
use crate::GameKind;
use crate::consts::PONG_MAX_DT;
use crate::platform::input::{Action, PONG_BINDINGS};
use crate::platform::{FrameClock, KeyState};
use crate::render::{self, Painter};
use crate::sim::pong::{self, PongEvent, PongInput, PongState};
use crate::tuning::PongTuning;

pub struct PongGame {
    state: PongState,
    clock: FrameClock,
    keys: KeyState,
    listeners: Listeners<PongEvent>,
    active: bool,
}

impl PongGame {
    pub fn new(tuning: PongTuning, width: f32, height: f32, seed: u64) -> Self {
        Self {
            state: PongState::new(tuning, width, height, seed),
            clock: FrameClock::new(PONG_MAX_DT),
            keys: KeyState::new(),
            listeners: Listeners::default(),
            active: false,
        }
    }

    /// Score notifications `(left, right, paused)`
    pub fn on_event(&mut self, listener: impl FnMut(&PongEvent) + 'static) {
        self.listeners.add(listener);
    }

    pub fn state(&self) -> &PongState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn input(&self) -> PongInput {
        PongInput {
            up: PONG_BINDINGS.held(&self.keys, Action::MoveUp),
            down: PONG_BINDINGS.held(&self.keys, Action::MoveDown),
        }
    }

    fn flush(&mut self) {
        let events = self.state.drain_events();
        for event in &events {
            log::debug!("Pong event: {:?}", event);
        }
        self.listeners.dispatch(&events);
    }
}

impl Arcade for PongGame {
    fn kind(&self) -> GameKind {
        GameKind::Pong
    }

    fn size(&self) -> Vec2 {
        self.state.size
    }

    fn start(&mut self) {
        self.active = true;
        self.clock.reset();
        log::info!("Pong started");
        self.flush();
    }

    fn stop(&mut self) {
        self.active = false;
        self.keys.clear();
        self.clock.reset();
        log::info!("Pong stopped");
    }

    fn pause(&mut self) {
        self.state.set_paused(true);
        self.flush();
    }

    fn resume(&mut self) {
        self.state.set_paused(false);
        self.flush();
    }

    fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        self.flush();
    }

    fn restart(&mut self) {
        self.state.reset();
        self.flush();
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    fn update(&mut self, timestamp_ms: f64) {
        if !self.active {
            return;
        }
        let dt = self.clock.advance(timestamp_ms);
        let input = self.input();
        pong::tick(&mut self.state, &input, dt);
        self.flush();
    }

    fn render(&self, painter: &mut dyn Painter) {
        render::pong::draw(&self.state, painter);
    }

    fn key_down(&mut self, key: &str) -> bool {
        let Some(action) = PONG_BINDINGS.action(key) else {
            return false;
        };
        if self.keys.press(key) {
            match action {
                Action::Pause => self.toggle_pause(),
                Action::Reset => self.restart(),
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
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game() -> PongGame {
        let mut game = PongGame::new(PongTuning::default(), 800.0, 480.0, 5);
        game.start();
        game
    }

    fn recorder(game: &mut PongGame) -> Rc<RefCell<Vec<PongEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        game.on_event(move |e| sink.borrow_mut().push(*e));
        seen
    }

    #[test]
    fn test_held_key_moves_paddle() {
        let mut game = game();
        let start_y = game.state().left.y;
        assert!(game.key_down("w"));
        game.update(0.0);
        game.update(16.0);
        game.update(32.0);
        assert!(game.state().left.y < start_y);

        game.key_up("w");
        let y = game.state().left.y;
        game.update(48.0);
        assert_eq!(game.state().left.y, y);
    }

    #[test]
    fn test_unbound_key_is_not_claimed() {
        let mut game = game();
        assert!(!game.key_down("q"));
        assert!(game.key_down("ArrowDown"));
    }

    #[test]
    fn test_space_toggles_pause_once_per_press() {
        let mut game = game();
        let seen = recorder(&mut game);

        game.key_down(" ");
        game.key_down(" "); // auto-repeat
        assert!(game.state().paused);
        assert_eq!(
            *seen.borrow(),
            vec![PongEvent::ScoreChanged {
                left: 0,
                right: 0,
                paused: true
            }]
        );

        game.key_up(" ");
        game.key_down(" ");
        assert!(!game.state().paused);
    }

    #[test]
    fn test_reset_key_zeroes_scores() {
        let mut game = game();
        game.state.score_left = 4;
        game.state.score_right = 2;
        let seen = recorder(&mut game);
        game.key_down("R");
        assert_eq!((game.state().score_left, game.state().score_right), (0, 0));
        assert_eq!(
            seen.borrow().last(),
            Some(&PongEvent::ScoreChanged {
                left: 0,
                right: 0,
                paused: false
            })
        );
    }

    #[test]
    fn test_stop_halts_simulation() {
        let mut game = game();
        game.update(0.0);
        game.stop();
        let ball = game.state().ball.pos;
        game.update(16.0);
        game.update(32.0);
        assert_eq!(game.state().ball.pos, ball);
        assert!(!game.is_active());
    }
}
