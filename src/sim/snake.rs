//! Grid game simulation
//!
//! Movement is discrete: the snake advances one cell whenever `1000 / speed`
//! milliseconds have passed since its previous move.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::SnakeTuning;

/// Cell food falls back to when no free cell turns up
pub const FALLBACK_FOOD: IVec2 = IVec2::ZERO;

/// Heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-cell offset (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakePhase {
    /// Reset and waiting for start
    Ready,
    Running,
    Paused,
    /// Terminal; only a restart leaves it
    GameOver,
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    ScoreChanged(u32),
    /// Moves per second, rounded
    SpeedChanged(u32),
    GameOver { score: u32 },
}

/// Complete grid game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub tuning: SnakeTuning,
    /// Surface size (logical pixels)
    pub size: Vec2,
    pub cols: i32,
    pub rows: i32,
    /// Head first
    pub segments: VecDeque<IVec2>,
    pub dir: Direction,
    /// Direction to apply on the next move
    pub next_dir: Option<Direction>,
    pub food: IVec2,
    pub score: u32,
    /// Moves per second
    pub speed: f32,
    pub phase: SnakePhase,
    /// Timestamp (ms) of the previous move; `None` re-arms the timer
    pub last_move_ms: Option<f64>,
    rng: Pcg32,
    events: Vec<SnakeEvent>,
}

impl SnakeState {
    pub fn new(tuning: SnakeTuning, width: f32, height: f32, seed: u64) -> Self {
        let mut state = Self {
            speed: tuning.base_speed,
            tuning,
            size: Vec2::ZERO,
            cols: 0,
            rows: 0,
            segments: VecDeque::new(),
            dir: Direction::Right,
            next_dir: None,
            food: FALLBACK_FOOD,
            score: 0,
            phase: SnakePhase::Ready,
            last_move_ms: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.resize(width, height);
        state.reset();
        state
    }

    /// New snake in the middle heading right, fresh food, base speed
    pub fn reset(&mut self) {
        let center = IVec2::new(self.cols / 2, self.rows / 2);
        self.segments = (0..self.tuning.initial_length as i32)
            .map(|i| center - IVec2::new(i, 0))
            .collect();
        self.dir = Direction::Right;
        self.next_dir = None;
        self.place_food();
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.phase = SnakePhase::Ready;
        self.last_move_ms = None;
        log::info!("Snake reset on a {}x{} grid", self.cols, self.rows);
        self.emit(SnakeEvent::ScoreChanged(self.score));
        self.emit(SnakeEvent::SpeedChanged(self.rounded_speed()));
    }

    /// Run; a finished game is reset first
    pub fn start(&mut self) {
        if self.phase == SnakePhase::GameOver {
            self.reset();
        }
        self.phase = SnakePhase::Running;
        self.last_move_ms = None;
    }

    pub fn pause(&mut self) {
        if self.phase == SnakePhase::Running {
            self.phase = SnakePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SnakePhase::Paused {
            self.phase = SnakePhase::Running;
            self.last_move_ms = None;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            SnakePhase::Running => self.pause(),
            SnakePhase::Paused | SnakePhase::Ready => {
                self.phase = SnakePhase::Running;
                self.last_move_ms = None;
            }
            SnakePhase::GameOver => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SnakePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SnakePhase::GameOver
    }

    pub fn rounded_speed(&self) -> u32 {
        self.speed.round() as u32
    }

    /// Queue a turn; a straight reversal of the current heading is ignored
    pub fn set_direction(&mut self, dir: Direction) {
        if dir == self.dir.opposite() {
            return;
        }
        self.next_dir = Some(dir);
    }

    pub fn head(&self) -> IVec2 {
        self.segments[0]
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Recompute the grid for a new surface, shifting the snake and food by
    /// the change in grid center and clamping them inside
    pub fn resize(&mut self, width: f32, height: f32) {
        let old = IVec2::new(self.cols, self.rows);
        let cell = self.tuning.cell_size;
        self.size = Vec2::new(width, height);
        self.cols = ((width / cell).floor() as i32).max(1);
        self.rows = ((height / cell).floor() as i32).max(1);

        if self.segments.is_empty() || old == IVec2::ZERO {
            return;
        }

        let shift = IVec2::new(self.cols, self.rows) / 2 - old / 2;
        let max = IVec2::new(self.cols - 1, self.rows - 1);
        for segment in self.segments.iter_mut() {
            *segment = (*segment + shift).clamp(IVec2::ZERO, max);
        }
        self.food = (self.food + shift).clamp(IVec2::ZERO, max);
        log::debug!("Snake grid resized to {}x{}", self.cols, self.rows);
    }

    /// Pick a random free cell, falling back after the configured attempts
    fn place_food(&mut self) {
        for _ in 0..self.tuning.food_attempts {
            let cell = IVec2::new(
                self.rng.random_range(0..self.cols),
                self.rng.random_range(0..self.rows),
            );
            if !self.segments.contains(&cell) {
                self.food = cell;
                return;
            }
        }
        log::warn!("No free cell found for food, using {:?}", FALLBACK_FOOD);
        self.food = FALLBACK_FOOD;
    }

    fn end_game(&mut self) {
        self.phase = SnakePhase::GameOver;
        log::info!("Snake game over, score {}", self.score);
        self.emit(SnakeEvent::GameOver { score: self.score });
    }

    /// Take the notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<SnakeEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SnakeEvent) {
        self.events.push(event);
    }
}

/// Frame update: move once if the interval for the current speed has passed
pub fn tick(state: &mut SnakeState, now_ms: f64) {
    if state.phase != SnakePhase::Running {
        return;
    }
    let interval_ms = 1000.0 / state.speed as f64;
    match state.last_move_ms {
        None => state.last_move_ms = Some(now_ms),
        Some(last) if now_ms - last >= interval_ms => {
            state.last_move_ms = Some(now_ms);
            step(state);
        }
        Some(_) => {}
    }
}

/// One discrete move
pub fn step(state: &mut SnakeState) {
    if let Some(dir) = state.next_dir.take() {
        state.dir = dir;
    }

    let new_head = state.head() + state.dir.delta();

    if !state.in_bounds(new_head) || state.segments.contains(&new_head) {
        state.end_game();
        return;
    }

    state.segments.push_front(new_head);

    if new_head == state.food {
        state.score += 1;
        state.emit(SnakeEvent::ScoreChanged(state.score));
        if state.tuning.speedup_every > 0 && state.score % state.tuning.speedup_every == 0 {
            state.speed += state.tuning.speed_increment;
            log::debug!("Snake speed up to {:.1}", state.speed);
            state.emit(SnakeEvent::SpeedChanged(state.rounded_speed()));
        }
        state.place_food();
    } else {
        state.segments.pop_back();
    }
}
