//! Paddle game simulation
//!
//! Left paddle is the player, right paddle is a proportional follower.
//! Ball speed grows by a fixed factor on every paddle hit.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{bounce_angle, bounce_off_walls, velocity_at_angle};
use crate::consts::PONG_MAX_DT;
use crate::tuning::PongTuning;

/// Which wall a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A paddle, fixed horizontally against its wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed for a given surface width)
    pub x: f32,
    /// Top edge, kept within `[0, surface_height - height]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    fn new(side: Side, tuning: &PongTuning, surface: Vec2) -> Self {
        let mut paddle = Self {
            side,
            x: 0.0,
            y: 0.0,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        };
        paddle.place(tuning.paddle_inset, surface);
        paddle
    }

    /// Pin against the wall and center vertically
    fn place(&mut self, inset: f32, surface: Vec2) {
        self.x = match self.side {
            Side::Left => inset,
            Side::Right => surface.x - inset - self.width,
        };
        self.y = (surface.y - self.height) / 2.0;
    }

    /// x of the face the ball bounces off
    pub fn front(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// True if `y` is strictly within the paddle's vertical extent
    pub fn spans(&self, y: f32) -> bool {
        y > self.y && y < self.y + self.height
    }

    fn clamp_to(&mut self, surface_height: f32) {
        self.y = self.y.clamp(0.0, (surface_height - self.height).max(0.0));
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Magnitude of `vel`, refreshed on every paddle bounce
    pub speed: f32,
}

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PongEvent {
    ScoreChanged { left: u32, right: u32, paused: bool },
}

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct PongInput {
    pub up: bool,
    pub down: bool,
}

/// Complete paddle game state
#[derive(Debug, Clone)]
pub struct PongState {
    pub tuning: PongTuning,
    /// Surface size (logical pixels)
    pub size: Vec2,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score_left: u32,
    pub score_right: u32,
    pub paused: bool,
    rng: Pcg32,
    events: Vec<PongEvent>,
}

impl PongState {
    /// Create a fresh match: scores zeroed, ball served in a random direction
    pub fn new(tuning: PongTuning, width: f32, height: f32, seed: u64) -> Self {
        let size = Vec2::new(width, height);
        let mut state = Self {
            left: Paddle::new(Side::Left, &tuning, size),
            right: Paddle::new(Side::Right, &tuning, size),
            ball: Ball {
                pos: size / 2.0,
                vel: Vec2::ZERO,
                radius: tuning.ball_radius,
                speed: tuning.serve_speed,
            },
            tuning,
            size,
            score_left: 0,
            score_right: 0,
            paused: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Zero both scores, recenter paddles, serve in a random direction
    pub fn reset(&mut self) {
        self.score_left = 0;
        self.score_right = 0;
        self.left.place(self.tuning.paddle_inset, self.size);
        self.right.place(self.tuning.paddle_inset, self.size);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.serve(direction);
        log::info!("Pong reset");
        self.emit_score();
    }

    /// Put the ball at the center heading left (-1) or right (+1) at a small
    /// random angle, back at serve speed
    pub fn serve(&mut self, direction: f32) {
        let spread = self.tuning.serve_angle_spread;
        let angle = self.rng.random::<f32>() * spread - spread / 2.0;
        let speed = self.tuning.serve_speed;
        self.ball.pos = self.size / 2.0;
        self.ball.speed = speed;
        self.ball.vel = Vec2::new(direction.signum() * speed * angle.cos(), speed * angle.sin());
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.emit_score();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Adopt a new surface size; paddles and ball go back to the middle
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.left.place(self.tuning.paddle_inset, self.size);
        self.right.place(self.tuning.paddle_inset, self.size);
        self.ball.pos = self.size / 2.0;
    }

    /// Take the notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<PongEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_score(&mut self) {
        self.events.push(PongEvent::ScoreChanged {
            left: self.score_left,
            right: self.score_right,
            paused: self.paused,
        });
    }
}

/// Advance the match by `dt` seconds (clamped); does nothing while paused
pub fn tick(state: &mut PongState, input: &PongInput, dt: f32) {
    if state.paused {
        return;
    }
    let dt = dt.clamp(0.0, PONG_MAX_DT);
    let height = state.size.y;
    let width = state.size.x;
    let paddle_speed = state.tuning.paddle_speed;

    // Player paddle; up wins if both are held
    if input.up {
        state.left.y -= paddle_speed * dt;
    } else if input.down {
        state.left.y += paddle_speed * dt;
    }
    state.left.clamp_to(height);

    // Opponent: chase the ball's height, never overshooting in one step
    let gap = state.ball.pos.y - state.right.center_y();
    let max_step = paddle_speed * state.tuning.ai_speed_factor * dt;
    state.right.y += gap.signum() * gap.abs().min(max_step);
    state.right.clamp_to(height);

    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    if let Some(wall) = bounce_off_walls(&mut ball.pos, &mut ball.vel, ball.radius, height) {
        log::trace!("Ball bounced off {:?} wall", wall);
    }

    // Paddle hits: edge past the front face with the center inside the span
    let max_angle = state.tuning.max_bounce_angle;
    let speedup = state.tuning.bounce_speedup;
    for paddle in [&state.left, &state.right] {
        let crossed = match paddle.side {
            Side::Left => ball.pos.x - ball.radius < paddle.front(),
            Side::Right => ball.pos.x + ball.radius > paddle.front(),
        };
        if !crossed || !paddle.spans(ball.pos.y) {
            continue;
        }

        let angle = bounce_angle(ball.pos.y, paddle.y, paddle.height, max_angle);
        let speed = ball.vel.length() * speedup;
        let away = match paddle.side {
            Side::Left => 1.0,
            Side::Right => -1.0,
        };
        ball.vel = velocity_at_angle(speed, angle, away);
        ball.speed = speed;
        // Nudge clear of the paddle so the same hit can't fire twice
        ball.pos.x = paddle.front() + away * ball.radius;
        log::trace!("{:?} paddle hit, speed {:.1}", paddle.side, speed);
    }

    // Scoring: the ball has to leave the surface completely
    let out_left = ball.pos.x + ball.radius < 0.0;
    let out_right = ball.pos.x - ball.radius > width;
    if out_left {
        state.score_right += 1;
        log::debug!("Right scores: {}-{}", state.score_left, state.score_right);
        state.emit_score();
        state.serve(1.0);
    } else if out_right {
        state.score_left += 1;
        log::debug!("Left scores: {}-{}", state.score_left, state.score_right);
        state.emit_score();
        state.serve(-1.0);
    }
}
