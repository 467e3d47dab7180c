//! Canvas Arcade - three small browser arcade games
//!
//! Core modules:
//! - `sim`: Simulation steps (physics, collisions, counters) for each game
//! - `render`: Read-only 2D renderers over a `Painter` surface
//! - `platform`: Input sampling, frame timing, browser glue
//! - `app`: Host-facing lifecycle (`Arcade`) for each game
//! - `tuning`: Data-driven game balance
//! - `persistence` / `highscores`: The one value kept across sessions

pub mod app;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use error::ArcadeError;
pub use highscores::HighScore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame step the paddle game integrates (seconds)
    pub const PONG_MAX_DT: f32 = 0.032;
    /// Largest frame step the shooter integrates (seconds)
    pub const SHOOTER_MAX_DT: f32 = 0.05;

    /// Default logical surface sizes (CSS pixels)
    pub const PONG_SURFACE: (f32, f32) = (800.0, 480.0);
    pub const SNAKE_SURFACE: (f32, f32) = (480.0, 480.0);
    pub const SHOOTER_SURFACE: (f32, f32) = (480.0, 640.0);

    /// Delay before a window resize is applied (milliseconds)
    pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "space-shooter-highscore";
    pub const TUNING_KEY: &str = "canvas_arcade_tuning";
}

/// Which of the three games to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Pong,
    Snake,
    Shooter,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Pong, GameKind::Snake, GameKind::Shooter];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Pong => "pong",
            GameKind::Snake => "snake",
            GameKind::Shooter => "shooter",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ArcadeError> {
        match s.trim_start_matches('#').to_lowercase().as_str() {
            "pong" | "ping-pong" | "paddle" => Ok(GameKind::Pong),
            "snake" | "grid" => Ok(GameKind::Snake),
            "shooter" | "space-shooter" => Ok(GameKind::Shooter),
            other => Err(ArcadeError::UnknownGame(other.to_string())),
        }
    }
}
