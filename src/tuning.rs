//! Data-driven game balance
//!
//! Every field has a default, so an override only needs the values it changes.
//! Overrides are read from LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::ArcadeError;

/// Paddle game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongTuning {
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a wall and its paddle's back face
    pub paddle_inset: f32,
    /// Player paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// Opponent speed as a fraction of the player's
    pub ai_speed_factor: f32,
    pub ball_radius: f32,
    /// Ball speed after a serve (pixels/s)
    pub serve_speed: f32,
    /// Multiplier applied to ball speed on every paddle hit
    pub bounce_speedup: f32,
    /// Bounce angle at the very end of a paddle (radians)
    pub max_bounce_angle: f32,
    /// Width of the random serve angle window, centered on horizontal (radians)
    pub serve_angle_spread: f32,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            paddle_width: 12.0,
            paddle_height: 90.0,
            paddle_inset: 10.0,
            paddle_speed: 480.0,
            ai_speed_factor: 0.85,
            ball_radius: 8.0,
            serve_speed: 360.0,
            bounce_speedup: 1.03,
            max_bounce_angle: std::f32::consts::FRAC_PI_3,
            serve_angle_spread: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// Grid game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    /// Pixels per grid cell
    pub cell_size: f32,
    /// Moves per second at the start of a game
    pub base_speed: f32,
    pub speed_increment: f32,
    /// Speed goes up every this many foods
    pub speedup_every: u32,
    /// Random tries before food falls back to the corner cell
    pub food_attempts: u32,
    pub initial_length: usize,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            base_speed: 5.0,
            speed_increment: 0.6,
            speedup_every: 3,
            food_attempts: 1000,
            initial_length: 3,
        }
    }
}

/// Shooter balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Seconds between shots
    pub fire_cooldown: f32,
    pub projectile_speed: f32,
    /// Projectiles spawn this far above the player's center
    pub projectile_offset: f32,
    /// Projectiles above this y are discarded
    pub projectile_despawn_y: f32,
    pub initial_health: i32,
    /// Downward drift on wave 1 (pixels/s)
    pub base_drop_speed: f32,
    /// Extra drift per wave after the first
    pub drop_speed_increment: f32,
    pub hit_score: u64,
    pub miss_penalty: u64,
    pub wave_bonus: u64,
    /// The wave bonus never lifts the score past this
    pub wave_bonus_ceiling: u64,
    pub wave_rows: usize,
    pub first_wave_cols: usize,
    pub min_wave_cols: usize,
    /// Surface width per column for later waves
    pub column_width: f32,
    pub wave_padding: f32,
    pub wave_start_y: f32,
    pub row_spacing: f32,
    pub osc_frequency: f32,
    /// Oscillation phase shift per pixel of height
    pub osc_phase_per_px: f32,
    pub osc_amplitude_min: f32,
    /// Oscillation amplitude is the surface width over this
    pub osc_amplitude_divisor: f32,
    pub enemy_size_min: f32,
    pub enemy_size_divisor: f32,
    /// How far survivors drop when a wave-mate is shot
    pub nudge_min: f32,
    pub nudge_divisor: f32,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            player_width: 40.0,
            player_height: 20.0,
            player_speed: 320.0,
            fire_cooldown: 0.25,
            projectile_speed: 420.0,
            projectile_offset: 10.0,
            projectile_despawn_y: -10.0,
            initial_health: 100,
            base_drop_speed: 60.0,
            drop_speed_increment: 1.5,
            hit_score: 10,
            miss_penalty: 10,
            wave_bonus: 10,
            wave_bonus_ceiling: 100,
            wave_rows: 3,
            first_wave_cols: 6,
            min_wave_cols: 4,
            column_width: 80.0,
            wave_padding: 20.0,
            wave_start_y: 40.0,
            row_spacing: 40.0,
            osc_frequency: 1.5,
            osc_phase_per_px: 0.01,
            osc_amplitude_min: 18.0,
            osc_amplitude_divisor: 30.0,
            enemy_size_min: 12.0,
            enemy_size_divisor: 20.0,
            nudge_min: 8.0,
            nudge_divisor: 60.0,
        }
    }
}

/// Balance for all three games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub pong: PongTuning,
    pub snake: SnakeTuning,
    pub shooter: ShooterTuning,
}

fn positive(name: &str, value: f32) -> Result<(), ArcadeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ArcadeError::TuningValue(format!("{} must be positive, got {}", name, value)))
    }
}

fn at_least_one(name: &str, value: usize) -> Result<(), ArcadeError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ArcadeError::TuningValue(format!("{} must be at least 1", name)))
    }
}

impl PongTuning {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        positive("pong.paddle_width", self.paddle_width)?;
        positive("pong.paddle_height", self.paddle_height)?;
        positive("pong.paddle_speed", self.paddle_speed)?;
        positive("pong.ball_radius", self.ball_radius)?;
        positive("pong.serve_speed", self.serve_speed)?;
        positive("pong.bounce_speedup", self.bounce_speedup)
    }
}

impl SnakeTuning {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        positive("snake.cell_size", self.cell_size)?;
        positive("snake.base_speed", self.base_speed)?;
        at_least_one("snake.initial_length", self.initial_length)
    }
}

impl ShooterTuning {
    pub fn validate(&self) -> Result<(), ArcadeError> {
        positive("shooter.player_width", self.player_width)?;
        positive("shooter.player_height", self.player_height)?;
        positive("shooter.column_width", self.column_width)?;
        positive("shooter.osc_amplitude_divisor", self.osc_amplitude_divisor)?;
        positive("shooter.enemy_size_divisor", self.enemy_size_divisor)?;
        positive("shooter.nudge_divisor", self.nudge_divisor)?;
        at_least_one("shooter.wave_rows", self.wave_rows)?;
        at_least_one("shooter.first_wave_cols", self.first_wave_cols)?;
        at_least_one("shooter.min_wave_cols", self.min_wave_cols)?;
        if self.initial_health < 1 {
            return Err(ArcadeError::TuningValue(
                "shooter.initial_health must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; values the games cannot run
    /// with are rejected
    pub fn from_json(json: &str) -> Result<Self, ArcadeError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        self.pong.validate()?;
        self.snake.validate()?;
        self.shooter.validate()
    }

    pub fn to_json(&self) -> Result<String, ArcadeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::KeyValueStore;

        let json = crate::platform::web::LocalStore::open()
            .ok()
            .and_then(|store| store.get(crate::consts::TUNING_KEY));

        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from LocalStorage");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pong": { "paddle_speed": 600.0 } }"#).unwrap();
        assert_eq!(tuning.pong.paddle_speed, 600.0);
        assert_eq!(tuning.pong.paddle_height, 90.0);
        assert_eq!(tuning.snake, SnakeTuning::default());
        assert_eq!(tuning.shooter, ShooterTuning::default());
    }

    #[test]
    fn test_invalid_json_is_a_tuning_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ArcadeError::Tuning(_)));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_empty_snake_is_rejected() {
        let err = Tuning::from_json(r#"{ "snake": { "initial_length": 0 } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::TuningValue(_)));
    }

    #[test]
    fn test_zero_cell_size_is_rejected() {
        let err = Tuning::from_json(r#"{ "snake": { "cell_size": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::TuningValue(_)));
    }

    #[test]
    fn test_zero_column_width_is_rejected() {
        let err = Tuning::from_json(r#"{ "shooter": { "column_width": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::TuningValue(_)));
    }

    #[test]
    fn test_negative_speed_is_rejected() {
        let err = Tuning::from_json(r#"{ "pong": { "serve_speed": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::TuningValue(_)));
    }

    #[test]
    fn test_json_export_reloads() {
        let mut tuning = Tuning::default();
        tuning.shooter.initial_health = 3;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
