//! Scrolling shooter simulation
//!
//! Waves of enemies oscillate sideways and drift down toward the player.
//! Shooting one earns points and pushes the rest of the wave closer; letting
//! one slip past costs points and health; touching one ends the game.

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::SHOOTER_MAX_DT;
use crate::tuning::ShooterTuning;

/// Smallest enemy size after a resize
pub const MIN_RESIZED_ENEMY_SIZE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    /// Side length of the enemy's square hit box
    pub size: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterPhase {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Notifications for the host (HUD, high-score storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterEvent {
    ScoreChanged(u64),
    HealthChanged(i32),
    WaveChanged(u32),
    /// A new best; the host persists it
    HighScore(u64),
    GameOver { score: u64, high_score: u64 },
}

/// Sampled input for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ShooterInput {
    pub left: bool,
    pub right: bool,
    /// Fire key held
    pub fire: bool,
    /// Wall-clock time in seconds, drives the enemy oscillation
    pub time_secs: f64,
}

/// Score after a missed enemy, floored at zero
pub fn penalize(score: u64, penalty: u64) -> u64 {
    score.saturating_sub(penalty)
}

/// Score after the wave-clear bonus, capped at `ceiling`; a score already
/// past the ceiling comes down to it
pub fn wave_bonus(score: u64, bonus: u64, ceiling: u64) -> u64 {
    score.saturating_add(bonus).min(ceiling)
}

#[derive(Debug, Clone)]
pub struct ShooterState {
    pub tuning: ShooterTuning,
    /// Surface size (logical pixels)
    pub size: Vec2,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub health: i32,
    pub wave: u32,
    /// Downward drift of the current wave (px/s)
    pub drop_speed: f32,
    pub high_score: u64,
    pub phase: ShooterPhase,
    events: Vec<ShooterEvent>,
}

impl ShooterState {
    pub fn new(tuning: ShooterTuning, width: f32, height: f32, high_score: u64) -> Self {
        let player = Player {
            pos: Vec2::new((width - 36.0).max(80.0), (height - 40.0).max(120.0)),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            cooldown: 0.0,
        };
        let mut state = Self {
            health: tuning.initial_health,
            drop_speed: tuning.base_drop_speed,
            tuning,
            size: Vec2::new(width, height),
            player,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            wave: 1,
            high_score,
            phase: ShooterPhase::Ready,
            events: Vec::new(),
        };
        state.spawn_wave(state.tuning.wave_rows, state.tuning.first_wave_cols);
        state
    }

    /// Replace the enemies with a fresh grid and set the drift for the
    /// current wave number
    pub fn spawn_wave(&mut self, rows: usize, cols: usize) {
        let t = &self.tuning;
        let cols = cols.max(1);
        let spacing = (self.size.x - t.wave_padding * 2.0) / cols as f32;
        let size = (self.size.x / t.enemy_size_divisor).round().max(t.enemy_size_min);

        self.enemies.clear();
        for r in 0..rows {
            for c in 0..cols {
                self.enemies.push(Enemy {
                    pos: Vec2::new(
                        t.wave_padding + c as f32 * spacing + spacing / 2.0,
                        t.wave_start_y + r as f32 * t.row_spacing,
                    ),
                    size,
                    alive: true,
                });
            }
        }
        self.drop_speed = t.base_drop_speed + (self.wave - 1) as f32 * t.drop_speed_increment;
        log::debug!(
            "Wave {}: {}x{} enemies, drop {:.1} px/s",
            self.wave,
            rows,
            cols,
            self.drop_speed
        );
    }

    /// Columns for waves after the first, scaled to the surface width
    pub fn wave_columns(&self) -> usize {
        let by_width = (self.size.x / self.tuning.column_width).floor().max(0.0) as usize;
        by_width.max(self.tuning.min_wave_cols)
    }

    /// Clear all counters and entities, respawn the first wave and run
    pub fn restart(&mut self) {
        self.score = 0;
        self.health = self.tuning.initial_health;
        self.wave = 1;
        self.projectiles.clear();
        self.spawn_wave(self.tuning.wave_rows, self.tuning.first_wave_cols);
        self.phase = ShooterPhase::Running;
        log::info!("Shooter restarted");
        self.emit(ShooterEvent::ScoreChanged(self.score));
        self.emit(ShooterEvent::HealthChanged(self.health));
        self.emit(ShooterEvent::WaveChanged(self.wave));
    }

    /// Run; a finished game restarts
    pub fn start(&mut self) {
        match self.phase {
            ShooterPhase::GameOver => self.restart(),
            _ => self.phase = ShooterPhase::Running,
        }
    }

    pub fn pause(&mut self) {
        if self.phase == ShooterPhase::Running {
            self.phase = ShooterPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == ShooterPhase::Paused {
            self.phase = ShooterPhase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            ShooterPhase::Running => self.phase = ShooterPhase::Paused,
            ShooterPhase::Paused | ShooterPhase::Ready => self.phase = ShooterPhase::Running,
            ShooterPhase::GameOver => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == ShooterPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == ShooterPhase::GameOver
    }

    /// Fire a projectile if the cooldown allows it; returns true if one spawned
    pub fn shoot(&mut self) -> bool {
        if self.phase != ShooterPhase::Running || self.player.cooldown > 0.0 {
            return false;
        }
        self.projectiles.push(Projectile {
            pos: self.player.pos - Vec2::new(0.0, self.tuning.projectile_offset),
            vel: Vec2::new(0.0, -self.tuning.projectile_speed),
        });
        self.player.cooldown = self.tuning.fire_cooldown;
        true
    }

    /// Scale every entity into a new surface size
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        let scale = Vec2::new(width, height) / self.size;
        let mean = (scale.x + scale.y) / 2.0;
        self.size = Vec2::new(width, height);

        self.player.pos *= scale;
        for p in &mut self.projectiles {
            p.pos *= scale;
            p.vel *= scale;
        }
        for e in &mut self.enemies {
            e.pos *= scale;
            e.size = (e.size * mean).round().max(MIN_RESIZED_ENEMY_SIZE);
        }
        log::debug!("Shooter resized to {}x{}", width, height);
    }

    fn end_game(&mut self) {
        self.phase = ShooterPhase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("New shooter high score: {}", self.high_score);
            self.emit(ShooterEvent::HighScore(self.high_score));
        }
        log::info!("Shooter game over, score {} wave {}", self.score, self.wave);
        self.emit(ShooterEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
        });
    }

    pub fn drain_events(&mut self) -> Vec<ShooterEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ShooterEvent) {
        self.events.push(event);
    }
}

/// Advance the shooter by one frame
pub fn tick(state: &mut ShooterState, input: &ShooterInput, dt: f32) {
    if state.phase != ShooterPhase::Running {
        return;
    }
    let dt = dt.clamp(0.0, SHOOTER_MAX_DT);
    let width = state.size.x;

    // Player
    let step = state.tuning.player_speed * dt;
    if input.left && !input.right {
        state.player.pos.x -= step;
    }
    if input.right && !input.left {
        state.player.pos.x += step;
    }
    let half_w = state.player.size.x / 2.0;
    state.player.pos.x = state.player.pos.x.max(half_w).min(width - half_w);

    if input.fire {
        state.shoot();
    }
    if state.player.cooldown > 0.0 {
        state.player.cooldown = (state.player.cooldown - dt).max(0.0);
    }

    // Projectiles
    let despawn_y = state.tuning.projectile_despawn_y;
    for p in &mut state.projectiles {
        p.pos += p.vel * dt;
    }
    state.projectiles.retain(|p| p.pos.y >= despawn_y);

    // Enemy motion and direct contact
    let t = &state.tuning;
    let amplitude = (width / t.osc_amplitude_divisor).round().max(t.osc_amplitude_min);
    let time = input.time_secs as f32 * t.osc_frequency;
    let phase_per_px = t.osc_phase_per_px;
    let player = state.player.bounds();
    let mut contact = false;
    for e in state.enemies.iter_mut().filter(|e| e.alive) {
        e.pos.x += (time + e.pos.y * phase_per_px).sin() * amplitude * dt;
        e.pos.y += state.drop_speed * dt;

        let dx = (e.pos.x - player.center.x).abs();
        if dx < e.size / 2.0 + player.half.x && e.bounds().bottom() >= player.top() {
            e.alive = false;
            contact = true;
            break;
        }
    }
    if contact {
        state.end_game();
        return;
    }

    // Enemies that slipped past the player
    for i in (0..state.enemies.len()).rev() {
        let e = state.enemies[i];
        if !e.alive || e.bounds().top() <= player.bottom() {
            continue;
        }
        state.enemies.remove(i);
        state.score = penalize(state.score, state.tuning.miss_penalty);
        state.health -= 1;
        state.emit(ShooterEvent::ScoreChanged(state.score));
        state.emit(ShooterEvent::HealthChanged(state.health));
        if state.health <= 0 {
            state.end_game();
            return;
        }
    }

    // Projectile hits
    let nudge = (width / state.tuning.nudge_divisor).round().max(state.tuning.nudge_min);
    for i in (0..state.enemies.len()).rev() {
        let e = state.enemies[i];
        if !e.alive {
            continue;
        }
        let bounds = e.bounds();
        let Some(j) = state.projectiles.iter().rposition(|p| bounds.contains(p.pos)) else {
            continue;
        };
        state.projectiles.remove(j);
        state.enemies[i].alive = false;
        state.score += state.tuning.hit_score;
        state.emit(ShooterEvent::ScoreChanged(state.score));
        for other in state.enemies.iter_mut().filter(|o| o.alive) {
            other.pos.y += nudge;
        }
    }

    state.enemies.retain(|e| e.alive);

    // Wave clear
    if state.enemies.is_empty() {
        state.score = wave_bonus(
            state.score,
            state.tuning.wave_bonus,
            state.tuning.wave_bonus_ceiling,
        );
        state.wave += 1;
        log::info!("Wave cleared, starting wave {}", state.wave);
        state.emit(ShooterEvent::ScoreChanged(state.score));
        state.emit(ShooterEvent::WaveChanged(state.wave));
        let cols = state.wave_columns();
        state.spawn_wave(state.tuning.wave_rows, cols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_game() -> ShooterState {
        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 0);
        state.start();
        state
    }

    fn lone_enemy(x: f32, y: f32, size: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size,
            alive: true,
        }
    }

    #[test]
    fn test_first_wave_layout() {
        let state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 0);
        assert_eq!(state.phase, ShooterPhase::Ready);
        assert_eq!(state.enemies.len(), 18);
        assert_eq!(state.player.pos, Vec2::new(444.0, 600.0));
        assert_eq!(state.drop_speed, 60.0);
        let spacing = 440.0 / 6.0;
        let first = state.enemies[0];
        assert!((first.pos.x - (20.0 + spacing / 2.0)).abs() < 1e-4);
        assert_eq!(first.pos.y, 40.0);
        assert_eq!(first.size, 24.0);
        assert_eq!(state.enemies[17].pos.y, 120.0);
    }

    #[test]
    fn test_projectile_kills_lone_enemy_and_clears_wave() {
        let mut state = running_game();
        state.player.pos = Vec2::new(240.0, 600.0);
        state.enemies = vec![lone_enemy(240.0, 0.0, 60.0)];
        assert!(state.shoot());
        state.drain_events();

        let input = ShooterInput::default();
        for _ in 0..100 {
            tick(&mut state, &input, 0.05);
            if state.wave == 2 {
                break;
            }
        }

        assert_eq!(state.wave, 2);
        // Hit (+10) then the wave bonus (+10)
        assert_eq!(state.score, 20);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.health, 100);
        // Second wave is scaled to the width
        assert_eq!(state.enemies.len(), 3 * 6);
        assert!((state.drop_speed - 61.5).abs() < 1e-4);
        let events = state.drain_events();
        assert!(events.contains(&ShooterEvent::ScoreChanged(10)));
        assert!(events.contains(&ShooterEvent::WaveChanged(2)));
    }

    #[test]
    fn test_wave_clear_brings_high_score_down_to_ceiling() {
        let mut state = running_game();
        state.score = 170;
        state.player.pos = Vec2::new(240.0, 600.0);
        state.enemies = vec![lone_enemy(240.0, 0.0, 60.0)];
        assert!(state.shoot());
        state.drain_events();

        let input = ShooterInput::default();
        for _ in 0..100 {
            tick(&mut state, &input, 0.05);
            if state.wave == 2 {
                break;
            }
        }

        assert_eq!(state.wave, 2);
        // Hit takes it to 180, the bonus caps it at 100
        assert_eq!(state.score, 100);
        let events = state.drain_events();
        assert!(events.contains(&ShooterEvent::ScoreChanged(180)));
        assert!(events.contains(&ShooterEvent::ScoreChanged(100)));
    }

    #[test]
    fn test_hit_with_survivor_nudges_rest_of_wave() {
        let mut state = running_game();
        state.player.pos = Vec2::new(240.0, 600.0);
        state.enemies = vec![lone_enemy(240.0, 0.0, 60.0), lone_enemy(40.0, 0.0, 20.0)];
        state.shoot();

        let input = ShooterInput::default();
        let mut nudged_by = None;
        for _ in 0..100 {
            let before = state.enemies[state.enemies.len() - 1].pos.y;
            tick(&mut state, &input, 0.05);
            if state.score > 0 {
                nudged_by = Some(state.enemies[0].pos.y - before);
                break;
            }
        }

        assert_eq!(state.score, 10);
        assert_eq!(state.wave, 1);
        assert_eq!(state.enemies.len(), 1);
        // Drift (60 px/s * 0.05 s) plus the kill nudge of max(8, round(480/60))
        let nudged_by = nudged_by.unwrap();
        assert!((nudged_by - 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_missed_enemy_costs_score_and_health() {
        let mut state = running_game();
        state.score = 5;
        // Top edge (628) already below the player's bottom edge (610)
        state.enemies = vec![lone_enemy(100.0, 640.0, 24.0), lone_enemy(240.0, 40.0, 24.0)];
        state.drain_events();

        tick(&mut state, &ShooterInput::default(), 0.016);

        assert_eq!(state.score, 0);
        assert_eq!(state.health, 99);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.is_running());
        assert_eq!(
            state.drain_events(),
            vec![ShooterEvent::ScoreChanged(0), ShooterEvent::HealthChanged(99)]
        );
    }

    #[test]
    fn test_last_health_point_ends_game() {
        let mut state = running_game();
        state.health = 1;
        state.enemies = vec![lone_enemy(100.0, 640.0, 24.0), lone_enemy(240.0, 40.0, 24.0)];
        tick(&mut state, &ShooterInput::default(), 0.016);
        assert!(state.is_game_over());
        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_contact_is_fatal_at_full_health() {
        let mut state = running_game();
        state.enemies = vec![lone_enemy(state.player.pos.x, state.player.pos.y - 15.0, 24.0)];
        state.drain_events();

        tick(&mut state, &ShooterInput::default(), 0.016);

        assert!(state.is_game_over());
        assert_eq!(state.health, 100);
        assert!(!state.enemies[0].alive);
        assert_eq!(
            state.drain_events(),
            vec![ShooterEvent::GameOver { score: 0, high_score: 0 }]
        );

        // Terminal until restarted
        tick(&mut state, &ShooterInput::default(), 0.016);
        assert!(state.is_game_over());
    }

    #[test]
    fn test_game_over_records_new_high_score() {
        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 30);
        state.start();
        state.score = 50;
        state.end_game();
        assert_eq!(state.high_score, 50);
        assert_eq!(
            state.drain_events(),
            vec![
                ShooterEvent::HighScore(50),
                ShooterEvent::GameOver { score: 50, high_score: 50 }
            ]
        );

        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 80);
        state.start();
        state.score = 50;
        state.end_game();
        assert_eq!(state.high_score, 80);
        assert_eq!(
            state.drain_events(),
            vec![ShooterEvent::GameOver { score: 50, high_score: 80 }]
        );
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = running_game();
        let input = ShooterInput {
            fire: true,
            ..Default::default()
        };
        // 0.25 s cooldown is exactly eight of these steps
        for _ in 0..16 {
            tick(&mut state, &input, 0.03125);
        }
        assert_eq!(state.projectiles.len(), 2);
        tick(&mut state, &input, 0.03125);
        assert_eq!(state.projectiles.len(), 3);
    }

    #[test]
    fn test_shoot_needs_running_game() {
        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 0);
        assert!(!state.shoot());
        state.start();
        assert!(state.shoot());
        assert!(!state.shoot());
        assert_eq!(state.projectiles[0].pos, Vec2::new(444.0, 590.0));
        assert_eq!(state.projectiles[0].vel, Vec2::new(0.0, -420.0));
    }

    #[test]
    fn test_projectiles_despawn_above_top() {
        let mut state = running_game();
        state.projectiles.push(Projectile {
            pos: Vec2::new(10.0, -9.0),
            vel: Vec2::new(0.0, -420.0),
        });
        tick(&mut state, &ShooterInput::default(), 0.016);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_player_clamped_to_surface() {
        let mut state = running_game();
        let left = ShooterInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &left, 0.05);
        }
        assert_eq!(state.player.pos.x, 20.0);

        // Both held cancel out
        let both = ShooterInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both, 0.05);
        assert_eq!(state.player.pos.x, 20.0);
    }

    #[test]
    fn test_paused_game_is_frozen() {
        let mut state = running_game();
        state.pause();
        let before = state.enemies.clone();
        tick(&mut state, &ShooterInput::default(), 0.05);
        assert_eq!(state.enemies, before);
        state.toggle_pause();
        assert!(state.is_running());
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut state = running_game();
        state.score = 40;
        state.health = 3;
        state.wave = 5;
        state.shoot();
        state.phase = ShooterPhase::GameOver;

        state.start();

        assert!(state.is_running());
        assert_eq!((state.score, state.health, state.wave), (0, 100, 1));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 18);
        assert_eq!(state.drop_speed, 60.0);
    }

    #[test]
    fn test_wide_surface_gets_more_columns() {
        let mut state = ShooterState::new(ShooterTuning::default(), 960.0, 1280.0, 0);
        assert_eq!(state.wave_columns(), 12);
        state.size.x = 200.0;
        assert_eq!(state.wave_columns(), 4);
    }

    #[test]
    fn test_resize_scales_entities() {
        let mut state = running_game();
        state.enemies = vec![lone_enemy(100.0, 100.0, 24.0)];
        state.projectiles = vec![Projectile {
            pos: Vec2::new(100.0, 300.0),
            vel: Vec2::new(0.0, -420.0),
        }];

        state.resize(960.0, 1280.0);

        assert_eq!(state.player.pos, Vec2::new(888.0, 1200.0));
        assert_eq!(state.enemies[0].pos, Vec2::new(200.0, 200.0));
        assert_eq!(state.enemies[0].size, 48.0);
        assert_eq!(state.projectiles[0].vel, Vec2::new(0.0, -840.0));

        state.resize(48.0, 64.0);
        assert_eq!(state.enemies[0].size, MIN_RESIZED_ENEMY_SIZE);
    }

    proptest! {
        #[test]
        fn prop_miss_never_goes_negative(score in 0u64..1_000, penalty in 0u64..50) {
            let after = penalize(score, penalty);
            prop_assert!(after <= score);
            prop_assert_eq!(after, score.saturating_sub(penalty));
        }

        #[test]
        fn prop_wave_bonus_capped(score in 0u64..500) {
            let after = wave_bonus(score, 10, 100);
            prop_assert!(after <= 100);
            prop_assert_eq!(after, (score + 10).min(100));
            if score < 90 {
                prop_assert_eq!(after, score + 10);
            }
        }
    }
}
