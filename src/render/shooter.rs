//! Shooter renderer

use glam::Vec2;

use super::{Painter, TextAlign, palette};
use crate::sim::shooter::{Enemy, ShooterPhase, ShooterState};

const PROJECTILE_SIZE: Vec2 = Vec2::new(4.0, 12.0);
const HUD_FONT: &str = "14px monospace";

/// Enemies are drawn slightly flatter than their square hit box, with
/// corners rounded in proportion to their width
fn draw_enemy(painter: &mut dyn Painter, enemy: &Enemy) {
    let w = enemy.size;
    let h = (enemy.size * 0.8).round().max(10.0);
    let r = (w * 0.12).round().max(4.0);
    painter.fill_round_rect(
        enemy.pos - Vec2::new(w, h) / 2.0,
        Vec2::new(w, h),
        r,
        palette::SHOOTER_ENEMY,
    );
}

fn draw_hud(state: &ShooterState, painter: &mut dyn Painter) {
    let lines = [
        format!("Score: {}", state.score),
        format!("Health: {}", state.health),
        format!("Wave: {}", state.wave),
    ];
    for (i, line) in lines.iter().enumerate() {
        painter.fill_text(
            line,
            Vec2::new(10.0, 20.0 + i as f32 * 18.0),
            HUD_FONT,
            TextAlign::Left,
            palette::WHITE,
        );
    }
    painter.fill_text(
        &format!("Best: {}", state.high_score),
        Vec2::new(state.size.x - 10.0, 20.0),
        HUD_FONT,
        TextAlign::Right,
        palette::WHITE,
    );
}

pub fn draw(state: &ShooterState, painter: &mut dyn Painter) {
    let size = state.size;
    painter.fill_rect(Vec2::ZERO, size, palette::SHOOTER_BACKGROUND);

    let player = &state.player;
    painter.fill_rect(
        player.pos - player.size / 2.0,
        player.size,
        palette::SHOOTER_PLAYER,
    );

    for p in &state.projectiles {
        painter.fill_rect(
            p.pos - PROJECTILE_SIZE / 2.0,
            PROJECTILE_SIZE,
            palette::SHOOTER_PROJECTILE,
        );
    }

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        draw_enemy(painter, enemy);
    }

    draw_hud(state, painter);

    let center = size / 2.0;
    match state.phase {
        ShooterPhase::Ready => painter.fill_text(
            "Press Enter to start",
            center,
            "20px monospace",
            TextAlign::Center,
            palette::WHITE,
        ),
        ShooterPhase::Paused => painter.fill_text(
            "Paused",
            center,
            "28px monospace",
            TextAlign::Center,
            palette::WHITE,
        ),
        ShooterPhase::GameOver => {
            painter.fill_rect(Vec2::ZERO, size, palette::SHOOTER_SHADE);
            painter.fill_text(
                "Game Over",
                center - Vec2::new(0.0, 10.0),
                "28px monospace",
                TextAlign::Center,
                palette::WHITE,
            );
            painter.fill_text(
                &format!("Score: {}  Best: {}", state.score, state.high_score),
                center + Vec2::new(0.0, 20.0),
                "16px monospace",
                TextAlign::Center,
                palette::WHITE,
            );
        }
        ShooterPhase::Running => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCmd};
    use crate::tuning::ShooterTuning;

    #[test]
    fn test_draws_every_live_entity() {
        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 70);
        state.start();
        state.shoot();
        state.enemies[0].alive = false;

        let mut list = DisplayList::new();
        draw(&state, &mut list);

        assert_eq!(list.count_color(palette::SHOOTER_ENEMY), 17);
        assert_eq!(list.count_color(palette::SHOOTER_PROJECTILE), 1);
        assert_eq!(
            list.commands[1],
            DrawCmd::Rect {
                pos: Vec2::new(424.0, 590.0),
                size: Vec2::new(40.0, 20.0),
                color: palette::SHOOTER_PLAYER.to_string(),
            }
        );
        assert_eq!(
            list.texts(),
            vec!["Score: 0", "Health: 100", "Wave: 1", "Best: 70"]
        );
    }

    #[test]
    fn test_enemy_shape() {
        let mut list = DisplayList::new();
        draw_enemy(
            &mut list,
            &Enemy {
                pos: Vec2::new(100.0, 100.0),
                size: 24.0,
                alive: true,
            },
        );
        // h = max(10, round(19.2)), r = max(4, round(2.88))
        assert_eq!(
            list.commands[0],
            DrawCmd::RoundRect {
                pos: Vec2::new(88.0, 90.5),
                size: Vec2::new(24.0, 19.0),
                radius: 4.0,
                color: palette::SHOOTER_ENEMY.to_string(),
            }
        );
    }

    #[test]
    fn test_game_over_overlay_shows_final_score() {
        let mut state = ShooterState::new(ShooterTuning::default(), 480.0, 640.0, 0);
        state.phase = ShooterPhase::GameOver;
        state.score = 30;
        let mut list = DisplayList::new();
        draw(&state, &mut list);
        assert_eq!(list.count_color(palette::SHOOTER_SHADE), 1);
        assert!(list.texts().contains(&"Game Over"));
        assert!(list.texts().contains(&"Score: 30  Best: 0"));
    }
}
