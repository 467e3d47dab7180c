//! Paddle game renderer

use glam::Vec2;

use super::{Painter, TextAlign, palette};
use crate::sim::pong::{Paddle, PongState};

pub const CONTROLS_HINT: &str = "W/S or \u{2191}/\u{2193} to move \u{2022} Space pause \u{2022} R reset";

const CENTER_LINE_DASH: [f32; 2] = [10.0, 12.0];

fn draw_paddle(painter: &mut dyn Painter, paddle: &Paddle, color: &str) {
    painter.fill_rect(
        Vec2::new(paddle.x, paddle.y),
        Vec2::new(paddle.width, paddle.height),
        color,
    );
}

/// Draw one frame of the match
pub fn draw(state: &PongState, painter: &mut dyn Painter) {
    let size = state.size;
    painter.fill_rect(Vec2::ZERO, size, palette::PONG_BACKGROUND);

    let mid = size.x / 2.0;
    painter.stroke_line(
        Vec2::new(mid, 0.0),
        Vec2::new(mid, size.y),
        2.0,
        &CENTER_LINE_DASH,
        palette::FAINT,
    );

    draw_paddle(painter, &state.left, palette::PONG_LEFT_PADDLE);
    draw_paddle(painter, &state.right, palette::PONG_RIGHT_PADDLE);

    painter.fill_circle(state.ball.pos, state.ball.radius, palette::WHITE);

    // HUD
    painter.fill_text(
        &format!("{}   {}", state.score_left, state.score_right),
        Vec2::new(mid, 32.0),
        "24px monospace",
        TextAlign::Center,
        palette::WHITE,
    );
    painter.fill_text(
        CONTROLS_HINT,
        Vec2::new(12.0, size.y - 12.0),
        "12px monospace",
        TextAlign::Left,
        palette::FAINT,
    );
    if state.paused {
        painter.fill_text(
            "Paused",
            size / 2.0,
            "28px monospace",
            TextAlign::Center,
            palette::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCmd};
    use crate::tuning::PongTuning;

    #[test]
    fn test_draws_paddles_at_their_walls() {
        let state = PongState::new(PongTuning::default(), 800.0, 480.0, 1);
        let mut list = DisplayList::new();
        draw(&state, &mut list);

        assert_eq!(
            list.commands[0],
            DrawCmd::Rect {
                pos: Vec2::ZERO,
                size: Vec2::new(800.0, 480.0),
                color: palette::PONG_BACKGROUND.to_string(),
            }
        );
        let left = list
            .commands
            .iter()
            .find(|c| c.color() == palette::PONG_LEFT_PADDLE);
        assert_eq!(
            left,
            Some(&DrawCmd::Rect {
                pos: Vec2::new(10.0, 195.0),
                size: Vec2::new(12.0, 90.0),
                color: palette::PONG_LEFT_PADDLE.to_string(),
            })
        );
        assert_eq!(list.count_color(palette::PONG_RIGHT_PADDLE), 1);
        assert!(list.texts().contains(&"0   0"));
        assert!(!list.texts().contains(&"Paused"));
    }

    #[test]
    fn test_pause_overlay() {
        let mut state = PongState::new(PongTuning::default(), 800.0, 480.0, 1);
        state.set_paused(true);
        let mut list = DisplayList::new();
        draw(&state, &mut list);
        assert!(list.texts().contains(&"Paused"));
        assert!(list.texts().contains(&CONTROLS_HINT));
    }
}
