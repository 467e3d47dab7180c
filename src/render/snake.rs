//! Grid game renderer

use glam::Vec2;

use super::{Painter, TextAlign, palette};
use crate::sim::snake::SnakeState;

/// Fill one grid cell, inset by a pixel so neighbours stay distinct
fn fill_cell(painter: &mut dyn Painter, cell: glam::IVec2, size: f32, color: &str) {
    painter.fill_rect(
        cell.as_vec2() * size + Vec2::ONE,
        Vec2::splat(size - 2.0),
        color,
    );
}

pub fn draw(state: &SnakeState, painter: &mut dyn Painter) {
    let size = state.size;
    let cell = state.tuning.cell_size;
    painter.fill_rect(Vec2::ZERO, size, palette::SNAKE_BACKGROUND);

    for c in 0..=state.cols {
        let x = c as f32 * cell;
        painter.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, size.y), 1.0, &[], palette::SNAKE_GRID);
    }
    for r in 0..=state.rows {
        let y = r as f32 * cell;
        painter.stroke_line(Vec2::new(0.0, y), Vec2::new(size.x, y), 1.0, &[], palette::SNAKE_GRID);
    }

    fill_cell(painter, state.food, cell, palette::SNAKE_FOOD);

    for (i, segment) in state.segments.iter().enumerate() {
        let color = if i == 0 {
            palette::SNAKE_HEAD
        } else {
            palette::SNAKE_BODY
        };
        fill_cell(painter, *segment, cell, color);
    }

    if state.is_game_over() {
        painter.fill_rect(Vec2::ZERO, size, palette::SNAKE_SHADE);
        let center = size / 2.0;
        painter.fill_text(
            "Game Over",
            center - Vec2::new(0.0, 10.0),
            "28px monospace",
            TextAlign::Center,
            palette::WHITE,
        );
        painter.fill_text(
            "Press Restart to play again",
            center + Vec2::new(0.0, 20.0),
            "16px monospace",
            TextAlign::Center,
            palette::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCmd};
    use crate::sim::snake::SnakePhase;
    use crate::tuning::SnakeTuning;

    #[test]
    fn test_head_body_and_food() {
        let state = SnakeState::new(SnakeTuning::default(), 200.0, 200.0, 4);
        let mut list = DisplayList::new();
        draw(&state, &mut list);

        // 11 vertical and 11 horizontal lines for a 10x10 grid
        assert_eq!(list.count_color(palette::SNAKE_GRID), 22);
        assert_eq!(list.count_color(palette::SNAKE_HEAD), 1);
        assert_eq!(list.count_color(palette::SNAKE_BODY), 2);
        assert_eq!(list.count_color(palette::SNAKE_FOOD), 1);

        let head = list
            .commands
            .iter()
            .find(|c| c.color() == palette::SNAKE_HEAD);
        assert_eq!(
            head,
            Some(&DrawCmd::Rect {
                pos: Vec2::new(101.0, 101.0),
                size: Vec2::splat(18.0),
                color: palette::SNAKE_HEAD.to_string(),
            })
        );
        assert!(list.texts().is_empty());
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = SnakeState::new(SnakeTuning::default(), 200.0, 200.0, 4);
        state.phase = SnakePhase::GameOver;
        let mut list = DisplayList::new();
        draw(&state, &mut list);
        assert_eq!(list.count_color(palette::SNAKE_SHADE), 1);
        assert_eq!(list.texts(), vec!["Game Over", "Press Restart to play again"]);
    }
}
