//! 2D rendering module
//!
//! Renderers read simulation state and issue draw calls against a `Painter`.
//! The browser implements it over a Canvas 2D context; tests and the native
//! binary record into a `DisplayList`.

pub mod pong;
pub mod shooter;
pub mod snake;

use glam::Vec2;

/// CSS colors shared by the renderers
pub mod palette {
    pub const WHITE: &str = "#fff";
    pub const FAINT: &str = "rgba(255,255,255,0.06)";

    pub const PONG_BACKGROUND: &str = "#071027";
    pub const PONG_LEFT_PADDLE: &str = "#7c3aed";
    pub const PONG_RIGHT_PADDLE: &str = "#f59e0b";

    pub const SNAKE_BACKGROUND: &str = "#0f172a";
    pub const SNAKE_GRID: &str = "rgba(255,255,255,0.03)";
    pub const SNAKE_FOOD: &str = "#ef4444";
    pub const SNAKE_HEAD: &str = "#10b981";
    pub const SNAKE_BODY: &str = "#059669";
    pub const SNAKE_SHADE: &str = "rgba(2,6,23,0.6)";

    pub const SHOOTER_BACKGROUND: &str = "#000";
    pub const SHOOTER_PLAYER: &str = "#0bf";
    pub const SHOOTER_PROJECTILE: &str = "#ff0";
    pub const SHOOTER_ENEMY: &str = "#fb7185";
    pub const SHOOTER_SHADE: &str = "rgba(0,0,0,0.6)";
}

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A 2D drawing surface in logical (CSS) pixels
///
/// Colors are CSS color strings, fonts are CSS font shorthands.
pub trait Painter {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn fill_round_rect(&mut self, pos: Vec2, size: Vec2, radius: f32, color: &str);
    /// Straight line; an empty `dash` draws it solid
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: &[f32], color: &str);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: &str);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: String,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: String,
    },
    RoundRect {
        pos: Vec2,
        size: Vec2,
        radius: f32,
        color: String,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        dash: Vec<f32>,
        color: String,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        align: TextAlign,
        color: String,
    },
}

impl DrawCmd {
    pub fn color(&self) -> &str {
        match self {
            DrawCmd::Rect { color, .. }
            | DrawCmd::Circle { color, .. }
            | DrawCmd::RoundRect { color, .. }
            | DrawCmd::Line { color, .. }
            | DrawCmd::Text { color, .. } => color,
        }
    }
}

/// Painter that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands drawn in `color`
    pub fn count_color(&self, color: &str) -> usize {
        self.commands.iter().filter(|c| c.color() == color).count()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter for DisplayList {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: &str) {
        self.commands.push(DrawCmd::Rect {
            pos,
            size,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_round_rect(&mut self, pos: Vec2, size: Vec2, radius: f32, color: &str) {
        self.commands.push(DrawCmd::RoundRect {
            pos,
            size,
            radius,
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: &[f32], color: &str) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            dash: dash.to_vec(),
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: &str) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            align,
            color: color.to_string(),
        });
    }
}
