//! Collision helpers shared by the three games
//!
//! Everything is axis-aligned: boxes overlap on both axes, walls reflect by
//! flipping one velocity component.

use glam::Vec2;

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Square box of side `size`
    pub fn square(center: Vec2, size: f32) -> Self {
        Self::new(center, Vec2::splat(size))
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Strict overlap on both axes (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        d.x < self.half.x + other.half.x && d.y < self.half.y + other.half.y
    }

    /// True if `point` lies strictly inside the box
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.half.x && d.y < self.half.y
    }
}

/// Which horizontal wall a circle bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    Top,
    Bottom,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a circle off the top (y = 0) and bottom (y = height) walls
///
/// On contact the vertical velocity flips and the circle is clamped back
/// inside, so afterwards `radius <= pos.y <= height - radius`.
pub fn bounce_off_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, height: f32) -> Option<WallHit> {
    if pos.y - radius < 0.0 {
        pos.y = radius;
        *vel = reflect_velocity(*vel, Vec2::Y);
        Some(WallHit::Top)
    } else if pos.y + radius > height {
        pos.y = height - radius;
        *vel = reflect_velocity(*vel, Vec2::NEG_Y);
        Some(WallHit::Bottom)
    } else {
        None
    }
}

/// Bounce angle for a paddle hit, linear in the offset from the paddle center
///
/// `hit_y` at the center gives 0, at either end gives `±max_angle`.
pub fn bounce_angle(hit_y: f32, paddle_top: f32, paddle_height: f32, max_angle: f32) -> f32 {
    let half = paddle_height / 2.0;
    let relative = (hit_y - (paddle_top + half)) / half;
    relative * max_angle
}

/// Velocity of magnitude `speed` at `angle` from horizontal, heading along
/// `x_sign` (+1 right, -1 left)
pub fn velocity_at_angle(speed: f32, angle: f32, x_sign: f32) -> Vec2 {
    Vec2::new(x_sign.signum() * (speed * angle.cos()).abs(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_3;

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect_velocity(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_top_wall() {
        let mut pos = Vec2::new(50.0, 3.0);
        let mut vel = Vec2::new(10.0, -200.0);
        assert_eq!(bounce_off_walls(&mut pos, &mut vel, 8.0, 480.0), Some(WallHit::Top));
        assert_eq!(pos.y, 8.0);
        assert_eq!(vel, Vec2::new(10.0, 200.0));
    }

    #[test]
    fn test_bounce_bottom_wall() {
        let mut pos = Vec2::new(50.0, 479.0);
        let mut vel = Vec2::new(-10.0, 90.0);
        assert_eq!(bounce_off_walls(&mut pos, &mut vel, 8.0, 480.0), Some(WallHit::Bottom));
        assert_eq!(pos.y, 472.0);
        assert_eq!(vel, Vec2::new(-10.0, -90.0));
    }

    #[test]
    fn test_no_bounce_inside() {
        let mut pos = Vec2::new(50.0, 240.0);
        let mut vel = Vec2::new(1.0, 1.0);
        assert_eq!(bounce_off_walls(&mut pos, &mut vel, 8.0, 480.0), None);
        assert_eq!(vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_bounce_angle_is_linear() {
        assert_eq!(bounce_angle(145.0, 100.0, 90.0, FRAC_PI_3), 0.0);
        assert!((bounce_angle(190.0, 100.0, 90.0, FRAC_PI_3) - FRAC_PI_3).abs() < 1e-6);
        assert!((bounce_angle(100.0, 100.0, 90.0, FRAC_PI_3) + FRAC_PI_3).abs() < 1e-6);
        assert!((bounce_angle(167.5, 100.0, 90.0, FRAC_PI_3) - FRAC_PI_3 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_at_angle_keeps_direction_and_speed() {
        let v = velocity_at_angle(300.0, -0.5, -1.0);
        assert!(v.x < 0.0);
        assert!(v.y < 0.0);
        assert!((v.length() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let touching = Aabb::square(Vec2::new(10.0, 0.0), 10.0);
        let overlapping = Aabb::square(Vec2::new(9.0, 9.0), 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(a.contains(Vec2::new(4.9, -4.9)));
        assert!(!a.contains(Vec2::new(5.0, 0.0)));
        assert_eq!(a.top(), -5.0);
        assert_eq!(a.bottom(), 5.0);
    }
}
