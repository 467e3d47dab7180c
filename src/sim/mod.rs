//! Simulation module
//!
//! All gameplay logic lives here. Each game owns its state in one struct,
//! advanced by a free `tick` function:
//! - Seeded RNG only
//! - Notifications go into an outbox drained by the host
//! - No rendering or platform dependencies

pub mod collision;
pub mod pong;
pub mod shooter;
pub mod snake;

pub use collision::{Aabb, WallHit, bounce_angle, bounce_off_walls, reflect_velocity};
pub use pong::{Ball, Paddle, PongEvent, PongInput, PongState, Side};
pub use shooter::{
    Enemy, Player, Projectile, ShooterEvent, ShooterInput, ShooterPhase, ShooterState,
};
pub use snake::{Direction, SnakeEvent, SnakePhase, SnakeState};
