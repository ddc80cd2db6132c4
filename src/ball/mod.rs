//! Ball components and physics systems

pub mod collisions;
pub mod components;
pub mod physics;

pub use collisions::resolve_ball_collisions;
pub use components::{Ball, BallCategory, BallGroup, Potted, Velocity};
pub use physics::{integrate_balls, rail_collisions};
