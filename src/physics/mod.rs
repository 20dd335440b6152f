//! Physics module - table constants, projectile integration, prediction
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod flight;
mod prediction;
mod table;
mod velocity;
mod what_if;

pub use angles::{launch_velocity, step_cosine};
pub use flight::{BallFlight, StepOutcome, BOUNCE_FRICTION, MIN_BOUNCE_SPEED};
pub use prediction::PredictionEngine;
pub use table::{crosses_net, net_intersection, Table, Vec3, TABLE};
pub use velocity::{weighted_velocity, TimedPosition};
pub use what_if::{simulate_shot, simulate_shot_on, ShotParams, WHAT_IF_FPS, WHAT_IF_STEPS};
