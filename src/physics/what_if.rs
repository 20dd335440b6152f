//! "What-if" shot sandbox
//!
//! Launches a ball from a user-placed origin with a chosen speed and angles.
//! Same integrator and bounce rule as prediction, but the net is ignored:
//! this mode is a free-form place-and-launch tool.

use super::angles::launch_velocity;
use super::flight::BallFlight;
use super::table::{Table, Vec3, TABLE};

/// Default step budget for sandbox shots
pub const WHAT_IF_STEPS: usize = 60;

/// Simulation rate of the sandbox (the dashboard's playback rate)
pub const WHAT_IF_FPS: f32 = 30.0;

/// Parameters of a simulated shot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotParams {
    pub origin: Vec3,
    pub speed_mps: f32,
    /// Elevation above horizontal
    pub launch_angle_deg: f32,
    /// Heading in the table plane, 0 = +x
    pub direction_deg: f32,
}

/// Simulate a sandbox shot
pub fn simulate_shot(params: &ShotParams, steps: usize) -> Vec<Vec3> {
    simulate_shot_on(&TABLE, params, steps, WHAT_IF_FPS)
}

/// Simulate against an explicit table and rate
pub fn simulate_shot_on(table: &Table, params: &ShotParams, steps: usize, fps: f32) -> Vec<Vec3> {
    let velocity = launch_velocity(params.speed_mps, params.launch_angle_deg, params.direction_deg);

    BallFlight::new(*table, params.origin, velocity, fps)
        .without_net()
        .trace(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StepOutcome;
    use approx::assert_relative_eq;

    fn centre_shot() -> ShotParams {
        ShotParams {
            origin: Vec3::new(0.0, TABLE.surface_y(), 0.0),
            speed_mps: 3.0,
            launch_angle_deg: 15.0,
            direction_deg: 0.0,
        }
    }

    #[test]
    fn test_centre_shot_touches_table() {
        let path = simulate_shot(&centre_shot(), WHAT_IF_STEPS);
        assert!(!path.is_empty());
        assert!(path.len() <= WHAT_IF_STEPS);
        assert!(path.iter().any(|p| p.y <= TABLE.surface_y() + 0.01));
    }

    #[test]
    fn test_bounce_energy() {
        let params = centre_shot();
        let v = launch_velocity(params.speed_mps, params.launch_angle_deg, params.direction_deg);
        let mut flight = BallFlight::new(TABLE, params.origin, v, WHAT_IF_FPS).without_net();

        let mut bounces = 0;
        for _ in 0..WHAT_IF_STEPS {
            match flight.step() {
                StepOutcome::Bounced { pre_vy, post_vy, .. } => {
                    assert_relative_eq!(post_vy, -TABLE.restitution * pre_vy, epsilon = 1e-6);
                    assert!(post_vy.abs() <= pre_vy.abs());
                    bounces += 1;
                }
                StepOutcome::Grounded | StepOutcome::OffScene => break,
                _ => {}
            }
        }
        assert!(bounces >= 1);
    }

    #[test]
    fn test_ignores_net() {
        let params = ShotParams {
            origin: Vec3::new(-1.0, TABLE.surface_y() + 0.02, 0.0),
            speed_mps: 6.0,
            launch_angle_deg: 0.0,
            direction_deg: 0.0,
        };
        let path = simulate_shot(&params, WHAT_IF_STEPS);
        assert!(path.iter().any(|p| p.x > 0.1));
    }

    #[test]
    fn test_zero_steps() {
        assert!(simulate_shot(&centre_shot(), 0).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = simulate_shot(&centre_shot(), WHAT_IF_STEPS);
        let b = simulate_shot(&centre_shot(), WHAT_IF_STEPS);
        assert_eq!(a, b);
    }
}
