//! Fixed-step projectile integrator shared by prediction and the shot sandbox
//!
//! Each step: x/z advance linearly, gravity acts on vy, then y advances.
//! Bounces reflect vy with the table's restitution over the playing surface.

use super::table::{crosses_net, net_intersection, Table, Vec3};

/// Horizontal speed kept after a bounce
pub const BOUNCE_FRICTION: f32 = 0.95;

/// Bounces slower than this (m/s) end the flight
pub const MIN_BOUNCE_SPEED: f32 = 0.05;

/// What happened during one integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Still in the air (or rolling off the table edge)
    Flying(Vec3),
    /// Hit the table; `pre_vy`/`post_vy` are the vertical velocities either side
    Bounced { position: Vec3, pre_vy: f32, post_vy: f32 },
    /// Hit the net below the tape; position is the contact point
    Netted(Vec3),
    /// Below the floor
    Grounded,
    /// Left the simulated scene
    OffScene,
}

/// Ball state integrated with `dt = 1 / fps`
pub struct BallFlight {
    table: Table,
    position: Vec3,
    velocity: Vec3,
    dt: f32,
    net_collision: bool,
}

impl BallFlight {
    pub fn new(table: Table, position: Vec3, velocity: Vec3, fps: f32) -> Self {
        let fps = if fps > 0.0 { fps } else { 1.0 };
        Self {
            table,
            position,
            velocity,
            dt: 1.0 / fps,
            net_collision: true,
        }
    }

    /// Disable the net check (free-form sandbox mode)
    pub fn without_net(mut self) -> Self {
        self.net_collision = false;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advance one step
    pub fn step(&mut self) -> StepOutcome {
        let prev = self.position;
        let dt = self.dt;

        self.position.x += self.velocity.x * dt;
        self.position.z += self.velocity.z * dt;
        self.velocity.y -= self.table.gravity * dt;
        self.position.y += self.velocity.y * dt;

        if self.net_collision && crosses_net(prev.x, self.position.x) {
            let contact = net_intersection(&prev, &self.position);
            if contact.y < self.table.net_top() {
                self.position = contact;
                self.velocity = Vec3::zeros();
                return StepOutcome::Netted(contact);
            }
        }

        let surface = self.table.surface_y();
        if self.position.y <= surface
            && self.velocity.y < 0.0
            && self.table.covers(self.position.x, self.position.z)
        {
            let pre_vy = self.velocity.y;
            let post_vy = -pre_vy * self.table.restitution;

            self.position.y = surface;
            self.velocity.y = post_vy;
            self.velocity.x *= BOUNCE_FRICTION;
            self.velocity.z *= BOUNCE_FRICTION;

            return StepOutcome::Bounced { position: self.position, pre_vy, post_vy };
        }

        if self.position.y < 0.0 {
            return StepOutcome::Grounded;
        }
        if !self.table.in_scene(self.position.x, self.position.z) {
            return StepOutcome::OffScene;
        }

        StepOutcome::Flying(self.position)
    }

    /// Integrate up to `steps`, collecting every in-scene position
    pub fn trace(mut self, steps: usize) -> Vec<Vec3> {
        let mut path = Vec::with_capacity(steps);

        for _ in 0..steps {
            match self.step() {
                StepOutcome::Flying(p) => path.push(p),
                StepOutcome::Bounced { position, post_vy, .. } => {
                    path.push(position);
                    if post_vy.abs() < MIN_BOUNCE_SPEED {
                        break;
                    }
                }
                StepOutcome::Netted(p) => {
                    path.push(p);
                    break;
                }
                StepOutcome::Grounded | StepOutcome::OffScene => break,
            }
        }

        path
    }
}
