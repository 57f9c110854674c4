//! Tank physics and movement constraints

use crate::util::time::tick_delta;

/// Tank constants per side
#[derive(Debug, Clone, Copy)]
pub struct TankStats {
    /// Forward speed while moving
    pub max_speed: f32,
    /// Speed lost per tick once the driver stops moving
    pub speed_decay: f32,
    /// Hull turn per tick in degrees
    pub turn_step_deg: f32,
    /// Turret turn per tick in degrees
    pub turret_step_deg: f32,
    /// Tank hitbox radius
    pub hitbox_radius: f32,
}

impl TankStats {
    pub fn player() -> Self {
        Self {
            max_speed: 300.0,
            speed_decay: 4.0,
            turn_step_deg: 4.0,
            turret_step_deg: 3.0,
            hitbox_radius: 24.0,
        }
    }

    pub fn enemy() -> Self {
        Self {
            max_speed: 100.0,
            speed_decay: 0.0,
            turn_step_deg: 0.0,
            turret_step_deg: 0.0,
            hitbox_radius: 24.0,
        }
    }
}

/// Axis-aligned play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -1000.0,
            min_y: -1000.0,
            max_x: 1000.0,
            max_y: 1000.0,
        }
    }
}

impl WorldBounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Physics system for moving tanks and bullets
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Rotate a heading by `steer * step_deg` and normalize to 0..2π
    pub fn turn(rotation: f32, steer: f32, step_deg: f32) -> f32 {
        let steer = steer.clamp(-1.0, 1.0);
        (rotation + steer * step_deg.to_radians()).rem_euclid(std::f32::consts::TAU)
    }

    /// Speed after one tick: full speed while moving, linear decay otherwise
    pub fn next_speed(speed: f32, moving: bool, stats: &TankStats) -> f32 {
        if moving {
            stats.max_speed
        } else {
            (speed - stats.speed_decay).max(0.0)
        }
    }

    /// Velocity vector for a heading and speed
    pub fn velocity_from_rotation(rotation: f32, speed: f32) -> (f32, f32) {
        (rotation.cos() * speed, rotation.sin() * speed)
    }

    /// Advance a position by one tick of velocity
    pub fn integrate(x: f32, y: f32, vel_x: f32, vel_y: f32) -> (f32, f32) {
        let dt = tick_delta();
        (x + vel_x * dt, y + vel_y * dt)
    }

    /// Keep a body of `radius` fully inside the bounds
    pub fn clamp_to_bounds(x: f32, y: f32, radius: f32, bounds: &WorldBounds) -> (f32, f32) {
        (
            x.clamp(bounds.min_x + radius, bounds.max_x - radius),
            y.clamp(bounds.min_y + radius, bounds.max_y - radius),
        )
    }

    /// Clamp a body into the bounds and reflect the velocity component that
    /// hit a wall. Returns (x, y, vel_x, vel_y).
    pub fn bounce_off_bounds(
        x: f32,
        y: f32,
        vel_x: f32,
        vel_y: f32,
        radius: f32,
        bounds: &WorldBounds,
    ) -> (f32, f32, f32, f32) {
        let (cx, cy) = Self::clamp_to_bounds(x, y, radius, bounds);
        let vel_x = if cx != x { -vel_x } else { vel_x };
        let vel_y = if cy != y { -vel_y } else { vel_y };
        (cx, cy, vel_x, vel_y)
    }

    /// Angle from one point to another, in radians
    pub fn angle_between(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        (y2 - y1).atan2(x2 - x1)
    }

    pub fn distance_between(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        let dx = x2 - x1;
        let dy = y2 - y1;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check overlap between two circles
    pub fn check_collision(
        x1: f32,
        y1: f32,
        radius1: f32,
        x2: f32,
        y2: f32,
        radius2: f32,
    ) -> bool {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let dist_sq = dx * dx + dy * dy;
        let combined_radius = radius1 + radius2;
        dist_sq <= combined_radius * combined_radius
    }

    /// Resolve collision between two tanks (pushes them apart)
    /// Returns ((new_x1, new_y1), (new_x2, new_y2))
    pub fn resolve_collision(
        x1: f32,
        y1: f32,
        radius1: f32,
        x2: f32,
        y2: f32,
        radius2: f32,
    ) -> ((f32, f32), (f32, f32)) {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < 0.001 {
            // Same position, push apart arbitrarily
            return ((x1 - radius1, y1), (x2 + radius2, y2));
        }

        let combined_radius = radius1 + radius2;
        let overlap = combined_radius - dist;

        if overlap <= 0.0 {
            return ((x1, y1), (x2, y2));
        }

        let nx = dx / dist;
        let ny = dy / dist;

        // Half the overlap each, plus a small buffer
        let push = overlap / 2.0 + 0.1;

        let new_x1 = x1 - nx * push;
        let new_y1 = y1 - ny * push;
        let new_x2 = x2 + nx * push;
        let new_y2 = y2 + ny * push;

        ((new_x1, new_y1), (new_x2, new_y2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn turn_steps_in_degrees_and_wraps() {
        let r = PhysicsSystem::turn(0.0, 1.0, 4.0);
        assert!((r - 4.0_f32.to_radians()).abs() < 1e-6);

        let r = PhysicsSystem::turn(0.0, -1.0, 4.0);
        assert!((r - (TAU - 4.0_f32.to_radians())).abs() < 1e-5);

        assert_eq!(PhysicsSystem::turn(1.0, 0.0, 4.0), 1.0);
    }

    #[test]
    fn speed_jumps_to_max_then_decays_to_zero() {
        let stats = TankStats::player();
        let speed = PhysicsSystem::next_speed(0.0, true, &stats);
        assert_eq!(speed, 300.0);

        let speed = PhysicsSystem::next_speed(speed, false, &stats);
        assert_eq!(speed, 296.0);

        assert_eq!(PhysicsSystem::next_speed(2.0, false, &stats), 0.0);
        assert_eq!(PhysicsSystem::next_speed(0.0, false, &stats), 0.0);
    }

    #[test]
    fn bounce_reflects_crossing_axis_only() {
        let bounds = WorldBounds::default();
        let (x, y, vx, vy) =
            PhysicsSystem::bounce_off_bounds(1005.0, 10.0, 50.0, 20.0, 24.0, &bounds);
        assert_eq!(x, 976.0);
        assert_eq!(y, 10.0);
        assert_eq!(vx, -50.0);
        assert_eq!(vy, 20.0);
    }

    #[test]
    fn angle_and_distance() {
        let a = PhysicsSystem::angle_between(0.0, 0.0, 0.0, 10.0);
        assert!((a - FRAC_PI_2).abs() < 1e-6);
        let a = PhysicsSystem::angle_between(0.0, 0.0, -10.0, 0.0);
        assert!((a - PI).abs() < 1e-6);
        assert_eq!(PhysicsSystem::distance_between(0.0, 0.0, 3.0, 4.0), 5.0);
    }

    #[test]
    fn overlapping_tanks_are_separated() {
        assert!(PhysicsSystem::check_collision(0.0, 0.0, 24.0, 30.0, 0.0, 24.0));
        let ((x1, _), (x2, _)) =
            PhysicsSystem::resolve_collision(0.0, 0.0, 24.0, 30.0, 0.0, 24.0);
        assert!(x2 - x1 > 48.0);
        assert!(!PhysicsSystem::check_collision(x1, 0.0, 24.0, x2, 0.0, 24.0));
    }
}
