//! Combat system - bullets, explosions, cooldowns

use crate::ws::protocol::BulletOwner;

use super::physics::{PhysicsSystem, WorldBounds};
use super::pool::Pool;

/// Weapon stats per side
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    /// Projectile speed
    pub projectile_speed: f32,
    /// Minimum time between shots (milliseconds)
    pub cooldown_ms: u64,
    /// Projectile hitbox radius
    pub projectile_radius: f32,
    /// Bullets pre-allocated for this side
    pub pool_size: usize,
}

impl WeaponStats {
    pub fn player() -> Self {
        Self {
            // the launch point 400 units out is reached in 500 ms
            projectile_speed: PLAYER_LAUNCH_DISTANCE / 0.5,
            cooldown_ms: 100,
            projectile_radius: 4.0,
            pool_size: 30,
        }
    }

    pub fn enemy() -> Self {
        Self {
            projectile_speed: 500.0,
            cooldown_ms: 1000,
            projectile_radius: 4.0,
            pool_size: 100,
        }
    }
}

/// Distance from the turret to the point a player shot is aimed through
pub const PLAYER_LAUNCH_DISTANCE: f32 = 400.0;

/// Enemies only fire at a player closer than this
pub const ENEMY_FIRE_RANGE: f32 = 300.0;

/// Explosion pool size
pub const EXPLOSION_POOL_SIZE: usize = 10;

/// Explosion animation: 23 frames played at 30 fps
pub const EXPLOSION_LIFETIME: f32 = 23.0 / 30.0;

/// Pooled projectile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub rotation: f32,
}

impl Bullet {
    /// Bullet at (x, y) flying toward (target_x, target_y) at `speed`
    pub fn launched_toward(x: f32, y: f32, target_x: f32, target_y: f32, speed: f32) -> Self {
        let rotation = PhysicsSystem::angle_between(x, y, target_x, target_y);
        let (vel_x, vel_y) = PhysicsSystem::velocity_from_rotation(rotation, speed);
        Self {
            x,
            y,
            vel_x,
            vel_y,
            rotation,
        }
    }

    /// Move one tick, returns false once the bullet has left the world
    pub fn update(&mut self, bounds: &WorldBounds) -> bool {
        let (x, y) = PhysicsSystem::integrate(self.x, self.y, self.vel_x, self.vel_y);
        self.x = x;
        self.y = y;
        bounds.contains(x, y)
    }

    /// Check overlap with a target
    pub fn check_hit(&self, radius: f32, target_x: f32, target_y: f32, target_radius: f32) -> bool {
        PhysicsSystem::check_collision(self.x, self.y, radius, target_x, target_y, target_radius)
    }
}

/// Fixed-size bullet pool belonging to one side
#[derive(Debug, Clone)]
pub struct BulletPool {
    pub owner: BulletOwner,
    pub stats: WeaponStats,
    pub bullets: Pool<Bullet>,
}

impl BulletPool {
    pub fn new(owner: BulletOwner, stats: WeaponStats) -> Self {
        Self {
            owner,
            stats,
            bullets: Pool::new(stats.pool_size),
        }
    }

    /// Move every active bullet and recycle the ones that left the world
    pub fn update(&mut self, bounds: &WorldBounds) {
        self.bullets.retain(|bullet| bullet.update(bounds));
    }
}

/// Pooled explosion effect
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub age: f32,
}

impl Explosion {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, age: 0.0 }
    }

    /// Advance the animation, returns false once it has finished
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.age < EXPLOSION_LIFETIME
    }

    pub fn progress(&self) -> f32 {
        (self.age / EXPLOSION_LIFETIME).clamp(0.0, 1.0)
    }
}

/// Combat system for cooldowns and damage
pub struct CombatSystem;

impl CombatSystem {
    /// Check if a weapon may fire at `now_ms`
    pub fn can_fire(now_ms: u64, next_fire_ms: u64) -> bool {
        now_ms >= next_fire_ms
    }

    /// Timestamp of the next allowed shot after firing at `now_ms`
    pub fn next_fire(now_ms: u64, stats: &WeaponStats) -> u64 {
        now_ms + stats.cooldown_ms
    }

    /// Apply one hit to health, returns (new_health, destroyed)
    pub fn apply_hit(current_health: i32) -> (i32, bool) {
        let new_health = current_health - 1;
        (new_health, new_health <= 0)
    }
}
