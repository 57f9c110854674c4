//! Enemy tanks and their turret AI

use rand::Rng;

use super::combat::{Bullet, BulletPool, CombatSystem, ENEMY_FIRE_RANGE};
use super::physics::{PhysicsSystem, TankStats, WorldBounds};
use super::pool::Handle;

/// Hits an enemy takes before it is destroyed
pub const ENEMY_HEALTH: i32 = 3;

/// Enemy lifecycle; `Dead` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Dead,
}

/// An enemy tank. Its index in the world's enemy list never changes, even
/// after it is destroyed.
#[derive(Debug, Clone)]
pub struct EnemyTank {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub turret_rotation: f32,
    pub health: i32,
    pub state: EnemyState,
    pub next_fire_ms: u64,
    pub stats: TankStats,
}

impl EnemyTank {
    pub fn new(index: usize, x: f32, y: f32, rotation: f32) -> Self {
        let stats = TankStats::enemy();
        let (vel_x, vel_y) = PhysicsSystem::velocity_from_rotation(rotation, stats.max_speed);
        Self {
            index,
            x,
            y,
            rotation,
            vel_x,
            vel_y,
            turret_rotation: rotation,
            health: ENEMY_HEALTH,
            state: EnemyState::Alive,
            next_fire_ms: 0,
            stats,
        }
    }

    /// Spawn at a random point inside the bounds with a random heading
    pub fn spawn(index: usize, rng: &mut impl Rng, bounds: &WorldBounds) -> Self {
        let x = rng.gen_range(bounds.min_x..bounds.max_x);
        let y = rng.gen_range(bounds.min_y..bounds.max_y);
        let rotation = rng.gen_range(0.0..std::f32::consts::TAU);
        Self::new(index, x, y, rotation)
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    /// Apply one hit. Returns true when this hit destroyed the tank; hits on
    /// a dead tank change nothing.
    pub fn damage(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }

        let (health, destroyed) = CombatSystem::apply_hit(self.health);
        self.health = health;
        if destroyed {
            self.state = EnemyState::Dead;
        }
        destroyed
    }

    /// Drive along the current velocity, bouncing off the world edge
    pub fn update_movement(&mut self, bounds: &WorldBounds) {
        if !self.is_alive() {
            return;
        }

        let (x, y) = PhysicsSystem::integrate(self.x, self.y, self.vel_x, self.vel_y);
        let (x, y, vel_x, vel_y) = PhysicsSystem::bounce_off_bounds(
            x,
            y,
            self.vel_x,
            self.vel_y,
            self.stats.hitbox_radius,
            bounds,
        );
        self.x = x;
        self.y = y;
        if vel_x != self.vel_x || vel_y != self.vel_y {
            self.rotation = vel_y.atan2(vel_x);
        }
        self.vel_x = vel_x;
        self.vel_y = vel_y;
    }

    /// Aim at the player and fire when in range, off cooldown and a bullet is
    /// free. Returns the bullet fired, if any.
    pub fn update_ai(
        &mut self,
        player_x: f32,
        player_y: f32,
        now_ms: u64,
        bullets: &mut BulletPool,
    ) -> Option<Handle> {
        if !self.is_alive() {
            return None;
        }

        self.turret_rotation = PhysicsSystem::angle_between(self.x, self.y, player_x, player_y);

        let distance = PhysicsSystem::distance_between(self.x, self.y, player_x, player_y);
        if distance >= ENEMY_FIRE_RANGE || !CombatSystem::can_fire(now_ms, self.next_fire_ms) {
            return None;
        }

        let bullet = Bullet::launched_toward(
            self.x,
            self.y,
            player_x,
            player_y,
            bullets.stats.projectile_speed,
        );
        let handle = bullets.bullets.acquire(bullet)?;
        self.next_fire_ms = CombatSystem::next_fire(now_ms, &bullets.stats);
        Some(handle)
    }
}
