//! World context owned by the screen session

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::util::time::SimClock;
use crate::ws::protocol::{
    BulletOwner, BulletView, ControllerMsg, EnemyView, ExplosionView, Role, ScreenFrame, ServerMsg,
    TankView,
};
use crate::ws::transport::{DeviceId, Target, Transport};

use super::combat::{
    Bullet, BulletPool, CombatSystem, Explosion, WeaponStats, EXPLOSION_POOL_SIZE,
    PLAYER_LAUNCH_DISTANCE,
};
use super::enemy::EnemyTank;
use super::input::{DriverInput, ShooterInput};
use super::physics::{PhysicsSystem, TankStats, WorldBounds};
use super::pool::Pool;
use super::roles::RoleManager;
use super::Simulation;

/// World setup
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub enemy_count: usize,
    pub seed: u64,
    pub bounds: WorldBounds,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            enemy_count: 20,
            seed: 0,
            bounds: WorldBounds::default(),
        }
    }
}

/// The shared tank: driver moves the hull, shooter owns the turret
#[derive(Debug, Clone)]
pub struct PlayerTank {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub speed: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub turret_rotation: f32,
    pub next_fire_ms: u64,
    pub stats: TankStats,
}

impl Default for PlayerTank {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            speed: 0.0,
            vel_x: 0.0,
            vel_y: 0.0,
            turret_rotation: 0.0,
            next_fire_ms: 0,
            stats: TankStats::player(),
        }
    }
}

impl PlayerTank {
    fn view(&self) -> TankView {
        // turret and shadow ride on the hull
        TankView {
            x: self.x,
            y: self.y,
            rotation: self.rotation,
            turret_rotation: self.turret_rotation,
            shadow_x: self.x,
            shadow_y: self.y,
            shadow_rotation: self.rotation,
            speed: self.speed,
        }
    }
}

/// Session state: seats, button state and every simulated entity
pub struct World {
    config: WorldConfig,
    transport: Arc<dyn Transport>,
    tick: u64,
    clock: SimClock,
    rng: ChaCha8Rng,
    roles: RoleManager,
    driver: DriverInput,
    shooter: ShooterInput,
    player: PlayerTank,
    enemies: Vec<EnemyTank>,
    player_bullets: BulletPool,
    enemy_bullets: BulletPool,
    explosions: Pool<Explosion>,
    splash_visible: bool,
}

impl World {
    pub fn new(config: WorldConfig, transport: Arc<dyn Transport>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            transport,
            tick: 0,
            clock: SimClock::new(),
            rng,
            roles: RoleManager::new(),
            driver: DriverInput::default(),
            shooter: ShooterInput::default(),
            player: PlayerTank::default(),
            enemies: Vec::new(),
            player_bullets: BulletPool::new(BulletOwner::Player, WeaponStats::player()),
            enemy_bullets: BulletPool::new(BulletOwner::Enemy, WeaponStats::enemy()),
            explosions: Pool::new(EXPLOSION_POOL_SIZE),
            splash_visible: true,
        }
    }

    // ------------------------------------------------------------------
    // Transport callbacks
    // ------------------------------------------------------------------

    /// A controller connected. The first two take the driver and shooter
    /// seats; everyone seated is told their role again.
    pub fn on_connect(&mut self, device_id: DeviceId) {
        self.splash_visible = false;

        match self.roles.connect(device_id) {
            Some(assignments) => {
                info!(device_id = %device_id, seated = self.roles.seated(), "Controller seated");
                self.send_roles(&assignments);
            }
            None => {
                info!(device_id = %device_id, "Controller connected without a seat");
            }
        }
    }

    /// A controller went away. Unknown devices are ignored.
    pub fn on_disconnect(&mut self, device_id: DeviceId) {
        match self.roles.disconnect(device_id) {
            Some(assignments) => {
                info!(device_id = %device_id, seated = self.roles.seated(), "Seated controller left");
                self.send_roles(&assignments);
            }
            None => {
                debug!(device_id = %device_id, "Disconnect for unseated controller");
            }
        }
    }

    /// A button edge arrived. The sender's role is looked up per message so a
    /// promotion applies from the very next edge.
    pub fn on_message(&mut self, device_id: DeviceId, msg: ControllerMsg) {
        match self.roles.role_of(device_id) {
            Some(Role::Driver) => {
                let was_moving = self.driver.moving;
                self.driver.apply(msg);
                if self.driver.moving != was_moving {
                    debug!(moving = self.driver.moving, "Driver toggled motion");
                }
            }
            Some(Role::Shooter) => {
                if self.shooter.apply(msg) {
                    self.fire();
                }
            }
            None => {
                debug!(device_id = %device_id, "Ignoring input from unseated controller");
            }
        }
    }

    fn send_roles(&self, assignments: &[(DeviceId, Role)]) {
        for (device_id, role) in assignments {
            let msg = ServerMsg::SetRole { role: *role };
            if let Err(e) = self.transport.send(Target::Device(*device_id), &msg) {
                warn!(device_id = %device_id, error = %e, "Failed to send role");
            }
        }
    }

    // ------------------------------------------------------------------
    // Firing
    // ------------------------------------------------------------------

    /// Fire the player turret. Dropped silently while on cooldown or when
    /// every bullet is in flight. Returns true when a bullet was launched.
    pub fn fire(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !CombatSystem::can_fire(now, self.player.next_fire_ms) {
            debug!(now, next_fire = self.player.next_fire_ms, "Shot dropped: cooldown");
            return false;
        }

        let turret = &self.player;
        let target_x = turret.x + PLAYER_LAUNCH_DISTANCE * turret.turret_rotation.cos();
        let target_y = turret.y + PLAYER_LAUNCH_DISTANCE * turret.turret_rotation.sin();
        let bullet = Bullet::launched_toward(
            turret.x,
            turret.y,
            target_x,
            target_y,
            self.player_bullets.stats.projectile_speed,
        );

        if self.player_bullets.bullets.acquire(bullet).is_none() {
            debug!("Shot dropped: no free bullet");
            return false;
        }

        self.player.next_fire_ms = CombatSystem::next_fire(now, &self.player_bullets.stats);
        true
    }

    // ------------------------------------------------------------------
    // Tick stages
    // ------------------------------------------------------------------

    /// Move every body by its current velocity and retire finished effects
    fn update_bodies(&mut self, dt: f32) {
        let bounds = self.config.bounds;

        let player = &mut self.player;
        let (vel_x, vel_y) = PhysicsSystem::velocity_from_rotation(player.rotation, player.speed);
        player.vel_x = vel_x;
        player.vel_y = vel_y;
        let (x, y) = PhysicsSystem::integrate(player.x, player.y, vel_x, vel_y);
        let (x, y) = PhysicsSystem::clamp_to_bounds(x, y, player.stats.hitbox_radius, &bounds);
        player.x = x;
        player.y = y;

        for enemy in self.enemies.iter_mut() {
            enemy.update_movement(&bounds);
        }

        self.player_bullets.update(&bounds);
        self.enemy_bullets.update(&bounds);
        self.explosions.retain(|explosion| explosion.update(dt));
    }

    /// Enemy bullets that reach the player are absorbed; the player takes no damage
    fn resolve_player_hits(&mut self) {
        let player = &self.player;
        let radius = self.enemy_bullets.stats.projectile_radius;
        self.enemy_bullets.bullets.retain(|bullet| {
            !bullet.check_hit(radius, player.x, player.y, player.stats.hitbox_radius)
        });
    }

    /// Collisions, bullet hits and AI for every living enemy
    fn update_enemies(&mut self) {
        let now = self.clock.now_ms();
        let bullet_radius = self.player_bullets.stats.projectile_radius;

        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            let player = &mut self.player;
            let radius = enemy.stats.hitbox_radius;

            if PhysicsSystem::check_collision(
                player.x,
                player.y,
                player.stats.hitbox_radius,
                enemy.x,
                enemy.y,
                radius,
            ) {
                let ((px, py), (ex, ey)) = PhysicsSystem::resolve_collision(
                    player.x,
                    player.y,
                    player.stats.hitbox_radius,
                    enemy.x,
                    enemy.y,
                    radius,
                );
                player.x = px;
                player.y = py;
                enemy.x = ex;
                enemy.y = ey;
            }

            let hits: Vec<_> = self
                .player_bullets
                .bullets
                .iter_active()
                .filter(|(_, b)| b.check_hit(bullet_radius, enemy.x, enemy.y, radius))
                .map(|(handle, _)| handle)
                .collect();

            for handle in hits {
                // bullets past the killing blow fly on
                if !enemy.is_alive() {
                    break;
                }
                self.player_bullets.bullets.release(handle);
                if enemy.damage() {
                    info!(enemy = enemy.index, "Enemy destroyed");
                    if self.explosions.acquire(Explosion::at(enemy.x, enemy.y)).is_none() {
                        debug!(enemy = enemy.index, "Explosion dropped: pool exhausted");
                    }
                }
            }

            if enemy.update_ai(player.x, player.y, now, &mut self.enemy_bullets).is_some() {
                debug!(enemy = enemy.index, "Enemy fired");
            }
        }
    }

    /// Driver steers the hull and sets speed; shooter steers the turret
    fn apply_controls(&mut self) {
        let player = &mut self.player;
        player.rotation =
            PhysicsSystem::turn(player.rotation, self.driver.steer(), player.stats.turn_step_deg);
        player.speed = PhysicsSystem::next_speed(player.speed, self.driver.moving, &player.stats);
        player.turret_rotation = PhysicsSystem::turn(
            player.turret_rotation,
            self.shooter.steer(),
            player.stats.turret_step_deg,
        );
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn enemies_total(&self) -> usize {
        self.enemies.len()
    }

    pub fn seat_holder(&self, role: Role) -> Option<DeviceId> {
        self.roles.holder(role)
    }

    pub fn driver(&self) -> &DriverInput {
        &self.driver
    }

    pub fn shooter(&self) -> &ShooterInput {
        &self.shooter
    }

    pub fn player(&self) -> &PlayerTank {
        &self.player
    }
}

impl Simulation for World {
    type Frame = ScreenFrame;

    fn initialize(&mut self) {
        self.tick = 0;
        self.clock = SimClock::new();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.player = PlayerTank::default();
        self.player_bullets = BulletPool::new(BulletOwner::Player, WeaponStats::player());
        self.enemy_bullets = BulletPool::new(BulletOwner::Enemy, WeaponStats::enemy());
        self.explosions = Pool::new(EXPLOSION_POOL_SIZE);

        let bounds = self.config.bounds;
        self.enemies = (0..self.config.enemy_count)
            .map(|index| EnemyTank::spawn(index, &mut self.rng, &bounds))
            .collect();

        info!(
            enemies = self.enemies.len(),
            seed = self.config.seed,
            "World initialized"
        );
    }

    fn tick(&mut self, dt: f32) {
        self.tick += 1;
        self.clock.advance(dt);

        self.update_bodies(dt);
        self.resolve_player_hits();
        self.update_enemies();
        self.apply_controls();
    }

    fn render(&self) -> ScreenFrame {
        let enemies = self
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| EnemyView {
                index: e.index,
                tank: TankView {
                    x: e.x,
                    y: e.y,
                    rotation: e.rotation,
                    turret_rotation: e.turret_rotation,
                    shadow_x: e.x,
                    shadow_y: e.y,
                    shadow_rotation: e.rotation,
                    speed: e.stats.max_speed,
                },
                health: e.health,
            })
            .collect();

        let bullets = [&self.player_bullets, &self.enemy_bullets]
            .into_iter()
            .flat_map(|pool| {
                pool.bullets.iter_active().map(move |(_, b)| BulletView {
                    owner: pool.owner,
                    x: b.x,
                    y: b.y,
                    rotation: b.rotation,
                })
            })
            .collect();

        let explosions = self
            .explosions
            .iter_active()
            .map(|(_, e)| ExplosionView {
                x: e.x,
                y: e.y,
                progress: e.progress(),
            })
            .collect();

        ScreenFrame {
            tick: self.tick,
            splash_visible: self.splash_visible,
            player: self.player.view(),
            enemies,
            bullets,
            explosions,
            enemies_alive: self.enemies_alive() as u32,
            enemies_total: self.enemies_total() as u32,
            driver_connected: self.roles.holder(Role::Driver).is_some(),
            shooter_connected: self.roles.holder(Role::Shooter).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combat::{EXPLOSION_LIFETIME, EXPLOSION_POOL_SIZE};
    use crate::util::time::tick_delta;
    use crate::ws::protocol::Button;
    use crate::ws::transport::testing::RecordingTransport;

    fn world_with(enemy_count: usize) -> (World, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let mut world = World::new(
            WorldConfig {
                enemy_count,
                seed: 42,
                ..WorldConfig::default()
            },
            transport.clone(),
        );
        world.initialize();
        (world, transport)
    }

    fn role_msgs(sent: Vec<(Target, ServerMsg)>) -> Vec<(DeviceId, Role)> {
        sent.into_iter()
            .filter_map(|(target, msg)| match (target, msg) {
                (Target::Device(id), ServerMsg::SetRole { role }) => Some((id, role)),
                _ => None,
            })
            .collect()
    }

    fn press(world: &mut World, id: DeviceId, button: Button) {
        world.on_message(id, ControllerMsg::press(button));
    }

    fn release(world: &mut World, id: DeviceId, button: Button) {
        world.on_message(id, ControllerMsg::release(button));
    }

    fn tick_n(world: &mut World, n: usize) {
        for _ in 0..n {
            world.tick(tick_delta());
        }
    }

    /// Parks enemy 0 at (x, y) with no velocity
    fn park_enemy(world: &mut World, x: f32, y: f32) {
        let enemy = &mut world.enemies[0];
        enemy.x = x;
        enemy.y = y;
        enemy.vel_x = 0.0;
        enemy.vel_y = 0.0;
    }

    #[test]
    fn role_broadcast_follows_connection_order() {
        let (mut world, transport) = world_with(0);
        let [a, b, c, d]: [DeviceId; 4] = std::array::from_fn(|_| DeviceId::new());

        world.on_connect(a);
        assert_eq!(role_msgs(transport.take()), vec![(a, Role::Driver)]);

        world.on_connect(b);
        assert_eq!(
            role_msgs(transport.take()),
            vec![(a, Role::Driver), (b, Role::Shooter)]
        );

        world.on_connect(c);
        assert!(transport.take().is_empty());

        world.on_disconnect(a);
        assert_eq!(role_msgs(transport.take()), vec![(b, Role::Driver)]);
        assert_eq!(world.seat_holder(Role::Shooter), None);

        world.on_connect(d);
        assert_eq!(
            role_msgs(transport.take()),
            vec![(b, Role::Driver), (d, Role::Shooter)]
        );
    }

    #[test]
    fn stray_disconnect_sends_nothing() {
        let (mut world, transport) = world_with(0);
        let a = DeviceId::new();
        world.on_connect(a);
        transport.take();

        world.on_disconnect(DeviceId::new());
        assert!(transport.take().is_empty());
        assert_eq!(world.seat_holder(Role::Driver), Some(a));
    }

    #[test]
    fn driver_both_buttons_start_motion() {
        let (mut world, _) = world_with(0);
        let driver = DeviceId::new();
        world.on_connect(driver);

        press(&mut world, driver, Button::Left);
        assert!(!world.driver().moving);
        press(&mut world, driver, Button::Right);
        assert!(world.driver().moving);

        tick_n(&mut world, 1);
        assert_eq!(world.player().speed, 300.0);
    }

    #[test]
    fn speed_decays_after_motion_toggled_off() {
        let (mut world, _) = world_with(0);
        let driver = DeviceId::new();
        world.on_connect(driver);

        press(&mut world, driver, Button::Left);
        press(&mut world, driver, Button::Right);
        tick_n(&mut world, 1);

        release(&mut world, driver, Button::Right);
        press(&mut world, driver, Button::Right);
        assert!(!world.driver().moving);

        tick_n(&mut world, 2);
        assert_eq!(world.player().speed, 292.0);
    }

    #[test]
    fn driver_turns_hull_while_held() {
        let (mut world, _) = world_with(0);
        let driver = DeviceId::new();
        world.on_connect(driver);

        press(&mut world, driver, Button::Right);
        tick_n(&mut world, 10);
        assert!((world.player().rotation - 40.0_f32.to_radians()).abs() < 1e-4);

        release(&mut world, driver, Button::Right);
        tick_n(&mut world, 10);
        assert!((world.player().rotation - 40.0_f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn shooter_turns_turret_only() {
        let (mut world, _) = world_with(0);
        let [driver, shooter]: [DeviceId; 2] = std::array::from_fn(|_| DeviceId::new());
        world.on_connect(driver);
        world.on_connect(shooter);

        press(&mut world, shooter, Button::Left);
        tick_n(&mut world, 2);
        let expected = std::f32::consts::TAU - 6.0_f32.to_radians();
        assert!((world.player().turret_rotation - expected).abs() < 1e-4);
        assert_eq!(world.player().rotation, 0.0);
    }

    #[test]
    fn unseated_controller_is_ignored() {
        let (mut world, _) = world_with(0);
        let ids: [DeviceId; 3] = std::array::from_fn(|_| DeviceId::new());
        for id in ids {
            world.on_connect(id);
        }

        press(&mut world, ids[2], Button::Left);
        press(&mut world, ids[2], Button::Right);
        assert_eq!(*world.driver(), DriverInput::default());
        assert_eq!(*world.shooter(), ShooterInput::default());
    }

    #[test]
    fn promotion_applies_to_next_message() {
        let (mut world, _) = world_with(0);
        let [a, b]: [DeviceId; 2] = std::array::from_fn(|_| DeviceId::new());
        world.on_connect(a);
        world.on_connect(b);

        press(&mut world, b, Button::Left);
        assert!(world.shooter().left);
        assert!(!world.driver().left);

        world.on_disconnect(a);
        press(&mut world, b, Button::Right);
        assert!(world.driver().right);
    }

    #[test]
    fn shooter_trigger_fires_one_bullet_and_clears_flags() {
        let (mut world, _) = world_with(0);
        let [driver, shooter]: [DeviceId; 2] = std::array::from_fn(|_| DeviceId::new());
        world.on_connect(driver);
        world.on_connect(shooter);
        tick_n(&mut world, 1);

        press(&mut world, shooter, Button::Left);
        press(&mut world, shooter, Button::Right);

        assert_eq!(*world.shooter(), ShooterInput::default());
        assert_eq!(world.player_bullets.bullets.active_count(), 1);
        let (_, bullet) = world.player_bullets.bullets.iter_active().next().unwrap();
        assert!((bullet.vel_x - 800.0).abs() < 1e-2);
        assert!(bullet.vel_y.abs() < 1e-2);
    }

    #[test]
    fn fire_respects_cooldown() {
        let (mut world, _) = world_with(0);
        assert!(world.fire());
        assert!(!world.fire());
        assert_eq!(world.player_bullets.bullets.active_count(), 1);

        // 100 ms at 60 Hz is six ticks
        tick_n(&mut world, 6);
        assert!(world.fire());
        assert_eq!(world.player_bullets.bullets.active_count(), 2);
    }

    #[test]
    fn exhausted_pool_drops_shot_without_cooldown() {
        let (mut world, _) = world_with(0);
        tick_n(&mut world, 1);
        for _ in 0..world.player_bullets.stats.pool_size {
            world.player_bullets.bullets.acquire(Bullet::default());
        }
        let before = world.player.next_fire_ms;

        assert!(!world.fire());
        assert_eq!(world.player.next_fire_ms, before);
        assert_eq!(
            world.player_bullets.bullets.active_count(),
            world.player_bullets.stats.pool_size
        );
    }

    #[test]
    fn three_hits_destroy_enemy_and_spawn_explosion() {
        let (mut world, _) = world_with(1);
        park_enemy(&mut world, 600.0, 600.0);

        for hit in 1..=3 {
            world.player_bullets.bullets.acquire(Bullet {
                x: 600.0,
                y: 600.0,
                ..Bullet::default()
            });
            tick_n(&mut world, 1);
            assert_eq!(world.player_bullets.bullets.active_count(), 0);
            assert_eq!(world.enemies[0].health, 3 - hit);
        }

        assert!(!world.enemies[0].is_alive());
        assert_eq!(world.enemies_alive(), 0);
        assert_eq!(world.explosions.active_count(), 1);

        // a fourth bullet passes through the wreck
        world.player_bullets.bullets.acquire(Bullet {
            x: 600.0,
            y: 600.0,
            ..Bullet::default()
        });
        tick_n(&mut world, 1);
        assert_eq!(world.player_bullets.bullets.active_count(), 1);
        assert_eq!(world.enemies[0].health, 0);
    }

    #[test]
    fn killing_blow_leaves_second_bullet_in_flight() {
        let (mut world, _) = world_with(1);
        park_enemy(&mut world, 600.0, 600.0);
        world.enemies[0].health = 1;

        for _ in 0..2 {
            world.player_bullets.bullets.acquire(Bullet {
                x: 600.0,
                y: 600.0,
                ..Bullet::default()
            });
        }
        tick_n(&mut world, 1);

        assert!(!world.enemies[0].is_alive());
        assert_eq!(world.enemies[0].health, 0);
        assert_eq!(world.player_bullets.bullets.active_count(), 1);
    }

    #[test]
    fn kill_with_full_explosion_pool_drops_effect() {
        let (mut world, _) = world_with(1);
        park_enemy(&mut world, 600.0, 600.0);
        world.enemies[0].health = 1;
        for _ in 0..EXPLOSION_POOL_SIZE {
            world.explosions.acquire(Explosion::at(-600.0, -600.0));
        }

        world.player_bullets.bullets.acquire(Bullet {
            x: 600.0,
            y: 600.0,
            ..Bullet::default()
        });
        tick_n(&mut world, 1);

        assert!(!world.enemies[0].is_alive());
        assert_eq!(world.enemies_alive(), 0);
        assert_eq!(world.explosions.active_count(), EXPLOSION_POOL_SIZE);
        assert!(world
            .explosions
            .iter_active()
            .all(|(_, e)| e.x == -600.0 && e.y == -600.0));
    }

    #[test]
    fn explosion_returns_to_pool() {
        let (mut world, _) = world_with(0);
        world.explosions.acquire(Explosion::at(0.0, 0.0));
        let ticks = (EXPLOSION_LIFETIME / tick_delta()).ceil() as usize + 1;
        tick_n(&mut world, ticks);
        assert_eq!(world.explosions.active_count(), 0);
    }

    #[test]
    fn enemy_bullets_are_absorbed_by_player() {
        let (mut world, _) = world_with(0);
        world.enemy_bullets.bullets.acquire(Bullet::default());
        tick_n(&mut world, 1);
        assert_eq!(world.enemy_bullets.bullets.active_count(), 0);
    }

    #[test]
    fn nearby_enemy_aims_and_fires() {
        let (mut world, _) = world_with(1);
        park_enemy(&mut world, 200.0, 0.0);

        tick_n(&mut world, 1);
        assert!((world.enemies[0].turret_rotation - std::f32::consts::PI).abs() < 1e-4);
        assert_eq!(world.enemy_bullets.bullets.active_count(), 1);
        let next_fire = world.enemies[0].next_fire_ms;
        assert_eq!(next_fire, world.clock.now_ms() + 1000);

        // cooldown holds for a second
        tick_n(&mut world, 30);
        assert_eq!(world.enemies[0].next_fire_ms, next_fire);

        tick_n(&mut world, 31);
        assert!(world.enemies[0].next_fire_ms > next_fire);
    }

    #[test]
    fn enemy_touching_player_is_pushed_apart() {
        let (mut world, _) = world_with(1);
        park_enemy(&mut world, 10.0, 0.0);
        tick_n(&mut world, 1);

        let dx = world.enemies[0].x - world.player().x;
        assert!(dx >= 48.0);
    }

    #[test]
    fn render_reports_splash_and_hud() {
        let (mut world, _) = world_with(5);
        let frame = world.render();
        assert!(frame.splash_visible);
        assert_eq!(frame.enemies_total, 5);
        assert_eq!(frame.enemies_alive, 5);
        assert!(!frame.driver_connected);

        world.on_connect(DeviceId::new());
        let frame = world.render();
        assert!(!frame.splash_visible);
        assert!(frame.driver_connected);
        assert!(!frame.shooter_connected);
        assert_eq!(frame.player.shadow_x, frame.player.x);
    }

    #[test]
    fn initialize_is_deterministic_for_seed() {
        let (a, _) = world_with(20);
        let (b, _) = world_with(20);
        let pos = |w: &World| w.enemies.iter().map(|e| (e.x, e.y)).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
        assert_eq!(a.enemies_total(), 20);
    }
}
