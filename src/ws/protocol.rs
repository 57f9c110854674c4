//! WebSocket protocol message definitions
//! These are the wire types for controller, screen and server communication

use serde::{Deserialize, Serialize};

use super::transport::DeviceId;

/// Seat a controller occupies, derived from connection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Turns the hull and toggles forward motion
    Driver,
    /// Turns the turret and fires
    Shooter,
}

/// Physical button on a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Right,
    /// Anything else a controller sends; carries no state change
    #[serde(other)]
    Other,
}

/// Message sent from a controller to the screen: one button edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerMsg {
    pub action: Button,
    pub pressed: bool,
}

impl ControllerMsg {
    pub fn press(action: Button) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub fn release(action: Button) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Screen orientation a controller should lock to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
}

/// Messages sent from the server to a controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMsg {
    /// First message on every controller socket
    Welcome {
        device_id: DeviceId,
        orientation: Orientation,
    },

    /// Role assignment, re-sent whenever the seat list changes
    SetRole { role: Role },
}

/// Messages sent from the server to screen (display) clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenMsg {
    /// Rendered world state
    Frame(ScreenFrame),
}

/// Everything a display needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenFrame {
    /// Simulation tick this frame was rendered at
    pub tick: u64,
    /// Logo shown until the first controller connects
    pub splash_visible: bool,
    pub player: TankView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub explosions: Vec<ExplosionView>,
    pub enemies_alive: u32,
    pub enemies_total: u32,
    /// Which seats are currently filled
    pub driver_connected: bool,
    pub shooter_connected: bool,
}

/// Hull, turret and shadow of a tank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    pub x: f32,
    pub y: f32,
    /// Hull heading in radians
    pub rotation: f32,
    /// Turret heading in radians
    pub turret_rotation: f32,
    /// Shadow sits under the hull with the hull's heading
    pub shadow_x: f32,
    pub shadow_y: f32,
    pub shadow_rotation: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub index: usize,
    pub tank: TankView,
    pub health: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub owner: BulletOwner,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub x: f32,
    pub y: f32,
    /// 0.0 when spawned, 1.0 when the animation finishes
    pub progress: f32,
}
