//! Game simulation modules

pub mod combat;
pub mod enemy;
pub mod input;
pub mod physics;
pub mod pool;
pub mod roles;
pub mod session;
pub mod snapshot;
pub mod world;

pub use session::{ScreenSession, SessionHandle, SessionStats};
pub use world::{World, WorldConfig};

/// Contract between the session loop and whatever it simulates
pub trait Simulation {
    type Frame;

    /// Build the starting state
    fn initialize(&mut self);

    /// Advance the simulation by `dt` seconds
    fn tick(&mut self, dt: f32);

    /// Produce a renderable view of the current state
    fn render(&self) -> Self::Frame;
}
