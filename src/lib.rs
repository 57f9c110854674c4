//! Tank Duo - shared-screen tank game driven by two phone controllers
//!
//! The screen server seats the first two controllers as driver and shooter,
//! tracks their button edges and runs the authoritative simulation:
//! - `game`: roles, input state, enemy AI, bullet pools and the tick loop
//! - `ws`: wire protocol, socket handlers and the transport seam
//! - `controller`: the phone side, reduced to edge reporting and a role label

pub mod app;
pub mod config;
pub mod controller;
pub mod game;
pub mod http;
pub mod util;
pub mod ws;
