//! WebSocket transport: wire protocol, socket handlers and outbound routing

pub mod handler;
pub mod protocol;
pub mod transport;
