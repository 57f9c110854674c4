//! Transport seam between the screen session and connected controllers

use std::fmt;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use super::protocol::{ControllerMsg, ServerMsg};

/// Identity of one controller socket. A phone that reconnects gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Events the transport delivers to the screen session, in arrival order
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Connected(DeviceId),
    Disconnected(DeviceId),
    Message(DeviceId, ControllerMsg),
}

/// Destination of an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Device(DeviceId),
    Broadcast,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Unknown device {0}")]
    UnknownDevice(DeviceId),

    #[error("Outbox full for device {0}")]
    OutboxFull(DeviceId),

    #[error("Outbox closed for device {0}")]
    OutboxClosed(DeviceId),
}

/// Outbound half of the transport as seen by the session
pub trait Transport: Send + Sync {
    fn send(&self, target: Target, msg: &ServerMsg) -> Result<(), TransportError>;
}

/// Per-device outbox capacity; role messages are rare so this never fills
/// unless a socket writer has stalled.
const OUTBOX_CAPACITY: usize = 32;

/// Routes outbound messages to per-socket writer tasks
#[derive(Default)]
pub struct ChannelTransport {
    outboxes: DashMap<DeviceId, mpsc::Sender<ServerMsg>>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        Self {
            outboxes: DashMap::new(),
        }
    }

    /// Register a socket and return the receiver its writer task drains
    pub fn register(&self, device_id: DeviceId) -> mpsc::Receiver<ServerMsg> {
        let (tx, rx) = mpsc::channel(OUTBOX_CAPACITY);
        self.outboxes.insert(device_id, tx);
        rx
    }

    pub fn unregister(&self, device_id: DeviceId) {
        self.outboxes.remove(&device_id);
    }

    /// Number of open controller sockets, including ones without a seat
    pub fn connected(&self) -> usize {
        self.outboxes.len()
    }

    fn send_to(
        &self,
        device_id: DeviceId,
        tx: &mpsc::Sender<ServerMsg>,
        msg: &ServerMsg,
    ) -> Result<(), TransportError> {
        tx.try_send(msg.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::OutboxFull(device_id),
            mpsc::error::TrySendError::Closed(_) => TransportError::OutboxClosed(device_id),
        })
    }
}

impl Transport for ChannelTransport {
    fn send(&self, target: Target, msg: &ServerMsg) -> Result<(), TransportError> {
        match target {
            Target::Device(device_id) => {
                let tx = self
                    .outboxes
                    .get(&device_id)
                    .ok_or(TransportError::UnknownDevice(device_id))?;
                self.send_to(device_id, tx.value(), msg)
            }
            Target::Broadcast => {
                for entry in self.outboxes.iter() {
                    if let Err(e) = self.send_to(*entry.key(), entry.value(), msg) {
                        debug!(error = %e, "Broadcast skipped a device");
                    }
                }
                Ok(())
            }
        }
    }
}
