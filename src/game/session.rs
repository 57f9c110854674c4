//! Screen session: owns the world and runs the authoritative tick loop

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::interval;
use tracing::{debug, info};

use crate::util::time::{tick_delta, FRAME_TPS, SIMULATION_TPS, TICK_DURATION_MICROS};
use crate::ws::protocol::{Role, ScreenMsg};
use crate::ws::transport::{ChannelTransport, TransportEvent};

use super::snapshot::FrameBuilder;
use super::world::{World, WorldConfig};
use super::Simulation;

/// Counters published after every tick for the health endpoint
#[derive(Debug, Default)]
pub struct SessionStats {
    pub tick: AtomicU64,
    pub enemies_alive: AtomicUsize,
    pub enemies_total: AtomicUsize,
    pub driver_connected: AtomicBool,
    pub shooter_connected: AtomicBool,
}

impl SessionStats {
    fn publish(&self, world: &World) {
        self.tick.store(world.tick_count(), Ordering::Relaxed);
        self.enemies_alive
            .store(world.enemies_alive(), Ordering::Relaxed);
        self.enemies_total
            .store(world.enemies_total(), Ordering::Relaxed);
        self.driver_connected
            .store(world.seat_holder(Role::Driver).is_some(), Ordering::Relaxed);
        self.shooter_connected
            .store(world.seat_holder(Role::Shooter).is_some(), Ordering::Relaxed);
    }
}

/// Handle to the running session, shared with socket handlers
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<TransportEvent>,
    pub frame_tx: broadcast::Sender<ScreenMsg>,
    pub transport: Arc<ChannelTransport>,
    pub stats: Arc<SessionStats>,
}

/// The single screen session
pub struct ScreenSession {
    world: World,
    event_rx: mpsc::Receiver<TransportEvent>,
    frame_tx: broadcast::Sender<ScreenMsg>,
    frame_builder: FrameBuilder,
    stats: Arc<SessionStats>,
}

impl ScreenSession {
    /// Create the session and the handle used to feed it
    pub fn new(config: WorldConfig, transport: Arc<ChannelTransport>) -> (Self, SessionHandle) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (frame_tx, _) = broadcast::channel(16);
        let stats = Arc::new(SessionStats::default());

        let handle = SessionHandle {
            event_tx,
            frame_tx: frame_tx.clone(),
            transport: transport.clone(),
            stats: stats.clone(),
        };

        let session = Self {
            world: World::new(config, transport),
            event_rx,
            frame_tx,
            frame_builder: FrameBuilder::new(SIMULATION_TPS / FRAME_TPS),
            stats,
        };

        (session, handle)
    }

    /// Run the tick loop until every event sender is gone
    pub async fn run(mut self) {
        self.world.initialize();
        self.stats.publish(&self.world);
        info!("Screen session started");

        let mut tick_interval = interval(Duration::from_micros(TICK_DURATION_MICROS));
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tick_interval.tick().await;

            // Drain transport events
            if !self.process_events() {
                info!("Transport closed, ending screen session");
                break;
            }

            self.world.tick(tick_delta());
            self.stats.publish(&self.world);

            if self.frame_builder.should_send() {
                let frame = self.frame_builder.build(self.world.render());
                // No display attached is fine
                let _ = self.frame_tx.send(frame);
            }
        }
    }

    /// Apply every queued event. Returns false once the channel has closed.
    fn process_events(&mut self) -> bool {
        loop {
            match self.event_rx.try_recv() {
                Ok(TransportEvent::Connected(device_id)) => {
                    self.world.on_connect(device_id);
                    self.frame_builder.force_next();
                }
                Ok(TransportEvent::Disconnected(device_id)) => {
                    self.world.on_disconnect(device_id);
                    self.frame_builder.force_next();
                }
                Ok(TransportEvent::Message(device_id, msg)) => {
                    debug!(device_id = %device_id, ?msg, "Controller input");
                    self.world.on_message(device_id, msg);
                }
                Err(mpsc::error::TryRecvError::Empty) => return true,
                Err(mpsc::error::TryRecvError::Disconnected) => return false,
            }
        }
    }
}
