//! Screen frame pacing

use crate::ws::protocol::{ScreenFrame, ScreenMsg};

/// Decides which simulation ticks produce a frame for the displays
pub struct FrameBuilder {
    /// Ticks since the last frame went out
    ticks_since_frame: u32,
    /// Frame interval in ticks
    frame_interval: u32,
}

impl FrameBuilder {
    pub fn new(frame_interval: u32) -> Self {
        let frame_interval = frame_interval.max(1);
        Self {
            ticks_since_frame: 0,
            frame_interval,
        }
    }

    /// Check if it's time to send a frame
    pub fn should_send(&mut self) -> bool {
        self.ticks_since_frame += 1;
        if self.ticks_since_frame >= self.frame_interval {
            self.ticks_since_frame = 0;
            true
        } else {
            false
        }
    }

    /// Send a frame on the next check (used when seats change)
    pub fn force_next(&mut self) {
        self.ticks_since_frame = self.frame_interval;
    }

    pub fn build(&self, frame: ScreenFrame) -> ScreenMsg {
        ScreenMsg::Frame(frame)
    }
}
