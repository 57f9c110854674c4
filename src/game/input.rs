//! Per-role button state fed by controller edges

use crate::ws::protocol::{Button, ControllerMsg};

/// Driver buttons plus the forward-motion toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverInput {
    pub left: bool,
    pub right: bool,
    /// Flipped each time both buttons become held together
    pub moving: bool,
}

impl DriverInput {
    /// Apply one edge. `moving` flips on the rising edge of left && right;
    /// the button flags themselves are left as they are.
    pub fn apply(&mut self, msg: ControllerMsg) {
        let was_both = self.left && self.right;
        set_button(&mut self.left, &mut self.right, msg);

        if !was_both && self.left && self.right {
            self.moving = !self.moving;
        }
    }

    /// Hull turn direction: -1 left, +1 right, 0 none. Left wins a tie.
    pub fn steer(&self) -> f32 {
        steer(self.left, self.right)
    }
}

/// Shooter buttons; pressing both is consumed as a single fire trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShooterInput {
    pub left: bool,
    pub right: bool,
}

impl ShooterInput {
    /// Apply one edge and return true when it completed a both-buttons
    /// press. Both flags are cleared when that happens.
    pub fn apply(&mut self, msg: ControllerMsg) -> bool {
        set_button(&mut self.left, &mut self.right, msg);

        if self.left && self.right {
            self.left = false;
            self.right = false;
            return true;
        }
        false
    }

    /// Turret turn direction: -1 left, +1 right, 0 none
    pub fn steer(&self) -> f32 {
        steer(self.left, self.right)
    }
}

fn set_button(left: &mut bool, right: &mut bool, msg: ControllerMsg) {
    match msg.action {
        Button::Left => *left = msg.pressed,
        Button::Right => *right = msg.pressed,
        Button::Other => {}
    }
}

fn steer(left: bool, right: bool) -> f32 {
    if left {
        -1.0
    } else if right {
        1.0
    } else {
        0.0
    }
}
