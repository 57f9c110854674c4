//! Controller side: two buttons that report edges and a role label

use crate::ws::protocol::{Button, ControllerMsg, Role, ServerMsg};

/// Physical state of the two buttons. Only real transitions produce a
/// message; holding a button sends nothing further.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pad {
    left: bool,
    right: bool,
}

impl Pad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a physical press or release, returning the edge to report
    pub fn set(&mut self, button: Button, down: bool) -> Option<ControllerMsg> {
        let state = match button {
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Other => return None,
        };

        if *state == down {
            return None;
        }
        *state = down;
        Some(ControllerMsg {
            action: button,
            pressed: down,
        })
    }

    pub fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
            Button::Other => false,
        }
    }
}

/// Command typed at the terminal pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadCommand {
    Press(Button),
    Release(Button),
    /// Press both, then release both
    Both,
    Quit,
}

impl PadCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = match line.trim() {
            "+l" => Self::Press(Button::Left),
            "-l" => Self::Release(Button::Left),
            "+r" => Self::Press(Button::Right),
            "-r" => Self::Release(Button::Right),
            "both" | "b" => Self::Both,
            "quit" | "q" => Self::Quit,
            _ => return None,
        };
        Some(cmd)
    }

    /// Physical transitions this command performs, in order
    pub fn transitions(self) -> Vec<(Button, bool)> {
        match self {
            Self::Press(button) => vec![(button, true)],
            Self::Release(button) => vec![(button, false)],
            Self::Both => vec![
                (Button::Left, true),
                (Button::Right, true),
                (Button::Left, false),
                (Button::Right, false),
            ],
            Self::Quit => Vec::new(),
        }
    }
}

/// Text shown on the controller, driven by role messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleLabel {
    role: Option<Role>,
}

impl RoleLabel {
    /// Apply a server message; returns true when the label changed
    pub fn apply(&mut self, msg: &ServerMsg) -> bool {
        match msg {
            ServerMsg::SetRole { role } => {
                let changed = self.role != Some(*role);
                self.role = Some(*role);
                changed
            }
            ServerMsg::Welcome { .. } => false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn text(&self) -> String {
        match self.role {
            Some(Role::Driver) => {
                "You are the DRIVER\nPress BOTH buttons to toggle velocity".to_string()
            }
            Some(Role::Shooter) => "You are the SHOOTER\nPress BOTH buttons to shoot".to_string(),
            None => "Waiting for a seat".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_report_edges() {
        let mut pad = Pad::new();
        assert_eq!(
            pad.set(Button::Left, true),
            Some(ControllerMsg::press(Button::Left))
        );
        assert!(pad.is_down(Button::Left));
        assert_eq!(
            pad.set(Button::Left, false),
            Some(ControllerMsg::release(Button::Left))
        );
    }

    #[test]
    fn holding_sends_nothing_more() {
        let mut pad = Pad::new();
        pad.set(Button::Right, true);
        assert_eq!(pad.set(Button::Right, true), None);
        assert_eq!(pad.set(Button::Left, false), None);
    }

    #[test]
    fn both_command_is_two_presses_then_two_releases() {
        let mut pad = Pad::new();
        let msgs: Vec<_> = PadCommand::parse("both")
            .unwrap()
            .transitions()
            .into_iter()
            .filter_map(|(b, down)| pad.set(b, down))
            .collect();

        assert_eq!(msgs.len(), 4);
        assert!(msgs[0].pressed && msgs[1].pressed);
        assert!(!msgs[2].pressed && !msgs[3].pressed);
        assert_eq!(pad, Pad::new());
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(PadCommand::parse(" +r "), Some(PadCommand::Press(Button::Right)));
        assert_eq!(PadCommand::parse("fire"), None);
    }

    #[test]
    fn label_follows_role_messages() {
        let mut label = RoleLabel::default();
        assert_eq!(label.text(), "Waiting for a seat");

        assert!(label.apply(&ServerMsg::SetRole {
            role: Role::Shooter
        }));
        assert!(label.text().starts_with("You are the SHOOTER"));
        assert!(label.text().contains("to shoot"));

        assert!(!label.apply(&ServerMsg::SetRole {
            role: Role::Shooter
        }));
        assert!(label.apply(&ServerMsg::SetRole { role: Role::Driver }));
        assert!(label.text().contains("toggle velocity"));
    }
}
