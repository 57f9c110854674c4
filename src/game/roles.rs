//! Seat assignment by connection order

use crate::ws::protocol::Role;
use crate::ws::transport::DeviceId;

/// Number of playable seats
pub const SEAT_COUNT: usize = 2;

/// Ordered list of seated controllers plus any extra connections.
///
/// Index 0 is always the driver and index 1 the shooter. Controllers that
/// connect while both seats are taken are remembered as spectators and
/// never promoted; a freed seat goes to the next controller that connects.
#[derive(Debug, Default)]
pub struct RoleManager {
    seats: Vec<DeviceId>,
    spectators: Vec<DeviceId>,
}

impl RoleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. Returns the full assignment list to broadcast
    /// when the device took a seat, or `None` when it became a spectator.
    pub fn connect(&mut self, device_id: DeviceId) -> Option<Vec<(DeviceId, Role)>> {
        if self.seats.contains(&device_id) || self.spectators.contains(&device_id) {
            return None;
        }

        if self.seats.len() < SEAT_COUNT {
            self.seats.push(device_id);
            Some(self.assignments())
        } else {
            self.spectators.push(device_id);
            None
        }
    }

    /// Remove a connection. Returns the assignment list to re-broadcast when a
    /// seated device left; unknown devices and spectators yield `None`.
    pub fn disconnect(&mut self, device_id: DeviceId) -> Option<Vec<(DeviceId, Role)>> {
        if let Some(index) = self.seats.iter().position(|id| *id == device_id) {
            self.seats.remove(index);
            return Some(self.assignments());
        }

        self.spectators.retain(|id| *id != device_id);
        None
    }

    /// Role of a device, derived from its current seat
    pub fn role_of(&self, device_id: DeviceId) -> Option<Role> {
        self.seats
            .iter()
            .position(|id| *id == device_id)
            .and_then(role_for_seat)
    }

    pub fn holder(&self, role: Role) -> Option<DeviceId> {
        let seat = match role {
            Role::Driver => 0,
            Role::Shooter => 1,
        };
        self.seats.get(seat).copied()
    }

    /// Current role of every seated device, in seat order
    pub fn assignments(&self) -> Vec<(DeviceId, Role)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(seat, id)| role_for_seat(seat).map(|role| (*id, role)))
            .collect()
    }

    pub fn seated(&self) -> usize {
        self.seats.len()
    }

    pub fn spectators(&self) -> usize {
        self.spectators.len()
    }
}

fn role_for_seat(seat: usize) -> Option<Role> {
    match seat {
        0 => Some(Role::Driver),
        1 => Some(Role::Shooter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [DeviceId; N] {
        std::array::from_fn(|_| DeviceId::new())
    }

    #[test]
    fn first_two_connections_take_driver_then_shooter() {
        let [a, b] = ids();
        let mut roles = RoleManager::new();

        assert_eq!(roles.connect(a), Some(vec![(a, Role::Driver)]));
        assert_eq!(
            roles.connect(b),
            Some(vec![(a, Role::Driver), (b, Role::Shooter)])
        );
    }

    #[test]
    fn third_connection_gets_no_role() {
        let [a, b, c] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);
        roles.connect(b);

        assert_eq!(roles.connect(c), None);
        assert_eq!(roles.role_of(c), None);
        assert_eq!(roles.spectators(), 1);
        assert_eq!(roles.seated(), 2);
    }

    #[test]
    fn driver_leaving_promotes_shooter() {
        let [a, b] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);
        roles.connect(b);

        assert_eq!(roles.disconnect(a), Some(vec![(b, Role::Driver)]));
        assert_eq!(roles.role_of(b), Some(Role::Driver));
        assert_eq!(roles.holder(Role::Shooter), None);
    }

    #[test]
    fn connect_disconnect_scenario() {
        let [a, b, c, d] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);
        roles.connect(b);
        roles.connect(c);
        assert_eq!(roles.role_of(a), Some(Role::Driver));
        assert_eq!(roles.role_of(b), Some(Role::Shooter));
        assert_eq!(roles.role_of(c), None);

        roles.disconnect(a);
        assert_eq!(roles.role_of(b), Some(Role::Driver));
        assert_eq!(roles.role_of(c), None);
        assert_eq!(roles.holder(Role::Shooter), None);

        assert_eq!(
            roles.connect(d),
            Some(vec![(b, Role::Driver), (d, Role::Shooter)])
        );
        assert_eq!(roles.role_of(c), None);
    }

    #[test]
    fn unknown_disconnect_is_noop() {
        let [a, stranger] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);

        assert_eq!(roles.disconnect(stranger), None);
        assert_eq!(roles.assignments(), vec![(a, Role::Driver)]);
    }

    #[test]
    fn spectator_disconnect_sends_nothing() {
        let [a, b, c] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);
        roles.connect(b);
        roles.connect(c);

        assert_eq!(roles.disconnect(c), None);
        assert_eq!(roles.spectators(), 0);
    }

    #[test]
    fn duplicate_connect_is_ignored() {
        let [a] = ids();
        let mut roles = RoleManager::new();
        roles.connect(a);
        assert_eq!(roles.connect(a), None);
        assert_eq!(roles.seated(), 1);
    }

    #[test]
    fn seat_zero_is_always_driver() {
        let devices: [DeviceId; 6] = ids();
        let mut roles = RoleManager::new();

        // interleave connects and disconnects
        for (step, id) in devices.iter().enumerate() {
            roles.connect(*id);
            if step % 2 == 1 {
                roles.disconnect(devices[step - 1]);
            }
            let assignments = roles.assignments();
            assert!(assignments.len() <= SEAT_COUNT);
            if let Some((_, role)) = assignments.first() {
                assert_eq!(*role, Role::Driver);
            }
            if let Some((_, role)) = assignments.get(1) {
                assert_eq!(*role, Role::Shooter);
            }
        }
    }
}
