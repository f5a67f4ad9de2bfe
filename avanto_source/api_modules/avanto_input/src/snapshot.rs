use crate::Buttons;
use avanto_ids::ControllerPort;

pub const MAX_PORTS: usize = 4;

/// What one controller did since the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    /// Newly pressed this poll.
    pub pressed: Buttons,
    pub held: Buttons,
    /// -1 or 1 on the poll the stick crosses into that side, else 0.
    pub stick_x_edge: i8,
}

/// Polled input for every port. Unknown ports read as idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    ports: [ControllerState; MAX_PORTS],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(&self, port: ControllerPort) -> ControllerState {
        self.ports.get(port.index()).copied().unwrap_or_default()
    }

    pub fn port_mut(&mut self, port: ControllerPort) -> Option<&mut ControllerState> {
        self.ports.get_mut(port.index())
    }

    pub fn pressed(&self, port: ControllerPort) -> Buttons {
        self.port(port).pressed
    }

    pub fn held(&self, port: ControllerPort) -> Buttons {
        self.port(port).held
    }

    pub fn stick_x_edge(&self, port: ControllerPort) -> i8 {
        self.port(port).stick_x_edge
    }

    pub fn with_pressed(mut self, port: ControllerPort, buttons: Buttons) -> Self {
        if let Some(state) = self.port_mut(port) {
            state.pressed |= buttons;
            state.held |= buttons;
        }
        self
    }

    pub fn with_held(mut self, port: ControllerPort, buttons: Buttons) -> Self {
        if let Some(state) = self.port_mut(port) {
            state.held |= buttons;
        }
        self
    }

    pub fn with_stick_edge(mut self, port: ControllerPort, edge: i8) -> Self {
        if let Some(state) = self.port_mut(port) {
            state.stick_x_edge = edge.signum();
        }
        self
    }
}
