use crate::{Buttons, ControllerState, InputSnapshot, MAX_PORTS};
use avanto_ids::ControllerPort;

/// Normalised stick deflection that counts as leaning to one side.
pub const STICK_EDGE_THRESHOLD: f32 = 0.5;

/// Turns raw held state into per-poll edges. Feed every port, then take the
/// snapshot once per frame.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: [Buttons; MAX_PORTS],
    stick_side: [i8; MAX_PORTS],
    current: InputSnapshot,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `stick_x` is normalised to -1..=1.
    pub fn feed(&mut self, port: ControllerPort, held: Buttons, stick_x: f32) {
        let index = port.index();
        if index >= MAX_PORTS {
            return;
        }

        let side = if stick_x >= STICK_EDGE_THRESHOLD {
            1
        } else if stick_x <= -STICK_EDGE_THRESHOLD {
            -1
        } else {
            0
        };
        let edge = if side != 0 && side != self.stick_side[index] {
            side
        } else {
            0
        };

        if let Some(state) = self.current.port_mut(port) {
            *state = ControllerState {
                pressed: held & !self.previous[index],
                held,
                stick_x_edge: edge,
            };
        }
        self.previous[index] = held;
        self.stick_side[index] = side;
    }

    /// Current snapshot; edges are cleared so the next frame starts idle
    /// for ports that are not fed again.
    pub fn take(&mut self) -> InputSnapshot {
        let snapshot = self.current;
        for index in 0..MAX_PORTS {
            if let Some(state) = self.current.port_mut(ControllerPort(index as u8)) {
                state.pressed = Buttons::NONE;
                state.stick_x_edge = 0;
            }
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: ControllerPort = ControllerPort(0);

    #[test]
    fn press_is_reported_once() {
        let mut tracker = InputTracker::new();
        tracker.feed(P0, Buttons::START, 0.0);
        assert_eq!(tracker.take().pressed(P0), Buttons::START);
        tracker.feed(P0, Buttons::START, 0.0);
        let snap = tracker.take();
        assert!(snap.pressed(P0).is_empty());
        assert!(snap.held(P0).contains(Buttons::START));
    }

    #[test]
    fn release_then_press_is_a_new_edge() {
        let mut tracker = InputTracker::new();
        tracker.feed(P0, Buttons::A, 0.0);
        tracker.take();
        tracker.feed(P0, Buttons::NONE, 0.0);
        tracker.take();
        tracker.feed(P0, Buttons::A, 0.0);
        assert_eq!(tracker.take().pressed(P0), Buttons::A);
    }

    #[test]
    fn stick_edges_fire_on_crossing() {
        let mut tracker = InputTracker::new();
        let mut edges = Vec::new();
        for x in [0.0, 0.7, 0.9, 0.1, -0.8, -0.8, 0.6] {
            tracker.feed(P0, Buttons::NONE, x);
            edges.push(tracker.take().stick_x_edge(P0));
        }
        assert_eq!(edges, vec![0, 1, 0, 0, -1, 0, 1]);
    }

    #[test]
    fn unfed_frame_has_no_edges() {
        let mut tracker = InputTracker::new();
        tracker.feed(P0, Buttons::B, 1.0);
        tracker.take();
        let snap = tracker.take();
        assert!(snap.pressed(P0).is_empty());
        assert_eq!(snap.stick_x_edge(P0), 0);
    }
}
