mod buttons;
mod snapshot;
mod tracker;

pub use buttons::Buttons;
pub use snapshot::{ControllerState, InputSnapshot, MAX_PORTS};
pub use tracker::{InputTracker, STICK_EDGE_THRESHOLD};
