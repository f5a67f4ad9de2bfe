use avanto_ids::ControllerPort;
use avanto_input::{Buttons, InputSnapshot, InputTracker, MAX_PORTS};

/// Fraction of each cycle a port keeps Z held.
pub const DEFAULT_DUTIES: [f32; MAX_PORTS] = [0.9, 0.5, 0.2, 0.0];
const CYCLE_SECONDS: f32 = 4.0;
const TAP_SECONDS: f32 = 0.1;
const PAUSE_HOLD_SECONDS: f32 = 1.0;

/// Scripted controllers for headless runs. Port 0 can also open the pause
/// menu once and back out of it.
pub struct Bot {
    tracker: InputTracker,
    duties: [f32; MAX_PORTS],
    time: f32,
    pause_at: Option<f32>,
}

impl Bot {
    pub fn new(duties: [f32; MAX_PORTS]) -> Self {
        Self {
            tracker: InputTracker::new(),
            duties,
            time: 0.0,
            pause_at: None,
        }
    }

    pub fn with_pause_at(mut self, seconds: f32) -> Self {
        self.pause_at = Some(seconds);
        self
    }

    pub fn poll(&mut self, delta_time: f32) -> InputSnapshot {
        self.time += delta_time;
        for (i, duty) in self.duties.iter().enumerate() {
            let phase = (self.time / CYCLE_SECONDS + i as f32 * 0.25).fract();
            let mut held = if phase < *duty { Buttons::Z } else { Buttons::NONE };
            if i == 0 {
                held |= self.menu_buttons();
            }
            self.tracker.feed(ControllerPort(i as u8), held, 0.0);
        }
        self.tracker.take()
    }

    fn menu_buttons(&self) -> Buttons {
        let Some(at) = self.pause_at else {
            return Buttons::NONE;
        };
        let since = self.time - at;
        if (0.0..TAP_SECONDS).contains(&since) {
            Buttons::START
        } else if (PAUSE_HOLD_SECONDS..PAUSE_HOLD_SECONDS + TAP_SECONDS).contains(&since) {
            Buttons::B
        } else {
            Buttons::NONE
        }
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(DEFAULT_DUTIES)
    }
}
