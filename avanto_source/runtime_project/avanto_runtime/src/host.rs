/// How the game came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The last stage finished.
    Completed,
    /// Quit from the pause menu.
    Quit,
    /// The embedder tore the session down.
    Shutdown,
}

/// The only signals that leave the core.
pub trait Host {
    fn report_stage_done(&mut self, stage: &str);
    fn report_game_ended(&mut self, reason: EndReason);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    StageDone(String),
    GameEnded(EndReason),
}

/// Host that just keeps what it was told.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.events.iter().find_map(|e| match e {
            HostEvent::GameEnded(reason) => Some(*reason),
            HostEvent::StageDone(_) => None,
        })
    }
}

impl Host for RecordingHost {
    fn report_stage_done(&mut self, stage: &str) {
        self.events.push(HostEvent::StageDone(stage.to_string()));
    }

    fn report_game_ended(&mut self, reason: EndReason) {
        self.events.push(HostEvent::GameEnded(reason));
    }
}
