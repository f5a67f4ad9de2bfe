use avanto_ids::ControllerPort;
use avanto_input::{Buttons, InputSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Running,
    Paused,
    GameEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MenuEntry {
    #[default]
    Resume = 0,
    Quit = 1,
}

impl MenuEntry {
    pub fn toggled(self) -> Self {
        match self {
            MenuEntry::Resume => MenuEntry::Quit,
            MenuEntry::Quit => MenuEntry::Resume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseTransition {
    None,
    Paused { controller: ControllerPort },
    Resumed,
    Quit,
    SelectionChanged(MenuEntry),
}

/// Edge-driven pause menu. Only the controller that opened the menu can
/// drive it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PauseMenu {
    state: PauseState,
    controller: ControllerPort,
    selection: MenuEntry,
}

impl PauseMenu {
    pub const PAUSE: Buttons = Buttons::START;
    pub const CONFIRM: Buttons = Buttons::A;
    pub const CANCEL: Buttons = Buttons::B;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PauseState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == PauseState::Paused
    }

    pub fn is_ended(&self) -> bool {
        self.state == PauseState::GameEnded
    }

    /// Controller that opened the menu; meaningless while running.
    pub fn controller(&self) -> ControllerPort {
        self.controller
    }

    pub fn selection(&self) -> MenuEntry {
        self.selection
    }

    /// Latches the end state so no further input is taken.
    pub fn end(&mut self) {
        self.state = PauseState::GameEnded;
    }

    pub fn handle_input(
        &mut self,
        input: &InputSnapshot,
        ports: impl IntoIterator<Item = ControllerPort>,
    ) -> PauseTransition {
        match self.state {
            PauseState::Running => {
                let Some(port) = ports
                    .into_iter()
                    .find(|&port| input.pressed(port).intersects(Self::PAUSE))
                else {
                    return PauseTransition::None;
                };
                self.state = PauseState::Paused;
                self.controller = port;
                self.selection = MenuEntry::Resume;
                log::debug!("paused by controller {}", port.0 + 1);
                PauseTransition::Paused { controller: port }
            }
            PauseState::Paused => self.handle_menu(input),
            PauseState::GameEnded => PauseTransition::None,
        }
    }

    fn handle_menu(&mut self, input: &InputSnapshot) -> PauseTransition {
        let pressed = input.pressed(self.controller);
        let confirm = pressed.intersects(Self::CONFIRM);

        if pressed.intersects(Self::PAUSE | Self::CANCEL)
            || (confirm && self.selection == MenuEntry::Resume)
        {
            self.state = PauseState::Running;
            log::debug!("resumed");
            return PauseTransition::Resumed;
        }
        if confirm {
            self.state = PauseState::GameEnded;
            log::debug!("quit from pause menu");
            return PauseTransition::Quit;
        }
        if pressed.intersects(Buttons::D_LEFT | Buttons::D_RIGHT)
            || input.stick_x_edge(self.controller) != 0
        {
            self.selection = self.selection.toggled();
            log::debug!("pause selection: {:?}", self.selection);
            return PauseTransition::SelectionChanged(self.selection);
        }
        PauseTransition::None
    }
}
