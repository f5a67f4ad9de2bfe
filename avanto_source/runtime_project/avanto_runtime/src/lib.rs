mod fps;
mod game;
mod host;
mod orchestrator;
mod pause;
mod session;
mod stage;
mod stepper;

pub mod hud;
pub mod overlay;
pub mod roster;

pub use fps::{DEFAULT_BATCH_SECONDS, FpsCounter};
pub use game::{Game, RUNNING_VOLUME};
pub use host::{EndReason, Host, HostEvent, RecordingHost};
pub use orchestrator::{StageOrchestrator, StageOutcome};
pub use pause::{MenuEntry, PauseMenu, PauseState, PauseTransition};
pub use session::Session;
pub use stage::{RenderContext, Stage, StageContext, StageFlags};
pub use stepper::FixedStepper;
