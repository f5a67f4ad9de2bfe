//! Scripted actor timelines: authored instruction lists replayed against an
//! actor with exact carry-over of surplus time between instructions.

mod cursor;
mod host;
mod instruction;

pub use cursor::{Progress, TimelineCursor};
pub use host::{MotionClips, TimelineHost, WALK_SPEED};
pub use instruction::{Instruction, Script, ScriptBuilder};
