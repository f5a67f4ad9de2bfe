mod actor;
mod animation;
mod clip;

pub use actor::Actor;
pub use animation::{AnimationPlayer, ClipBinding, ClipTablePlayer};
pub use clip::{Clip, ClipSet};
