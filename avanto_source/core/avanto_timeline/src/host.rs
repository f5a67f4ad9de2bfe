use avanto_ids::{ClipID, MusicID, SoundID};
use avanto_nodes::AnimationPlayer;

/// Ground speed used by `WalkTo`, world units per second.
pub const WALK_SPEED: f32 = 100.0;

/// Clips bound by the locomotion instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionClips {
    pub walk: ClipID,
    pub climb: ClipID,
}

/// Everything a timeline reaches outside its own actor. Audio calls are
/// fire-and-forget; nothing here may block.
pub trait TimelineHost {
    fn animation(&mut self) -> &mut dyn AnimationPlayer;

    fn motion_clips(&self) -> MotionClips;

    fn walk_speed(&self) -> f32 {
        WALK_SPEED
    }

    /// One-shot effect; the host picks the channel.
    fn play_sound(&mut self, sound: SoundID);

    fn play_music(&mut self, music: MusicID, first_channel: u8);
}
