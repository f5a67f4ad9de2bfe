use avanto_ids::{ActorID, ClipID};
use avanto_nodes::{Actor, Clip, ClipSet};
use avanto_render_bridge::Rgba8;
use avanto_timeline::MotionClips;

pub const PLAYER_COUNT: usize = 4;
pub const PLAYER_SCALE: f32 = 2.5;

pub const WALK: ClipID = ClipID(0);
pub const CLIMB: ClipID = ClipID(1);
pub const SIT: ClipID = ClipID(2);
pub const BEND: ClipID = ClipID(3);
pub const UNBEND: ClipID = ClipID(4);
pub const STAND_UP: ClipID = ClipID(5);
pub const PASS_OUT: ClipID = ClipID(6);

pub const MOTION_CLIPS: MotionClips = MotionClips {
    walk: WALK,
    climb: CLIMB,
};

pub const PLAYER_COLORS: [Rgba8; PLAYER_COUNT] = [
    [0xff, 0x00, 0x00, 0xff],
    [0x00, 0xff, 0x00, 0xff],
    [0x00, 0x00, 0xff, 0xff],
    [0xff, 0xff, 0x00, 0xff],
];

/// Clip table every participant shares; ids match the constants above.
pub fn player_clips() -> ClipSet {
    ClipSet::new()
        .with_clip(Clip::new("walking", 1.0, true))
        .with_clip(Clip::new("climbing", 1.2, false))
        .with_clip(Clip::new("sitting", 0.8, false))
        .with_clip(Clip::new("bending", 0.5, false))
        .with_clip(Clip::new("unbending", 0.5, false))
        .with_clip(Clip::new("standing_up", 0.8, false))
        .with_clip(Clip::new("passing_out", 1.5, false))
}

pub fn player_actors() -> Vec<Actor> {
    (0..PLAYER_COUNT)
        .map(|i| Actor::new(ActorID(i as u8), player_clips(), PLAYER_SCALE))
        .collect()
}
