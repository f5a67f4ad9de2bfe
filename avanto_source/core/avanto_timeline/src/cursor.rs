use crate::{Instruction, Script, TimelineHost};
use avanto_ids::{ActorID, ClipID};
use avanto_nodes::Actor;
use avanto_structs::Vec2;
use std::f32::consts::TAU;
use std::sync::Arc;

/// Leftover time below this is treated as exhausted.
const EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Running,
    Finished,
}

impl Progress {
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Motion {
    Walk,
    Climb,
}

/// Position of one actor inside a script plus time spent in the current step.
#[derive(Clone, Debug)]
pub struct TimelineCursor {
    actor: ActorID,
    script: Arc<Script>,
    index: usize,
    elapsed: f32,
    entered: bool,
    finished: bool,
}

impl TimelineCursor {
    pub fn new(actor: ActorID, script: Arc<Script>) -> Self {
        log::trace!("timeline `{}` starts on actor {actor}", script.name());
        Self {
            actor,
            script,
            index: 0,
            elapsed: 0.0,
            entered: false,
            finished: false,
        }
    }

    pub fn actor(&self) -> ActorID {
        self.actor
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances by `delta_time`, running as many instructions as the time
    /// covers. Surplus from a completed step flows into the next one.
    pub fn advance(
        &mut self,
        actor: &mut Actor,
        host: &mut dyn TimelineHost,
        delta_time: f32,
    ) -> Progress {
        debug_assert_eq!(actor.id, self.actor, "cursor driven with the wrong actor");
        if self.finished {
            return Progress::Finished;
        }

        let mut remaining = delta_time.max(0.0);
        loop {
            let instruction = self.script.get(self.index);
            let done = match instruction {
                Instruction::End => {
                    self.finished = true;
                    log::trace!(
                        "timeline `{}` finished on actor {}",
                        self.script.name(),
                        self.actor
                    );
                    return Progress::Finished;
                }
                Instruction::WarpTo { target } => {
                    actor.position.x = target.x;
                    actor.position.z = target.y;
                    true
                }
                Instruction::SetVisible(visible) => {
                    actor.visible = visible;
                    true
                }
                Instruction::StartClip { clip } => {
                    start_clip(actor, host, clip);
                    true
                }
                Instruction::PlaySound(sound) => {
                    host.play_sound(sound);
                    true
                }
                Instruction::PlayMusic {
                    music,
                    first_channel,
                } => {
                    host.play_music(music, first_channel);
                    true
                }
                Instruction::Wait { duration } => self.consume(duration, &mut remaining),
                Instruction::PlayWholeClip { clip } => {
                    if !self.entered {
                        self.entered = true;
                        start_clip(actor, host, clip);
                    }
                    let duration = host.animation().duration(actor, clip);
                    self.consume(duration, &mut remaining)
                }
                Instruction::WalkTo { target } => {
                    self.step_motion(Motion::Walk, target, actor, host, &mut remaining)
                }
                Instruction::ClimbTo { target } => {
                    self.step_motion(Motion::Climb, target, actor, host, &mut remaining)
                }
                Instruction::RotateTo { angle, speed } => {
                    self.step_rotation(angle, speed, actor, &mut remaining)
                }
            };

            if !done {
                return Progress::Running;
            }
            self.next();
        }
    }

    fn next(&mut self) {
        self.index += 1;
        self.elapsed = 0.0;
        self.entered = false;
        log::trace!(
            "timeline `{}` actor {} -> step {} {:?}",
            self.script.name(),
            self.actor,
            self.index,
            self.script.get(self.index)
        );
    }

    /// Spends time on a fixed-length step. Returns true once it is over,
    /// leaving the surplus in `remaining`.
    fn consume(&mut self, duration: f32, remaining: &mut f32) -> bool {
        let left = duration - self.elapsed;
        if *remaining >= left {
            *remaining = (*remaining - left).max(0.0);
            true
        } else {
            self.elapsed += *remaining;
            *remaining = 0.0;
            false
        }
    }

    fn step_motion(
        &mut self,
        motion: Motion,
        target: Vec2,
        actor: &mut Actor,
        host: &mut dyn TimelineHost,
        remaining: &mut f32,
    ) -> bool {
        let clips = host.motion_clips();
        let clip = match motion {
            Motion::Walk => clips.walk,
            Motion::Climb => clips.climb,
        };

        if !self.entered {
            self.entered = true;
            start_clip(actor, host, clip);
            let dx = target.x - actor.position.x;
            let dz = target.y - actor.position.z;
            actor.rotation = -dx.atan2(dz);
        }

        let diff = Vec2::new(target.x - actor.position.x, target.y - actor.position.z);
        let time_to_end = match motion {
            Motion::Walk => {
                let speed = host.walk_speed();
                debug_assert!(speed > 0.0, "walk speed must be positive");
                diff.length() / speed
            }
            Motion::Climb => host.animation().duration(actor, clip) - self.elapsed,
        };

        if time_to_end - *remaining < EPS {
            *remaining = (*remaining - time_to_end).max(0.0);
            actor.position.x = target.x;
            actor.position.z = target.y;
            true
        } else {
            let ratio = *remaining / time_to_end;
            actor.position.x += ratio * diff.x;
            actor.position.z += ratio * diff.y;
            self.elapsed += *remaining;
            *remaining = 0.0;
            false
        }
    }

    fn step_rotation(&mut self, angle: f32, speed: f32, actor: &mut Actor, remaining: &mut f32) -> bool {
        debug_assert!(speed != 0.0, "rotate_to speed must be non-zero");

        // Pick the representation of `angle` reached by turning the way
        // `speed` points.
        let mut target = angle;
        if speed > 0.0 && target < actor.rotation {
            target += TAU;
        } else if speed < 0.0 && target > actor.rotation {
            target -= TAU;
        }

        let time_to_end = (target - actor.rotation) / speed;
        if time_to_end - *remaining < EPS {
            *remaining = (*remaining - time_to_end).max(0.0);
            actor.rotation = angle;
            true
        } else {
            actor.rotation += speed * *remaining;
            self.elapsed += *remaining;
            *remaining = 0.0;
            false
        }
    }
}

fn start_clip(actor: &mut Actor, host: &mut dyn TimelineHost, clip: ClipID) {
    actor.current_clip = Some(clip);
    let animation = host.animation();
    animation.bind_clip(actor, clip);
    animation.set_playing(actor.id, true);
}
