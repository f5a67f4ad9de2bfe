use crate::Actor;
use avanto_ids::{ActorID, ClipID};

/// Skeletal playback collaborator. The simulation binds clips and asks for
/// their length; sampling and skinning happen on the other side.
pub trait AnimationPlayer {
    /// Binds `clip` to `actor`, looping if the actor's clip table says so.
    fn bind_clip(&mut self, actor: &Actor, clip: ClipID);
    fn set_playing(&mut self, actor: ActorID, playing: bool);

    fn duration(&self, actor: &Actor, clip: ClipID) -> f32 {
        actor.clips.duration(clip)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipBinding {
    pub clip: ClipID,
    pub playing: bool,
    pub looping: bool,
}

/// Player driven by each actor's authored clip table. Only tracks which clip
/// is bound and how it plays; the clip data stays on the actor.
#[derive(Clone, Debug, Default)]
pub struct ClipTablePlayer {
    bindings: Vec<Option<ClipBinding>>,
}

impl ClipTablePlayer {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn binding(&self, actor: ActorID) -> Option<ClipBinding> {
        self.bindings.get(actor.index()).copied().flatten()
    }

    pub fn is_looping(&self, actor: ActorID) -> bool {
        self.binding(actor).is_some_and(|b| b.looping)
    }
}

impl AnimationPlayer for ClipTablePlayer {
    fn bind_clip(&mut self, actor: &Actor, clip: ClipID) {
        let Some(entry) = actor.clips.get(clip) else {
            log::warn!("actor {} has no clip {clip}", actor.id);
            return;
        };
        let index = actor.id.index();
        if self.bindings.len() <= index {
            self.bindings.resize(index + 1, None);
        }
        self.bindings[index] = Some(ClipBinding {
            clip,
            playing: false,
            looping: entry.looping,
        });
    }

    fn set_playing(&mut self, actor: ActorID, playing: bool) {
        if let Some(binding) = self
            .bindings
            .get_mut(actor.index())
            .and_then(Option::as_mut)
        {
            binding.playing = playing;
        }
    }
}
