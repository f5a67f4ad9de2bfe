use avanto_ids::ClipID;

/// Authored animation clip metadata. Playback itself belongs to the
/// animation collaborator; the simulation only needs timing.
#[derive(Clone, Debug, PartialEq)]
pub struct Clip {
    pub name: String,
    pub duration: f32,
    pub looping: bool,
}

impl Clip {
    pub fn new(name: impl Into<String>, duration: f32, looping: bool) -> Self {
        Self {
            name: name.into(),
            duration,
            looping,
        }
    }
}

/// Named clip table. Clip ids are positions in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipSet {
    clips: Vec<Clip>,
}

impl ClipSet {
    pub fn new() -> Self {
        Self { clips: Vec::new() }
    }

    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.push(clip);
        self
    }

    pub fn push(&mut self, clip: Clip) -> ClipID {
        let id = ClipID(self.clips.len() as u16);
        self.clips.push(clip);
        id
    }

    pub fn get(&self, id: ClipID) -> Option<&Clip> {
        self.clips.get(id.index())
    }

    pub fn get_mut(&mut self, id: ClipID) -> Option<&mut Clip> {
        self.clips.get_mut(id.index())
    }

    pub fn find(&self, name: &str) -> Option<ClipID> {
        self.clips
            .iter()
            .position(|c| c.name == name)
            .map(|i| ClipID(i as u16))
    }

    /// Authored duration, 0 for an unknown clip.
    pub fn duration(&self, id: ClipID) -> f32 {
        self.get(id).map_or(0.0, |c| c.duration)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut set = ClipSet::new();
        let walk = set.push(Clip::new("walking", 1.0, true));
        let climb = set.push(Clip::new("climbing", 1.5, false));
        assert_eq!(walk, ClipID(0));
        assert_eq!(climb, ClipID(1));
        assert_eq!(set.find("climbing"), Some(climb));
        assert_eq!(set.find("swimming"), None);
    }

    #[test]
    fn duration_of_unknown_clip_is_zero() {
        let set = ClipSet::new().with_clip(Clip::new("sitting", 0.8, false));
        assert_eq!(set.duration(ClipID(0)), 0.8);
        assert_eq!(set.duration(ClipID(9)), 0.0);
    }
}
