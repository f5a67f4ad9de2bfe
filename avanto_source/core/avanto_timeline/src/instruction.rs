use avanto_ids::{ClipID, MusicID, SoundID};
use avanto_structs::Vec2;

/// One authored timeline step. Ground-plane targets are `(x, z)` pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instruction {
    Wait { duration: f32 },
    WalkTo { target: Vec2 },
    WarpTo { target: Vec2 },
    ClimbTo { target: Vec2 },
    /// `speed` is signed radians per second and must be non-zero.
    RotateTo { angle: f32, speed: f32 },
    StartClip { clip: ClipID },
    PlayWholeClip { clip: ClipID },
    SetVisible(bool),
    PlaySound(SoundID),
    PlayMusic { music: MusicID, first_channel: u8 },
    End,
}

impl Instruction {
    /// Instructions that never hold the cursor.
    pub fn is_instant(&self) -> bool {
        matches!(
            self,
            Self::WarpTo { .. }
                | Self::StartClip { .. }
                | Self::SetVisible(_)
                | Self::PlaySound(_)
                | Self::PlayMusic { .. }
                | Self::End
        )
    }
}

/// Immutable instruction list, terminated by [`Instruction::End`].
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    name: String,
    instructions: Vec<Instruction>,
}

impl Script {
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        debug_assert!(
            matches!(instructions.last(), Some(Instruction::End)),
            "timeline scripts must end with Instruction::End"
        );
        Self {
            name: name.into(),
            instructions,
        }
    }

    pub fn builder(name: impl Into<String>) -> ScriptBuilder {
        ScriptBuilder {
            name: name.into(),
            instructions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Reading past the list yields `End`.
    #[inline]
    pub fn get(&self, index: usize) -> Instruction {
        self.instructions
            .get(index)
            .copied()
            .unwrap_or(Instruction::End)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Chainable authoring helper; `end()` seals the script.
#[derive(Debug)]
pub struct ScriptBuilder {
    name: String,
    instructions: Vec<Instruction>,
}

impl ScriptBuilder {
    pub fn push(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn wait(self, duration: f32) -> Self {
        self.push(Instruction::Wait { duration })
    }

    pub fn walk_to(self, x: f32, z: f32) -> Self {
        self.push(Instruction::WalkTo {
            target: Vec2::new(x, z),
        })
    }

    pub fn warp_to(self, x: f32, z: f32) -> Self {
        self.push(Instruction::WarpTo {
            target: Vec2::new(x, z),
        })
    }

    pub fn climb_to(self, x: f32, z: f32) -> Self {
        self.push(Instruction::ClimbTo {
            target: Vec2::new(x, z),
        })
    }

    pub fn rotate_to(self, angle: f32, speed: f32) -> Self {
        debug_assert!(speed != 0.0, "rotate_to speed must be non-zero");
        self.push(Instruction::RotateTo { angle, speed })
    }

    pub fn start_clip(self, clip: ClipID) -> Self {
        self.push(Instruction::StartClip { clip })
    }

    pub fn play_whole_clip(self, clip: ClipID) -> Self {
        self.push(Instruction::PlayWholeClip { clip })
    }

    pub fn set_visible(self, visible: bool) -> Self {
        self.push(Instruction::SetVisible(visible))
    }

    pub fn play_sound(self, sound: SoundID) -> Self {
        self.push(Instruction::PlaySound(sound))
    }

    pub fn play_music(self, music: MusicID, first_channel: u8) -> Self {
        self.push(Instruction::PlayMusic {
            music,
            first_channel,
        })
    }

    pub fn end(self) -> Script {
        let mut instructions = self.instructions;
        instructions.push(Instruction::End);
        Script::new(self.name, instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_end() {
        let script = Script::builder("enter")
            .warp_to(0.0, -40.0)
            .set_visible(true)
            .walk_to(0.0, 10.0)
            .end();
        assert_eq!(script.name(), "enter");
        assert_eq!(script.len(), 4);
        assert_eq!(script.get(3), Instruction::End);
    }

    #[test]
    fn reading_past_the_end_is_end() {
        let script = Script::builder("empty").end();
        assert_eq!(script.get(0), Instruction::End);
        assert_eq!(script.get(42), Instruction::End);
    }

    #[test]
    fn instant_instructions() {
        assert!(Instruction::SetVisible(true).is_instant());
        assert!(Instruction::End.is_instant());
        assert!(!Instruction::Wait { duration: 0.5 }.is_instant());
        assert!(
            !Instruction::PlayWholeClip {
                clip: ClipID(0)
            }
            .is_instant()
        );
    }
}
