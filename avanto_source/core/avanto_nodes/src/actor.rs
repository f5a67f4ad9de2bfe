use crate::ClipSet;
use avanto_ids::{ActorID, ClipID};
use avanto_structs::{Transform3D, Vec3};

/// One participant in the minigame.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorID,
    pub position: Vec3,
    /// Facing angle about the vertical axis, radians.
    pub rotation: f32,
    pub scale: f32,
    pub clips: ClipSet,
    pub current_clip: Option<ClipID>,
    pub visible: bool,
    /// Stage-defined status in 0..=1 (heat exposure in the sauna).
    pub status: f32,
    pub eliminated: bool,
}

impl Actor {
    pub fn new(id: ActorID, clips: ClipSet, scale: f32) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            rotation: 0.0,
            scale,
            clips,
            current_clip: None,
            visible: false,
            status: 0.0,
            eliminated: false,
        }
    }

    pub fn transform(&self) -> Transform3D {
        Transform3D::from_yaw(self.position, self.rotation, self.scale)
    }

    /// Back to the state a fresh session starts from; keeps the clip table.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.rotation = 0.0;
        self.current_clip = None;
        self.visible = false;
        self.status = 0.0;
        self.eliminated = false;
    }
}
