use crate::{ActorDraw, OverlayCommand, RenderBridge, RenderCommand};
use avanto_ids::{ActorID, DrawableID};

/// Headless backend. Keeps the last presented frame so callers can inspect
/// what would have been drawn.
#[derive(Default)]
pub struct NullGraphics {
    bound: Vec<Option<(DrawableID, ActorDraw)>>,
    next_drawable_index: u32,
    pending: Vec<RenderCommand>,
    last_frame: Vec<RenderCommand>,
    frames_presented: u64,
}

impl NullGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_drawable(&mut self) -> DrawableID {
        let id = DrawableID::from_parts(self.next_drawable_index, 0);
        self.next_drawable_index = self.next_drawable_index.saturating_add(1);
        id
    }

    pub fn bound(&self, actor: ActorID) -> Option<&ActorDraw> {
        self.bound
            .get(actor.index())
            .and_then(|b| b.as_ref())
            .map(|(_, draw)| draw)
    }

    pub fn pending(&self) -> &[RenderCommand] {
        &self.pending
    }

    pub fn last_frame(&self) -> &[RenderCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Text of every overlay string in the last frame, in submit order.
    pub fn last_frame_text(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Overlay(OverlayCommand::Text(t)) => Some(t.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderBridge for NullGraphics {
    fn bind(&mut self, draw: ActorDraw) -> DrawableID {
        let index = draw.actor.index();
        if self.bound.len() <= index {
            self.bound.resize(index + 1, None);
        }
        if let Some((id, slot)) = self.bound[index].as_mut() {
            *slot = draw;
            return *id;
        }
        let id = self.alloc_drawable();
        self.bound[index] = Some((id, draw));
        id
    }

    fn submit(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Present => {
                self.last_frame = std::mem::take(&mut self.pending);
                self.frames_presented += 1;
            }
            other => self.pending.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OverlayText, TextStyle};

    fn draw(actor: u8, x: f32) -> ActorDraw {
        let mut model = [[0.0; 4]; 4];
        model[3][0] = x;
        ActorDraw {
            actor: ActorID(actor),
            model,
            clip: None,
            tint: [0xff; 4],
        }
    }

    #[test]
    fn rebinding_keeps_the_handle() {
        let mut gfx = NullGraphics::new();
        let first = gfx.bind(draw(2, 1.0));
        let other = gfx.bind(draw(0, 0.0));
        let again = gfx.bind(draw(2, 5.0));
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(gfx.bound(ActorID(2)).map(|d| d.model[3][0]), Some(5.0));
    }

    #[test]
    fn present_swaps_the_frame() {
        let mut gfx = NullGraphics::new();
        let id = gfx.bind(draw(0, 0.0));
        gfx.draw(id);
        gfx.overlay(OverlayCommand::Text(OverlayText::new(
            10,
            235,
            TextStyle::Normal,
            "FPS: 30.00",
        )));
        assert_eq!(gfx.pending().len(), 2);
        assert!(gfx.last_frame().is_empty());

        gfx.present();
        assert!(gfx.pending().is_empty());
        assert_eq!(gfx.last_frame().len(), 2);
        assert_eq!(gfx.last_frame_text(), vec!["FPS: 30.00"]);
        assert_eq!(gfx.frames_presented(), 1);
    }
}
