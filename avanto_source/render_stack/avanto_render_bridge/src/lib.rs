use avanto_ids::{ActorID, ClipID, DrawableID, ParticleSourceID};
use bytemuck::{Pod, Zeroable};

mod null;

pub use null::NullGraphics;

pub type Rgba8 = [u8; 4];

pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 240;

/// Two particles in one record. A size of 0 marks that half as dead.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ParticlePair {
    pub pos_a: [i8; 3],
    pub size_a: i8,
    pub pos_b: [i8; 3],
    pub size_b: i8,
    pub color_a: Rgba8,
    pub color_b: Rgba8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorDraw {
    pub actor: ActorID,
    pub model: [[f32; 4]; 4],
    pub clip: Option<ClipID>,
    pub tint: Rgba8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch {
    pub source: ParticleSourceID,
    pub model: [[f32; 4]; 4],
    /// `ParticlePair` records as raw bytes.
    pub records: Vec<u8>,
    pub particle_count: u32,
}

impl ParticleBatch {
    pub fn pairs(&self) -> &[ParticlePair] {
        bytemuck::cast_slice(&self.records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Normal,
    Timer,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Banner,
    Timer,
    /// Player colour, 0-based port.
    Player(u8),
    Out,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    pub x: i32,
    pub y: i32,
    /// Wrap/alignment box; `None` draws unbounded.
    pub width: Option<i32>,
    pub align: TextAlign,
    pub font: Font,
    pub style: TextStyle,
    pub text: String,
}

impl OverlayText {
    pub fn new(x: i32, y: i32, style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width: None,
            align: TextAlign::Left,
            font: Font::Normal,
            style,
            text: text.into(),
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn boxed(mut self, width: i32, align: TextAlign) -> Self {
        self.width = Some(width);
        self.align = align;
        self
    }
}

/// 2D pass drawn on top of the scene with depth testing off.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    /// Multiplies the whole screen by `color`.
    Dim { color: Rgba8 },
    FillRect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgba8,
    },
    Text(OverlayText),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Draw { drawable: DrawableID },
    Particles(ParticleBatch),
    Overlay(OverlayCommand),
    Present,
}

pub trait RenderBridge {
    /// Binding an already bound actor refreshes its transform and clip and
    /// hands back the same drawable.
    fn bind(&mut self, draw: ActorDraw) -> DrawableID;

    fn submit(&mut self, command: RenderCommand);

    fn submit_many<I>(&mut self, commands: I)
    where
        I: IntoIterator<Item = RenderCommand>,
        Self: Sized,
    {
        for command in commands {
            self.submit(command);
        }
    }

    fn draw(&mut self, drawable: DrawableID) {
        self.submit(RenderCommand::Draw { drawable });
    }

    fn submit_particles(
        &mut self,
        source: ParticleSourceID,
        model: [[f32; 4]; 4],
        pairs: &[ParticlePair],
    ) {
        self.submit(RenderCommand::Particles(ParticleBatch {
            source,
            model,
            records: bytemuck::cast_slice(pairs).to_vec(),
            particle_count: (pairs.len() * 2) as u32,
        }));
    }

    fn overlay(&mut self, command: OverlayCommand) {
        self.submit(RenderCommand::Overlay(command));
    }

    fn present(&mut self) {
        self.submit(RenderCommand::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_pair_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ParticlePair>(), 16);
    }

    #[test]
    fn batch_round_trips_records() {
        let pair = ParticlePair {
            pos_a: [1, -128, 3],
            size_a: 4,
            color_a: [0xff; 4],
            ..ParticlePair::default()
        };
        let mut gfx = NullGraphics::new();
        gfx.submit_particles(ParticleSourceID::new(0), [[0.0; 4]; 4], &[pair, pair]);
        gfx.present();
        let Some(RenderCommand::Particles(batch)) = gfx.last_frame().first() else {
            panic!("expected a particle batch");
        };
        assert_eq!(batch.particle_count, 4);
        assert_eq!(batch.pairs(), &[pair, pair]);
    }

    #[test]
    fn overlay_text_builder() {
        let text = OverlayText::new(0, 60, TextStyle::Banner, "PAUSED")
            .with_font(Font::Banner)
            .boxed(SCREEN_WIDTH, TextAlign::Center);
        assert_eq!(text.width, Some(320));
        assert_eq!(text.align, TextAlign::Center);
        assert_eq!(text.font, Font::Banner);
    }
}
