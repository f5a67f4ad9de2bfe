use crate::Session;
use avanto_bark::AudioBackend;
use avanto_input::InputSnapshot;
use avanto_render_bridge::RenderBridge;

/// Which hooks a stage implements, so the orchestrator can skip the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageFlags(u8);

impl StageFlags {
    pub const NONE: u8 = 0;
    pub const HAS_INIT: u8 = 1 << 0;
    pub const HAS_FIXED_UPDATE: u8 = 1 << 1;
    pub const HAS_UPDATE_PRE: u8 = 1 << 2;
    pub const HAS_RENDER: u8 = 1 << 3;
    pub const HAS_UPDATE_POST: u8 = 1 << 4;
    pub const HAS_CLEANUP: u8 = 1 << 5;
    pub const ALL: u8 = (1 << 6) - 1;

    #[inline(always)]
    pub const fn new(flags: u8) -> Self {
        StageFlags(flags)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::NONE
    }

    #[inline(always)]
    pub const fn has_init(self) -> bool {
        self.0 & Self::HAS_INIT != 0
    }

    #[inline(always)]
    pub const fn has_fixed_update(self) -> bool {
        self.0 & Self::HAS_FIXED_UPDATE != 0
    }

    #[inline(always)]
    pub const fn has_update_pre(self) -> bool {
        self.0 & Self::HAS_UPDATE_PRE != 0
    }

    #[inline(always)]
    pub const fn has_render(self) -> bool {
        self.0 & Self::HAS_RENDER != 0
    }

    #[inline(always)]
    pub const fn has_update_post(self) -> bool {
        self.0 & Self::HAS_UPDATE_POST != 0
    }

    #[inline(always)]
    pub const fn has_cleanup(self) -> bool {
        self.0 & Self::HAS_CLEANUP != 0
    }
}

/// Mutable view handed to the simulation hooks.
pub struct StageContext<'a> {
    pub session: &'a mut Session,
    pub audio: &'a mut dyn AudioBackend,
    pub input: &'a InputSnapshot,
    pub paused: bool,
}

/// Read-only session plus the renderer, for the render hook.
pub struct RenderContext<'a> {
    pub session: &'a Session,
    pub renderer: &'a mut dyn RenderBridge,
    pub paused: bool,
}

/// One phase of the game. Only hooks named in `flags()` are called.
pub trait Stage {
    fn name(&self) -> &str;

    fn flags(&self) -> StageFlags;

    fn init(&mut self, _ctx: &mut StageContext<'_>) {}

    /// Returns true once the stage is done.
    fn fixed_update(&mut self, _ctx: &mut StageContext<'_>, _delta_time: f32) -> bool {
        false
    }

    fn update_pre(&mut self, _ctx: &mut StageContext<'_>, _delta_time: f32) {}

    fn render(&mut self, _ctx: &mut RenderContext<'_>, _delta_time: f32) {}

    fn update_post(&mut self, _ctx: &mut StageContext<'_>, _delta_time: f32) {}

    fn cleanup(&mut self, _ctx: &mut StageContext<'_>) {}
}
