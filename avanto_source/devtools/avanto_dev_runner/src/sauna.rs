//! The sauna round: players walk in and sit on the bench, then whoever
//! stands the heat longest wins. Holding Z crouches out of the hot air.

use avanto_ids::{ActorID, ControllerPort, MusicID, ParticleSourceID, SoundID};
use avanto_input::Buttons;
use avanto_particles::SteamParams;
use avanto_render_bridge::{Font, OverlayCommand, OverlayText, SCREEN_WIDTH, TextAlign, TextStyle};
use avanto_runtime::roster::{BEND, PASS_OUT, PLAYER_COUNT, SIT, UNBEND};
use avanto_runtime::{RenderContext, Session, Stage, StageContext, StageFlags, hud};
use avanto_structs::{GroundProfile, GroundStep, Vec3};
use avanto_timeline::{Script, TimelineCursor};
use std::f32::consts::PI;
use std::sync::Arc;

pub const SFX_START: SoundID = SoundID::new(0);
pub const SFX_STOP: SoundID = SoundID::new(2);
pub const SFX_WINNER: SoundID = SoundID::new(3);
pub const MUSIC: MusicID = MusicID::new(0);

pub const ROUND_SECONDS: f32 = 45.0;
/// Status gained per second while sitting upright.
pub const HEAT_RATE: f32 = 0.04;
pub const CROUCH_FACTOR: f32 = 0.4;
pub const OUTRO_SECONDS: f32 = 3.0;

const STEAM_CAPACITY: usize = 64;
const SEAT_X: [f32; PLAYER_COUNT] = [-45.0, -15.0, 15.0, 45.0];
const DOOR_Z: f32 = -150.0;
const BENCH_FRONT_Z: f32 = 40.0;
const BENCH_Z: f32 = 70.0;
const BENCH_HEIGHT: f32 = 20.0;
const ENTRY_STAGGER: f32 = 0.3;
const TURN_SPEED: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Heat,
    Outro,
}

struct Moves {
    bend: Arc<Script>,
    unbend: Arc<Script>,
    pass_out: Arc<Script>,
}

pub struct SaunaStage {
    phase: Phase,
    cursors: Vec<Option<TimelineCursor>>,
    crouching: [bool; PLAYER_COUNT],
    steam: Option<ParticleSourceID>,
    round_left: f32,
    outro_left: f32,
    moves: Moves,
}

impl Default for SaunaStage {
    fn default() -> Self {
        Self::new()
    }
}

impl SaunaStage {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            cursors: Vec::new(),
            crouching: [false; PLAYER_COUNT],
            steam: None,
            round_left: ROUND_SECONDS,
            outro_left: OUTRO_SECONDS,
            moves: Moves {
                bend: Arc::new(Script::builder("bend").play_whole_clip(BEND).end()),
                unbend: Arc::new(Script::builder("unbend").play_whole_clip(UNBEND).end()),
                pass_out: Arc::new(Script::builder("pass_out").play_whole_clip(PASS_OUT).end()),
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_left(&self) -> f32 {
        self.round_left
    }

    pub fn is_crouching(&self, actor: ActorID) -> bool {
        self.crouching.get(actor.index()).copied().unwrap_or(false)
    }

    pub fn steam(&self) -> Option<ParticleSourceID> {
        self.steam
    }

    fn advance_cursors(&mut self, ctx: &mut StageContext<'_>, delta_time: f32) {
        for slot in &mut self.cursors {
            if let Some(cursor) = slot
                && ctx
                    .session
                    .advance(cursor, &mut *ctx.audio, delta_time)
                    .is_finished()
            {
                *slot = None;
            }
        }
    }

    fn wants_crouch(ctx: &StageContext<'_>, id: ActorID) -> bool {
        if ctx.session.is_human(id) {
            return ctx.input.held(ControllerPort(id.0)).contains(Buttons::Z);
        }
        ctx.session.actor(id).is_some_and(|a| a.status > 0.5)
    }

    fn heat(&mut self, ctx: &mut StageContext<'_>, delta_time: f32) {
        for i in 0..PLAYER_COUNT.min(ctx.session.actors.len()) {
            let id = ActorID(i as u8);
            let wants = Self::wants_crouch(ctx, id);
            let idle = self.cursors.get(i).is_none_or(|c| c.is_none());
            let Some(actor) = ctx.session.actor_mut(id) else {
                continue;
            };
            if actor.eliminated {
                continue;
            }

            let rate = if self.crouching[i] {
                HEAT_RATE * CROUCH_FACTOR
            } else {
                HEAT_RATE
            };
            actor.status = (actor.status + rate * delta_time).min(1.0);

            if actor.status >= 1.0 {
                actor.eliminated = true;
                self.crouching[i] = false;
                self.set_cursor(i, TimelineCursor::new(id, self.moves.pass_out.clone()));
                log::info!("P{} passed out", i + 1);
            } else if wants != self.crouching[i] && idle {
                self.crouching[i] = wants;
                let script = if wants {
                    self.moves.bend.clone()
                } else {
                    self.moves.unbend.clone()
                };
                self.set_cursor(i, TimelineCursor::new(id, script));
            }
        }
    }

    fn set_cursor(&mut self, index: usize, cursor: TimelineCursor) {
        if let Some(slot) = self.cursors.get_mut(index) {
            *slot = Some(cursor);
        }
    }

    fn start_heat(&mut self, ctx: &mut StageContext<'_>) {
        self.phase = Phase::Heat;
        self.round_left = ROUND_SECONDS;
        ctx.session.play_sound(&mut *ctx.audio, SFX_START);
        ctx.audio.play_music(MUSIC, 0);
        log::info!("sauna: heat on");
    }

    fn end_round(&mut self, ctx: &mut StageContext<'_>) {
        self.phase = Phase::Outro;
        self.outro_left = OUTRO_SECONDS;
        ctx.audio.stop_music();
        ctx.session.play_sound(&mut *ctx.audio, SFX_STOP);

        let survivors = survivors(ctx.session);
        if let [winner] = survivors.as_slice() {
            ctx.session.play_sound(&mut *ctx.audio, SFX_WINNER);
            log::info!("sauna: P{} wins", winner.0 + 1);
        } else {
            log::info!("sauna: round over, {} still sitting", survivors.len());
        }
    }
}

/// Actors still in the round.
pub fn survivors(session: &Session) -> Vec<ActorID> {
    session
        .actors
        .iter()
        .filter(|a| !a.eliminated)
        .map(|a| a.id)
        .collect()
}

fn intro_script(seat: usize) -> Script {
    let x = SEAT_X[seat % PLAYER_COUNT];
    Script::builder(format!("enter_{seat}"))
        .wait(seat as f32 * ENTRY_STAGGER)
        .warp_to(x, DOOR_Z)
        .set_visible(true)
        .walk_to(x, BENCH_FRONT_Z)
        .climb_to(x, BENCH_Z)
        .rotate_to(PI, TURN_SPEED)
        .play_whole_clip(SIT)
        .end()
}

impl Stage for SaunaStage {
    fn name(&self) -> &str {
        "sauna"
    }

    fn flags(&self) -> StageFlags {
        StageFlags::new(
            StageFlags::HAS_INIT
                | StageFlags::HAS_FIXED_UPDATE
                | StageFlags::HAS_RENDER
                | StageFlags::HAS_CLEANUP,
        )
    }

    fn init(&mut self, ctx: &mut StageContext<'_>) {
        let session = &mut *ctx.session;
        session.ground = GroundProfile::new(&[GroundStep::new(BENCH_Z - 5.0, BENCH_HEIGHT)]);
        for actor in &mut session.actors {
            actor.reset();
        }

        self.phase = Phase::Intro;
        self.crouching = [false; PLAYER_COUNT];
        self.round_left = ROUND_SECONDS;
        self.cursors = session
            .actors
            .iter()
            .map(|a| Some(TimelineCursor::new(a.id, Arc::new(intro_script(a.id.index())))))
            .collect();

        self.steam = session.particles.acquire(STEAM_CAPACITY);
        if let Some(source) = self.steam.and_then(|id| session.particles.get_mut(id)) {
            source.position = Vec3::new(0.0, 10.0, BENCH_Z + 30.0);
            source.scale = 0.5;
            source.init_steam(SteamParams {
                max_particles: Some(48),
                ..SteamParams::default()
            });
        }
    }

    fn fixed_update(&mut self, ctx: &mut StageContext<'_>, delta_time: f32) -> bool {
        if ctx.paused {
            return false;
        }
        self.advance_cursors(ctx, delta_time);
        ctx.session.settle_on_ground();

        match self.phase {
            Phase::Intro => {
                if self.cursors.iter().all(Option::is_none) {
                    self.start_heat(ctx);
                }
                false
            }
            Phase::Heat => {
                self.round_left -= delta_time;
                self.heat(ctx, delta_time);
                if ctx.session.alive_players() <= 1 || self.round_left <= 0.0 {
                    self.end_round(ctx);
                }
                false
            }
            Phase::Outro => {
                self.outro_left -= delta_time;
                self.outro_left <= 0.0
            }
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>, _delta_time: f32) {
        hud::draw_actors(ctx.session, &mut *ctx.renderer);
        if self.phase == Phase::Intro {
            return;
        }
        hud::draw_hud(&mut *ctx.renderer, &ctx.session.actors);
        ctx.renderer.overlay(OverlayCommand::Text(
            OverlayText::new(
                0,
                10,
                TextStyle::Timer,
                format!("{:.0}", self.round_left.max(0.0).ceil()),
            )
            .with_font(Font::Timer)
            .boxed(SCREEN_WIDTH, TextAlign::Center),
        ));
    }

    fn cleanup(&mut self, ctx: &mut StageContext<'_>) {
        if let Some(id) = self.steam.take() {
            ctx.session.particles.release(id);
        }
        ctx.audio.stop_music();
        self.cursors.clear();
        self.crouching = [false; PLAYER_COUNT];
    }
}
