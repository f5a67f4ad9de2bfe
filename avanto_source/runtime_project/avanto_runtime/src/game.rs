use crate::overlay::{fps_overlay, pause_overlay};
use crate::{
    EndReason, FixedStepper, FpsCounter, Host, PauseMenu, PauseTransition, RenderContext, Session,
    Stage, StageContext, StageOrchestrator, StageOutcome,
};
use avanto_bark::AudioBackend;
use avanto_input::InputSnapshot;
use avanto_project::GameConfig;
use avanto_render_bridge::RenderBridge;

pub const RUNNING_VOLUME: f32 = 1.0;

/// Top-level game object: owns the session, the stage list and the
/// collaborators, and runs the fixed and variable parts of every frame.
pub struct Game<B: RenderBridge, A: AudioBackend, H: Host> {
    session: Session,
    orchestrator: StageOrchestrator,
    pause: PauseMenu,
    stepper: FixedStepper,
    fps: FpsCounter,
    input: InputSnapshot,
    idle_input: InputSnapshot,
    graphics: B,
    audio: A,
    host: H,
    paused_volume: f32,
    ended: Option<EndReason>,
}

impl<B: RenderBridge, A: AudioBackend, H: Host> Game<B, A, H> {
    pub fn new(
        config: &GameConfig,
        stages: Vec<Box<dyn Stage>>,
        graphics: B,
        audio: A,
        host: H,
    ) -> Self {
        Self::with_session(config, Session::new(config), stages, graphics, audio, host)
    }

    pub fn with_session(
        config: &GameConfig,
        session: Session,
        stages: Vec<Box<dyn Stage>>,
        graphics: B,
        audio: A,
        host: H,
    ) -> Self {
        let mut game = Self {
            session,
            orchestrator: StageOrchestrator::new(stages),
            pause: PauseMenu::new(),
            stepper: FixedStepper::new(config.game.fixed_delta(), config.game.max_catch_up),
            fps: FpsCounter::default(),
            input: InputSnapshot::new(),
            idle_input: InputSnapshot::new(),
            graphics,
            audio,
            host,
            paused_volume: config.audio.paused_volume,
            ended: None,
        };
        game.audio.set_master_volume(RUNNING_VOLUME);

        let mut ctx = StageContext {
            session: &mut game.session,
            audio: &mut game.audio,
            input: &game.input,
            paused: false,
        };
        if game.orchestrator.start(&mut ctx, &mut game.host) == StageOutcome::GameEnded {
            game.finish(EndReason::Completed);
        }
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn graphics(&self) -> &B {
        &self.graphics
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn pause(&self) -> &PauseMenu {
        &self.pause
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn orchestrator(&self) -> &StageOrchestrator {
        &self.orchestrator
    }

    pub fn fixed_delta(&self) -> f32 {
        self.stepper.fixed_delta()
    }

    pub fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.ended
    }

    /// One simulation tick. The active stage runs first, then every
    /// particle source, both with the same delta. While paused the stage
    /// sees idle controllers.
    pub fn fixed_update(&mut self, delta_time: f32) {
        if self.ended.is_some() {
            return;
        }
        let paused = self.pause.is_paused();
        let mut ctx = StageContext {
            session: &mut self.session,
            audio: &mut self.audio,
            input: if paused { &self.idle_input } else { &self.input },
            paused,
        };
        let outcome = self
            .orchestrator
            .fixed_update(&mut ctx, delta_time, &mut self.host);
        self.session.particles.tick_all(delta_time);
        if outcome == StageOutcome::GameEnded {
            self.finish(EndReason::Completed);
        }
    }

    /// One variable-rate frame: pause input, stage hooks, particles,
    /// overlays, present.
    pub fn frame(&mut self, delta_time: f32, input: InputSnapshot) {
        self.input = input;
        self.run_frame(delta_time);
    }

    /// Runs the fixed ticks this frame is owed, then the frame itself.
    /// Returns the number of fixed ticks run.
    pub fn step(&mut self, frame_delta: f32, input: InputSnapshot) -> u32 {
        self.input = input;
        let ticks = self.stepper.advance(frame_delta);
        let fixed_delta = self.stepper.fixed_delta();
        for _ in 0..ticks {
            self.fixed_update(fixed_delta);
        }
        self.run_frame(frame_delta);
        ticks
    }

    /// Tears the session down from outside. No-op once the game is over.
    pub fn shutdown(&mut self) {
        if self.ended.is_none() {
            self.abort(EndReason::Shutdown);
        }
    }

    fn run_frame(&mut self, delta_time: f32) {
        if self.ended.is_some() {
            return;
        }
        self.fps.record(delta_time);

        match self
            .pause
            .handle_input(&self.input, self.session.player_ports())
        {
            PauseTransition::Paused { .. } => self.audio.set_master_volume(self.paused_volume),
            PauseTransition::Resumed => self.audio.set_master_volume(RUNNING_VOLUME),
            PauseTransition::Quit => {
                self.abort(EndReason::Quit);
                return;
            }
            PauseTransition::SelectionChanged(_) | PauseTransition::None => {}
        }
        let paused = self.pause.is_paused();
        let input = if paused { &self.idle_input } else { &self.input };

        let mut ctx = StageContext {
            session: &mut self.session,
            audio: &mut self.audio,
            input,
            paused,
        };
        self.orchestrator.update_pre(&mut ctx, delta_time);

        let mut render = RenderContext {
            session: &self.session,
            renderer: &mut self.graphics,
            paused,
        };
        self.orchestrator.render(&mut render, delta_time);
        self.session.particles.draw_all(&mut self.graphics);

        if paused {
            for command in pause_overlay(&self.session.info, self.pause.selection()) {
                self.graphics.overlay(command);
            }
        }
        self.graphics.overlay(fps_overlay(self.fps.label()));
        self.graphics.present();

        let mut ctx = StageContext {
            session: &mut self.session,
            audio: &mut self.audio,
            input,
            paused,
        };
        self.orchestrator.update_post(&mut ctx, delta_time);
    }

    fn abort(&mut self, reason: EndReason) {
        let mut ctx = StageContext {
            session: &mut self.session,
            audio: &mut self.audio,
            input: &self.idle_input,
            paused: self.pause.is_paused(),
        };
        self.orchestrator.abort(&mut ctx);
        self.host.report_game_ended(reason);
        self.finish(reason);
    }

    fn finish(&mut self, reason: EndReason) {
        self.session.particles.release_all();
        self.audio.stop_music();
        self.audio.set_master_volume(RUNNING_VOLUME);
        self.pause.end();
        self.ended = Some(reason);
        log::info!("session end: {reason:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostEvent, RecordingHost, StageFlags};
    use avanto_bark::NullAudio;
    use avanto_ids::ControllerPort;
    use avanto_input::Buttons;
    use avanto_particles::SteamParams;
    use avanto_render_bridge::{NullGraphics, OverlayCommand, OverlayText, RenderCommand, TextStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;
    type TestGame = Game<NullGraphics, NullAudio, RecordingHost>;

    struct Probe {
        done_after: Option<u32>,
        ticks: u32,
        log: Log,
    }

    impl Probe {
        fn note_input(&self, ctx: &StageContext<'_>) {
            if !ctx.input.held(ControllerPort(0)).is_empty() {
                self.log.borrow_mut().push("input");
            }
        }
    }

    impl Stage for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn flags(&self) -> StageFlags {
            StageFlags::new(StageFlags::ALL)
        }

        fn init(&mut self, _ctx: &mut StageContext<'_>) {
            self.log.borrow_mut().push("init");
        }

        fn fixed_update(&mut self, ctx: &mut StageContext<'_>, _delta_time: f32) -> bool {
            self.ticks += 1;
            self.log.borrow_mut().push("fixed");
            self.note_input(ctx);
            self.done_after.is_some_and(|n| self.ticks >= n)
        }

        fn update_pre(&mut self, ctx: &mut StageContext<'_>, _delta_time: f32) {
            self.log.borrow_mut().push("pre");
            self.note_input(ctx);
        }

        fn render(&mut self, ctx: &mut RenderContext<'_>, _delta_time: f32) {
            self.log.borrow_mut().push("render");
            ctx.renderer.overlay(OverlayCommand::Text(OverlayText::new(
                0,
                0,
                TextStyle::Normal,
                "stage",
            )));
        }

        fn update_post(&mut self, ctx: &mut StageContext<'_>, _delta_time: f32) {
            self.log.borrow_mut().push("post");
            self.note_input(ctx);
        }

        fn cleanup(&mut self, _ctx: &mut StageContext<'_>) {
            self.log.borrow_mut().push("cleanup");
        }
    }

    fn game(done_after: Option<u32>) -> (TestGame, Log) {
        let log: Log = Rc::default();
        let probe = Probe {
            done_after,
            ticks: 0,
            log: log.clone(),
        };
        let game = Game::new(
            &GameConfig::default(),
            vec![Box::new(probe)],
            NullGraphics::new(),
            NullAudio::new(),
            RecordingHost::new(),
        );
        (game, log)
    }

    fn press(buttons: Buttons) -> InputSnapshot {
        InputSnapshot::new().with_pressed(ControllerPort(0), buttons)
    }

    #[test]
    fn frame_runs_hooks_and_overlays_in_order() {
        let (mut game, log) = game(None);
        let id = game.session_mut().particles.acquire(8);
        if let Some(source) = id.and_then(|id| game.session_mut().particles.get_mut(id)) {
            source.init_steam(SteamParams::default());
        }
        game.fixed_update(0.5);
        game.frame(1.0 / 30.0, InputSnapshot::new());

        assert_eq!(*log.borrow(), vec!["init", "fixed", "pre", "render", "post"]);
        let frame = game.graphics().last_frame();
        assert!(matches!(
            frame.first(),
            Some(RenderCommand::Overlay(OverlayCommand::Text(t))) if t.text == "stage"
        ));
        assert!(matches!(frame.get(1), Some(RenderCommand::Particles(_))));
        assert_eq!(game.graphics().last_frame_text(), vec!["stage", "FPS: 0.00"]);
    }

    #[test]
    fn pause_draws_menu_and_lowers_volume() {
        let (mut game, _log) = game(None);
        assert_eq!(game.audio().master_volume(), 1.0);

        game.frame(0.1, press(Buttons::START));
        assert!(game.pause().is_paused());
        assert!((game.audio().master_volume() - 0.2).abs() < 1e-6);
        let text = game.graphics().last_frame_text();
        assert!(text.contains(&"PAUSED"));
        assert!(text.contains(&"RESUME"));
        assert!(matches!(
            game.graphics().last_frame().get(1),
            Some(RenderCommand::Overlay(OverlayCommand::Dim { .. }))
        ));

        game.frame(0.1, press(Buttons::B));
        assert!(!game.pause().is_paused());
        assert_eq!(game.audio().master_volume(), 1.0);
        assert!(!game.graphics().last_frame_text().contains(&"PAUSED"));
    }

    #[test]
    fn stages_see_idle_controllers_while_paused() {
        let (mut game, log) = game(None);
        let crouch = InputSnapshot::new().with_held(ControllerPort(0), Buttons::Z);

        game.frame(0.1, press(Buttons::START));
        game.frame(0.1, crouch);
        game.fixed_update(0.1);
        assert!(game.pause().is_paused());
        assert!(!log.borrow().contains(&"input"));

        game.frame(0.1, press(Buttons::B));
        assert!(!game.pause().is_paused());
        log.borrow_mut().clear();
        game.frame(0.1, crouch);
        game.fixed_update(0.1);
        assert_eq!(
            *log.borrow(),
            vec!["pre", "input", "render", "post", "input", "fixed", "input"]
        );
    }

    #[test]
    fn quitting_from_the_menu_ends_the_game() {
        let (mut game, log) = game(None);
        let id = game.session_mut().particles.acquire(8);
        assert!(id.is_some());

        game.frame(0.1, press(Buttons::START));
        game.frame(0.1, press(Buttons::D_RIGHT));
        game.frame(0.1, press(Buttons::A));

        assert!(game.is_over());
        assert_eq!(game.ended(), Some(EndReason::Quit));
        assert_eq!(game.host().ended(), Some(EndReason::Quit));
        assert_eq!(log.borrow().last(), Some(&"cleanup"));
        assert_eq!(game.session().particles.in_use(), 0);
        assert_eq!(game.audio().master_volume(), 1.0);

        let presented = game.graphics().frames_presented();
        game.frame(0.1, InputSnapshot::new());
        game.fixed_update(0.1);
        assert_eq!(game.graphics().frames_presented(), presented);
    }

    #[test]
    fn last_stage_done_completes_the_game() {
        let (mut game, log) = game(Some(2));
        let ticks = game.step(game.fixed_delta() * 2.5, InputSnapshot::new());
        assert_eq!(ticks, 2);
        assert_eq!(game.ended(), Some(EndReason::Completed));
        assert_eq!(
            game.host().events(),
            &[
                HostEvent::StageDone("probe".to_string()),
                HostEvent::GameEnded(EndReason::Completed),
            ]
        );
        assert_eq!(*log.borrow(), vec!["init", "fixed", "fixed", "cleanup"]);
    }

    #[test]
    fn particles_tick_while_the_stage_idles() {
        let (mut game, _log) = game(None);
        let Some(id) = game.session_mut().particles.acquire(16) else {
            panic!("pool exhausted");
        };
        if let Some(source) = game.session_mut().particles.get_mut(id) {
            source.init_steam(SteamParams::default());
        }
        for _ in 0..10 {
            game.fixed_update(1.0 / 30.0);
        }
        let alive = game
            .session()
            .particles
            .get(id)
            .map(|s| s.alive_count())
            .unwrap_or_default();
        assert!(alive > 0);
    }

    #[test]
    fn shutdown_reports_once() {
        let (mut game, log) = game(None);
        game.shutdown();
        game.shutdown();
        assert_eq!(game.host().events(), &[HostEvent::GameEnded(EndReason::Shutdown)]);
        assert_eq!(*log.borrow(), vec!["init", "cleanup"]);
    }
}
