use crate::{EndReason, Host, RenderContext, Stage, StageContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Continue,
    Advanced { from: usize, to: usize },
    GameEnded,
    /// Nothing ran: the game is already over or not started.
    Idle,
}

/// Runs stages in order. The index past the last stage is the sentinel:
/// reaching it ends the game. The index never moves backwards.
///
/// The game ends only by running off the end of the list. A stage without
/// `HAS_INIT` is still entered and run; only its `init` call is skipped.
pub struct StageOrchestrator {
    stages: Vec<Box<dyn Stage>>,
    current: usize,
    started: bool,
}

impl StageOrchestrator {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self {
            stages,
            current: 0,
            started: false,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_name(&self) -> Option<&str> {
        self.stages.get(self.current).map(|s| s.name())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.stages.len()
    }

    /// Initialises the first stage. An empty list ends the game at once.
    pub fn start(&mut self, ctx: &mut StageContext<'_>, host: &mut dyn Host) -> StageOutcome {
        if self.started {
            return StageOutcome::Idle;
        }
        self.started = true;
        let Some(stage) = self.stages.get_mut(self.current) else {
            log::info!("no stages, game over");
            host.report_game_ended(EndReason::Completed);
            return StageOutcome::GameEnded;
        };
        log::info!("stage `{}` started", stage.name());
        if stage.flags().has_init() {
            stage.init(ctx);
        }
        StageOutcome::Continue
    }

    pub fn fixed_update(
        &mut self,
        ctx: &mut StageContext<'_>,
        delta_time: f32,
        host: &mut dyn Host,
    ) -> StageOutcome {
        if !self.started {
            return StageOutcome::Idle;
        }
        let Some(stage) = self.stages.get_mut(self.current) else {
            return StageOutcome::Idle;
        };
        let flags = stage.flags();
        if !flags.has_fixed_update() || !stage.fixed_update(ctx, delta_time) {
            return StageOutcome::Continue;
        }

        if flags.has_cleanup() {
            stage.cleanup(ctx);
        }
        host.report_stage_done(stage.name());
        let finished = stage.name().to_string();

        let from = self.current;
        self.current += 1;
        match self.stages.get_mut(self.current) {
            Some(next) => {
                log::info!("stage `{finished}` done, `{}` next", next.name());
                if next.flags().has_init() {
                    next.init(ctx);
                }
                StageOutcome::Advanced {
                    from,
                    to: self.current,
                }
            }
            None => {
                log::info!("stage `{finished}` done, game over");
                host.report_game_ended(EndReason::Completed);
                StageOutcome::GameEnded
            }
        }
    }

    pub fn update_pre(&mut self, ctx: &mut StageContext<'_>, delta_time: f32) {
        if let Some(stage) = self.stages.get_mut(self.current)
            && stage.flags().has_update_pre()
        {
            stage.update_pre(ctx, delta_time);
        }
    }

    pub fn render(&mut self, ctx: &mut RenderContext<'_>, delta_time: f32) {
        if let Some(stage) = self.stages.get_mut(self.current)
            && stage.flags().has_render()
        {
            stage.render(ctx, delta_time);
        }
    }

    pub fn update_post(&mut self, ctx: &mut StageContext<'_>, delta_time: f32) {
        if let Some(stage) = self.stages.get_mut(self.current)
            && stage.flags().has_update_post()
        {
            stage.update_post(ctx, delta_time);
        }
    }

    /// Cleans up the running stage and parks the index on the sentinel.
    pub fn abort(&mut self, ctx: &mut StageContext<'_>) {
        if let Some(stage) = self.stages.get_mut(self.current) {
            log::info!("stage `{}` aborted", stage.name());
            if self.started && stage.flags().has_cleanup() {
                stage.cleanup(ctx);
            }
        }
        self.current = self.stages.len();
    }
}
