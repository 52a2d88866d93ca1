//! Startup sequence: simulated progress, then the shell reveal.

use ember_scene::Role;
use rand::Rng;

use crate::animation::AnimationTrigger;
use crate::scheduler::{Job, TaskId};
use crate::site::Ctx;
use crate::surface::Surface;

pub const FULL_PROGRESS: f64 = 100.0;

#[derive(Debug, Default)]
pub struct LoadingSequencer {
    progress: f64,
    ticker: Option<TaskId>,
    revealed: bool,
}

impl LoadingSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn start<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        *self = Self::default();
        let loading = &ctx.config.loading;
        self.ticker = Some(
            ctx.scheduler
                .every(loading.progress_interval_ms, Job::LoadingProgress),
        );
        ctx.scheduler
            .after(loading.reveal_delay_ms, Job::RevealShell);
    }

    pub fn tick<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        let max_step = ctx.config.loading.max_progress_step;
        let step = ctx.rng.random_range(0.0..max_step);
        self.set_progress(ctx, self.progress + step);
    }

    fn set_progress<S: Surface>(&mut self, ctx: &mut Ctx<S>, progress: f64) {
        self.progress = progress.min(FULL_PROGRESS);
        if let Some(bar) = ctx.surface.query_first(Role::ProgressBar) {
            ctx.surface
                .set_style(bar, "width", &format!("{}%", self.progress));
        }
        if self.progress >= FULL_PROGRESS {
            self.stop_ticker(ctx);
        }
    }

    fn stop_ticker<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        if let Some(ticker) = self.ticker.take() {
            ctx.scheduler.cancel(ticker);
        }
    }

    /// Starts fading the loading screen out; an unfinished bar jumps to full.
    pub fn reveal<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        if self.progress < FULL_PROGRESS {
            self.set_progress(ctx, FULL_PROGRESS);
        }
        if let Some(screen) = ctx.surface.query_first(Role::LoadingScreen) {
            ctx.surface.set_style(screen, "opacity", "0");
        }
        ctx.scheduler
            .after(ctx.config.loading.fade_out_ms, Job::FinishReveal);
    }

    pub fn finish<S: Surface>(&mut self, ctx: &mut Ctx<S>, animations: &mut AnimationTrigger) {
        if let Some(screen) = ctx.surface.query_first(Role::LoadingScreen) {
            ctx.surface.set_style(screen, "display", "none");
        }
        if let Some(shell) = ctx.surface.query_first(Role::AppContainer) {
            ctx.surface.set_style(shell, "opacity", "1");
        }
        self.revealed = true;
        let initial = ctx.config.initial_section.clone();
        log::info!("shell revealed, starting at '{initial}'");
        animations.trigger(ctx, &initial);
    }

    pub fn stop<S: Surface>(&mut self, ctx: &mut Ctx<S>) {
        self.stop_ticker(ctx);
    }
}
